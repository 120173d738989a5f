use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::define_code_type;

define_code_type!(GymCode);

/// Climbing discipline a record or orbit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Discipline {
    #[serde(alias = "boulders", alias = "Boulder", alias = "boulder")]
    Boulders,
    #[serde(alias = "routes", alias = "Ropes", alias = "ropes")]
    Routes,
}

impl Discipline {
    /// Every discipline, in reporting order.
    pub const ALL: [Discipline; 2] = [Discipline::Boulders, Discipline::Routes];

    /// Rotation target used when a gym has no orbits of this discipline.
    pub fn default_target_weeks(self) -> f64 {
        match self {
            Discipline::Boulders => 6.0,
            Discipline::Routes => 8.0,
        }
    }
}

impl std::fmt::Display for Discipline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Discipline::Boulders => f.write_str("Boulders"),
            Discipline::Routes => f.write_str("Routes"),
        }
    }
}

/// One climb-setting event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub date_set: NaiveDate,
    /// Free-text attribution, possibly several names joined by `,`, `&` or `/`.
    #[serde(default)]
    pub setter: Option<String>,
    pub gym_code: GymCode,
    pub discipline: Discipline,
}

impl ProductionRecord {
    pub fn new(
        date_set: NaiveDate,
        setter: impl Into<String>,
        gym_code: impl Into<GymCode>,
        discipline: Discipline,
    ) -> Self {
        Self {
            date_set,
            setter: Some(setter.into()),
            gym_code: gym_code.into(),
            discipline,
        }
    }

    /// Names credited with this record. Empty when the setter is missing.
    pub fn setter_names(&self) -> Vec<&str> {
        self.setter.as_deref().map(split_setters).unwrap_or_default()
    }
}

/// Split a setter attribution on `,`, `&` and `/`, trimming each name and
/// dropping empty fragments.
pub fn split_setters(raw: &str) -> Vec<&str> {
    raw.split([',', '&', '/'])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(setter: Option<&str>) -> ProductionRecord {
        ProductionRecord {
            date_set: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            setter: setter.map(str::to_string),
            gym_code: GymCode::from("G1"),
            discipline: Discipline::Boulders,
        }
    }

    #[test]
    fn test_split_setters_all_separators() {
        assert_eq!(
            split_setters("Alice, Bob & Carol/Dan"),
            vec!["Alice", "Bob", "Carol", "Dan"]
        );
    }

    #[test]
    fn test_split_setters_drops_empty_fragments() {
        assert_eq!(split_setters(" , Alice,, & / "), vec!["Alice"]);
        assert!(split_setters("  ").is_empty());
    }

    #[test]
    fn test_missing_setter_yields_no_names() {
        assert!(record(None).setter_names().is_empty());
        assert_eq!(record(Some("Alice")).setter_names(), vec!["Alice"]);
    }

    #[test]
    fn test_discipline_defaults() {
        assert_eq!(Discipline::Boulders.default_target_weeks(), 6.0);
        assert_eq!(Discipline::Routes.default_target_weeks(), 8.0);
    }

    #[test]
    fn test_record_deserializes_without_setter() {
        let json = r#"{"date_set":"2024-03-04","gym_code":"G1","discipline":"ropes"}"#;
        let parsed: ProductionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.setter, None);
        assert_eq!(parsed.discipline, Discipline::Routes);
        assert_eq!(parsed.gym_code.as_str(), "G1");
    }
}

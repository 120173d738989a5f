use crate::models::{ProfileMap, StaffOverrides, StaffProfile};

/// Overlay user overrides onto a baseline, producing the profiles in use.
///
/// Neither input is modified. A name that only exists in `overrides` starts
/// from a blank [`StaffProfile`] so manually added staff can be forecast too.
pub fn merge_profiles(baseline: &ProfileMap, overrides: &StaffOverrides) -> ProfileMap {
    let mut merged = baseline.clone();
    for (name, patch) in overrides {
        let base = baseline
            .get(name)
            .cloned()
            .unwrap_or_else(|| StaffProfile::new(name.clone()));
        merged.insert(name.clone(), patch.apply_to(base));
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StaffProfilePatch, WeeklySchedule};

    fn baseline() -> ProfileMap {
        [
            StaffProfile::new("Alice").with_output(3.0),
            StaffProfile::new("Bob").with_output(5.5),
        ]
        .into_iter()
        .map(|p| (p.name.clone(), p))
        .collect()
    }

    #[test]
    fn test_no_overrides_is_identity() {
        let base = baseline();
        assert_eq!(merge_profiles(&base, &StaffOverrides::new()), base);
    }

    #[test]
    fn test_override_fields_take_precedence() {
        let base = baseline();
        let mut overrides = StaffOverrides::new();
        overrides.insert(
            "Alice".to_string(),
            StaffProfilePatch {
                avg_weekly_output: Some(10.0),
                base_schedule: Some(WeeklySchedule::new([1, 2]).unwrap()),
                ..Default::default()
            },
        );

        let merged = merge_profiles(&base, &overrides);
        assert_eq!(merged["Alice"].avg_weekly_output, 10.0);
        assert_eq!(merged["Alice"].base_schedule.len(), 2);
        assert!(merged["Alice"].active);
        assert_eq!(merged["Bob"], base["Bob"]);
        // baseline untouched
        assert_eq!(base["Alice"].avg_weekly_output, 3.0);
    }

    #[test]
    fn test_override_only_name_is_added() {
        let mut overrides = StaffOverrides::new();
        overrides.insert(
            "Dana".to_string(),
            StaffProfilePatch {
                avg_weekly_output: Some(4.0),
                ..Default::default()
            },
        );

        let merged = merge_profiles(&baseline(), &overrides);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged["Dana"].name, "Dana");
        assert_eq!(merged["Dana"].avg_weekly_output, 4.0);
    }
}

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{ModelError, ModelResult};
use super::production::GymCode;
use super::time::weekday_index;

/// Staff profiles keyed by name.
pub type ProfileMap = BTreeMap<String, StaffProfile>;

/// User-entered profile overrides keyed by name.
pub type StaffOverrides = BTreeMap<String, StaffProfilePatch>;

/// Per-date availability modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateModifier {
    /// Planned time off.
    Pto,
}

/// The weekdays a staff member normally works, as indices 0 (Sunday)
/// through 6 (Saturday).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct WeeklySchedule(BTreeSet<u8>);

impl WeeklySchedule {
    /// Build a schedule from weekday indices. Duplicates collapse; indices
    /// above 6 are rejected.
    pub fn new(days: impl IntoIterator<Item = u8>) -> ModelResult<Self> {
        let mut set = BTreeSet::new();
        for day in days {
            if day > 6 {
                return Err(ModelError::InvalidWeekday(day));
            }
            set.insert(day);
        }
        Ok(Self(set))
    }

    /// An empty schedule (never works).
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    pub fn contains(&self, weekday: u8) -> bool {
        self.0.contains(&weekday)
    }

    /// Whether `date` falls on one of the scheduled weekdays.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.contains(weekday_index(date))
    }

    /// Number of scheduled weekdays.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn days(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }
}

/// Monday through Friday.
impl Default for WeeklySchedule {
    fn default() -> Self {
        Self((1..=5).collect())
    }
}

impl TryFrom<Vec<u8>> for WeeklySchedule {
    type Error = ModelError;

    fn try_from(days: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<WeeklySchedule> for Vec<u8> {
    fn from(schedule: WeeklySchedule) -> Self {
        schedule.0.into_iter().collect()
    }
}

/// A setter's capacity profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffProfile {
    pub name: String,
    /// Effective climbs produced per worked shift.
    pub avg_weekly_output: f64,
    /// Percentage; informational only.
    #[serde(default)]
    pub attendance_variance: f64,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub base_schedule: WeeklySchedule,
    #[serde(default)]
    pub special_date_modifiers: BTreeMap<NaiveDate, DateModifier>,
}

fn default_active() -> bool {
    true
}

impl StaffProfile {
    /// A new active profile with zero output and the default schedule.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avg_weekly_output: 0.0,
            attendance_variance: 0.0,
            active: true,
            base_schedule: WeeklySchedule::default(),
            special_date_modifiers: BTreeMap::new(),
        }
    }

    pub fn with_output(mut self, avg_weekly_output: f64) -> Self {
        self.avg_weekly_output = avg_weekly_output;
        self
    }

    pub fn with_schedule(mut self, base_schedule: WeeklySchedule) -> Self {
        self.base_schedule = base_schedule;
        self
    }

    pub fn with_pto(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.special_date_modifiers
            .extend(dates.into_iter().map(|date| (date, DateModifier::Pto)));
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn is_on_pto(&self, date: NaiveDate) -> bool {
        self.special_date_modifiers.get(&date) == Some(&DateModifier::Pto)
    }

    /// PTO days recorded between `start` and `end`, both inclusive.
    pub fn pto_days_between(&self, start: NaiveDate, end: NaiveDate) -> usize {
        if end < start {
            return 0;
        }
        self.special_date_modifiers
            .range(start..=end)
            .filter(|(_, modifier)| **modifier == DateModifier::Pto)
            .count()
    }

    pub fn validate(&self) -> ModelResult<()> {
        if self.name.trim().is_empty() {
            return Err(ModelError::EmptyName);
        }
        if !self.avg_weekly_output.is_finite() || self.avg_weekly_output < 0.0 {
            return Err(ModelError::InvalidOutput {
                name: self.name.clone(),
                value: self.avg_weekly_output,
            });
        }
        if !self.attendance_variance.is_finite() || self.attendance_variance < 0.0 {
            return Err(ModelError::InvalidAttendanceVariance {
                name: self.name.clone(),
                value: self.attendance_variance,
            });
        }
        Ok(())
    }
}

/// A user override of selected profile fields. Fields left as `None` keep
/// the baseline value; set fields replace it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_weekly_output: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance_variance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_schedule: Option<WeeklySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_date_modifiers: Option<BTreeMap<NaiveDate, DateModifier>>,
}

impl StaffProfilePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlay this patch onto `base`, returning the merged profile.
    pub fn apply_to(&self, base: StaffProfile) -> StaffProfile {
        StaffProfile {
            name: base.name,
            avg_weekly_output: self.avg_weekly_output.unwrap_or(base.avg_weekly_output),
            attendance_variance: self
                .attendance_variance
                .unwrap_or(base.attendance_variance),
            active: self.active.unwrap_or(base.active),
            base_schedule: self.base_schedule.clone().unwrap_or(base.base_schedule),
            special_date_modifiers: self
                .special_date_modifiers
                .clone()
                .unwrap_or(base.special_date_modifiers),
        }
    }

    /// Check the patched fields for `name`.
    pub fn validate(&self, name: &str) -> ModelResult<()> {
        self.apply_to(StaffProfile::new(name)).validate()
    }
}

/// An explicit per-date shift record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftOverride {
    pub name: String,
    pub date: NaiveDate,
    pub gym_code: GymCode,
    /// `false` marks a normally scheduled day as not worked.
    #[serde(default = "default_active")]
    pub working: bool,
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::production::{Discipline, GymCode};

/// Rotation health relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RotationStatus {
    OnTrack,
    Lagging,
    Critical,
}

/// Global capacity discount, as a percentage in `[0, 100]`.
///
/// Out-of-range input is clamped and NaN reads as zero, so a buffer can
/// always be applied.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct VarianceBuffer(f64);

impl VarianceBuffer {
    pub const MAX_PERCENT: f64 = 100.0;

    pub fn new(percent: f64) -> Self {
        if percent.is_nan() {
            return Self(0.0);
        }
        Self(percent.clamp(0.0, Self::MAX_PERCENT))
    }

    pub fn percent(&self) -> f64 {
        self.0
    }

    /// Share of raw capacity kept after the buffer.
    pub fn retained_fraction(&self) -> f64 {
        1.0 - self.0 / Self::MAX_PERCENT
    }

    pub fn apply(&self, horsepower: f64) -> f64 {
        horsepower * self.retained_fraction()
    }
}

impl From<f64> for VarianceBuffer {
    fn from(percent: f64) -> Self {
        Self::new(percent)
    }
}

impl From<VarianceBuffer> for f64 {
    fn from(buffer: VarianceBuffer) -> Self {
        buffer.0
    }
}

/// Forecast for one orbit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitForecast {
    pub orbit_name: String,
    pub discipline: Discipline,
    pub total_climbs: f64,
    pub target_weeks: f64,
    #[serde(with = "super::time::serde_weeks")]
    pub projected_weeks: f64,
    pub status: RotationStatus,
}

/// Forecast for one discipline across all of a gym's orbits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisciplineForecast {
    pub discipline: Discipline,
    pub orbit_count: usize,
    pub total_climbs: f64,
    pub target_weeks: f64,
    #[serde(with = "super::time::serde_weeks")]
    pub projected_weeks: f64,
    pub status: RotationStatus,
}

/// Gym-wide rotation forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationForecast {
    pub gym_code: GymCode,
    pub target_weeks: f64,
    /// `f64::INFINITY` when there is no capacity to rotate anything.
    #[serde(with = "super::time::serde_weeks")]
    pub projected_weeks: f64,
    /// Total outstanding volume.
    pub weekly_debt: f64,
    pub weekly_horsepower: f64,
    pub status: RotationStatus,
    pub orbits: Vec<OrbitForecast>,
    pub disciplines: Vec<DisciplineForecast>,
}

impl RotationForecast {
    pub fn discipline(&self, discipline: Discipline) -> Option<&DisciplineForecast> {
        self.disciplines.iter().find(|d| d.discipline == discipline)
    }
}

/// One week of the yearly outlook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyDataPoint {
    pub date: NaiveDate,
    pub projected_rotation: f64,
    pub capacity: f64,
}

//! Records returned by the repository layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{GymCode, ProfileMap, StaffOverrides};

/// Outcome of importing one batch of production records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub gym_code: GymCode,
    /// Records in the submitted batch.
    pub received: usize,
    /// Records actually added to the store.
    pub stored: usize,
    /// The same batch had already been imported for this gym.
    pub duplicate: bool,
    /// SHA-256 fingerprint of the batch.
    pub checksum: String,
}

/// Per-gym overview of stored history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GymSummary {
    pub gym_code: GymCode,
    pub record_count: usize,
    pub orbit_count: usize,
    pub latest_record: Option<NaiveDate>,
}

/// Staff profiles as the dashboard shows them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffSnapshot {
    /// Profiles derived purely from history.
    pub baseline: ProfileMap,
    /// User overrides currently stored.
    pub overrides: StaffOverrides,
    /// Baseline with overrides applied; what forecasts use.
    pub in_use: ProfileMap,
}

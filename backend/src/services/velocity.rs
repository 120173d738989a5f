//! Historical velocity aggregation.
//!
//! Turns a window of production records into baseline setter profiles.
//! Credit for each record is split evenly across every setter named on it,
//! and each setter's total is normalized by the number of distinct shifts
//! (date + gym) they appear on.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Duration, NaiveDate};
use log::debug;

use crate::models::time::round_to;
use crate::models::{GymCode, ProductionRecord, ProfileMap, ShiftOverride, StaffProfile};

/// Days of history considered when no window is given.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 90;

/// The slice of history a baseline is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VelocityWindow {
    pub as_of: NaiveDate,
    pub lookback_days: u32,
}

impl VelocityWindow {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }

    pub fn with_lookback_days(mut self, lookback_days: u32) -> Self {
        self.lookback_days = lookback_days;
        self
    }

    /// Records dated before this day are ignored.
    ///
    /// A lookback reaching past the start of the calendar includes all history.
    pub fn cutoff(&self) -> NaiveDate {
        self.as_of
            .checked_sub_signed(Duration::days(i64::from(self.lookback_days)))
            .unwrap_or(NaiveDate::MIN)
    }
}

#[derive(Default)]
struct SetterTally<'a> {
    weighted_climbs: f64,
    shifts: BTreeSet<(NaiveDate, &'a GymCode)>,
}

/// Derive per-setter output rates from historical records.
///
/// `records_by_gym` maps each gym to the records filed under it; the gym key
/// is what identifies a shift. `schedule` is accepted for callers that have
/// schedule imports, but attendance is not derived from it yet, so it does
/// not change the result.
pub fn aggregate_velocity(
    records_by_gym: &HashMap<GymCode, Vec<ProductionRecord>>,
    schedule: Option<&[ShiftOverride]>,
    window: VelocityWindow,
) -> ProfileMap {
    if let Some(entries) = schedule.filter(|entries| !entries.is_empty()) {
        debug!(
            "{} schedule entries supplied; attendance variance is not derived from them",
            entries.len()
        );
    }

    let cutoff = window.cutoff();
    let mut tallies: BTreeMap<&str, SetterTally<'_>> = BTreeMap::new();
    let mut outside_window = 0usize;

    for (gym_code, records) in records_by_gym {
        for record in records {
            if record.date_set < cutoff {
                outside_window += 1;
                continue;
            }

            let names = record.setter_names();
            if names.is_empty() {
                continue;
            }

            let weight = 1.0 / names.len() as f64;
            for name in names {
                let tally = tallies.entry(name).or_default();
                tally.weighted_climbs += weight;
                tally.shifts.insert((record.date_set, gym_code));
            }
        }
    }

    debug!(
        "Aggregated {} setters since {} ({} records outside window)",
        tallies.len(),
        cutoff,
        outside_window
    );

    tallies
        .into_iter()
        .filter(|(_, tally)| !tally.shifts.is_empty())
        .map(|(name, tally)| {
            let per_shift = tally.weighted_climbs / tally.shifts.len() as f64;
            let profile = StaffProfile::new(name).with_output(round_to(per_shift, 1));
            (name.to_string(), profile)
        })
        .collect()
}

#[cfg(test)]
#[path = "velocity_tests.rs"]
mod velocity_tests;

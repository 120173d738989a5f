//! Calendar helpers shared by the forecasting services.
//!
//! All dates are plain calendar dates (`NaiveDate`). The reference date a
//! forecast is anchored on is always passed in by the caller; nothing in the
//! engine reads the system clock.

use chrono::{Datelike, Duration, NaiveDate};

/// Length of one forecast window in days.
pub const DAYS_PER_WEEK: i64 = 7;

/// Weekday index of a date, counted from Sunday = 0 through Saturday = 6.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// First day of the `week`-th window after `anchor`, or `None` past the
/// last representable date.
pub fn checked_week_start(anchor: NaiveDate, week: u32) -> Option<NaiveDate> {
    anchor.checked_add_signed(Duration::days(DAYS_PER_WEEK * i64::from(week)))
}

/// First day of the `week`-th window after `anchor` (`anchor + 7 * week`),
/// saturating at `NaiveDate::MAX`.
pub fn week_start(anchor: NaiveDate, week: u32) -> NaiveDate {
    checked_week_start(anchor, week).unwrap_or(NaiveDate::MAX)
}

/// Last day (inclusive) of the 7-day window starting at `start`, saturating
/// at `NaiveDate::MAX`.
pub fn week_end(start: NaiveDate) -> NaiveDate {
    start
        .checked_add_signed(Duration::days(DAYS_PER_WEEK - 1))
        .unwrap_or(NaiveDate::MAX)
}

/// The seven consecutive dates of the window starting at `start`.
pub fn days_of_week(start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take(DAYS_PER_WEEK as usize)
}

/// Round to `decimals` places, half away from zero.
///
/// Non-finite values pass through untouched so an infinite projection stays
/// infinite.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Serde adapter for week counts that may be infinite.
///
/// JSON has no representation for infinity, so a non-finite value is written
/// as `null` and `null` reads back as `f64::INFINITY`.
pub mod serde_weeks {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod time_tests;

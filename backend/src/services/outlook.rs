//! 52-week rotation outlook.
//!
//! Unlike [`forecast_rotation`](super::forecast::forecast_rotation), working
//! days here are approximated as "scheduled weekdays minus PTO days in the
//! window" without checking which weekday each PTO day falls on. A week with
//! no capacity reports the capped value [`UNREACHABLE_ROTATION_WEEKS`]
//! instead of infinity.

use std::iter::FusedIterator;

use chrono::NaiveDate;

use super::forecast::ForecastInput;
use crate::models::time::{round_to, week_end, week_start};
use crate::models::{StaffProfile, VarianceBuffer, YearlyDataPoint};

/// Number of weekly points in an outlook.
pub const OUTLOOK_WEEKS: usize = 52;

/// Projection reported for a week with zero horsepower.
pub const UNREACHABLE_ROTATION_WEEKS: f64 = 52.0;

/// Lazily computed outlook; yields exactly [`OUTLOOK_WEEKS`] points, one per
/// week starting at the reference date.
#[derive(Debug, Clone)]
pub struct YearlyOutlook<'a> {
    active_staff: Vec<&'a StaffProfile>,
    total_climbs: f64,
    variance_buffer: VarianceBuffer,
    as_of: NaiveDate,
    next_week: usize,
}

impl YearlyOutlook<'_> {
    fn point(&self, week: usize) -> YearlyDataPoint {
        let date = week_start(self.as_of, week as u32);
        let last_day = week_end(date);

        let raw_horsepower: f64 = self
            .active_staff
            .iter()
            .map(|profile| {
                let pto_days = profile.pto_days_between(date, last_day);
                let working_days = profile.base_schedule.len().saturating_sub(pto_days);
                profile.avg_weekly_output * working_days as f64
            })
            .sum();
        let horsepower = self.variance_buffer.apply(raw_horsepower);

        let projected = if horsepower > 0.0 {
            self.total_climbs / horsepower
        } else {
            UNREACHABLE_ROTATION_WEEKS
        };

        YearlyDataPoint {
            date,
            projected_rotation: round_to(projected, 1),
            capacity: round_to(horsepower, 0),
        }
    }
}

impl Iterator for YearlyOutlook<'_> {
    type Item = YearlyDataPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_week >= OUTLOOK_WEEKS {
            return None;
        }
        let point = self.point(self.next_week);
        self.next_week += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = OUTLOOK_WEEKS.saturating_sub(self.next_week);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for YearlyOutlook<'_> {}

impl FusedIterator for YearlyOutlook<'_> {}

/// Build the yearly outlook for a gym.
///
/// Uses the staff, orbit volume, buffer and reference date from `input`;
/// the look-ahead horizon and shift overrides do not apply here.
pub fn project_yearly_outlook<'a>(input: &ForecastInput<'a>) -> YearlyOutlook<'a> {
    YearlyOutlook {
        active_staff: input.active_staff().collect(),
        total_climbs: input.total_climbs(),
        variance_buffer: input.variance_buffer,
        as_of: input.as_of,
        next_week: 0,
    }
}

#[cfg(test)]
#[path = "outlook_tests.rs"]
mod outlook_tests;

//! Gym capacity forecasting.
//!
//! Simulates each active setter's working days over the next few weeks,
//! turns that into an average weekly horsepower, and divides the gym's
//! outstanding volume by it to get weeks-to-rotation.
//!
//! Orbit and discipline forecasts reuse the gym-wide projection and only
//! differ in the target they are judged against. Capacity is not split
//! between disciplines.

use chrono::NaiveDate;
use log::debug;

use super::status::classify;
use crate::models::time::{checked_week_start, days_of_week, round_to};
use crate::models::{
    Discipline, DisciplineForecast, GymCode, OrbitForecast, OrbitTarget, ProfileMap,
    RotationForecast, ShiftOverride, StaffProfile, VarianceBuffer,
};

pub const DEFAULT_WEEKS_TO_LOOK_AHEAD: u32 = 4;

/// Longest simulated horizon; larger requests are clamped to it.
pub const MAX_WEEKS_TO_LOOK_AHEAD: u32 = 520;

/// Target used when a gym has no orbits configured.
pub const DEFAULT_TARGET_WEEKS: f64 = 7.0;

/// Everything a forecast for one gym depends on.
#[derive(Debug, Clone)]
pub struct ForecastInput<'a> {
    pub gym_code: &'a GymCode,
    /// Profiles in use: the historical baseline with overrides applied.
    pub staff_profiles: &'a ProfileMap,
    /// Accepted for interface compatibility; not consulted.
    pub shift_overrides: &'a [ShiftOverride],
    pub variance_buffer: VarianceBuffer,
    pub orbit_targets: &'a [OrbitTarget],
    pub weeks_to_look_ahead: u32,
    /// First day of the forecast.
    pub as_of: NaiveDate,
}

impl<'a> ForecastInput<'a> {
    pub fn new(
        gym_code: &'a GymCode,
        staff_profiles: &'a ProfileMap,
        orbit_targets: &'a [OrbitTarget],
        as_of: NaiveDate,
    ) -> Self {
        Self {
            gym_code,
            staff_profiles,
            shift_overrides: &[],
            variance_buffer: VarianceBuffer::default(),
            orbit_targets,
            weeks_to_look_ahead: DEFAULT_WEEKS_TO_LOOK_AHEAD,
            as_of,
        }
    }

    pub fn with_variance_buffer(mut self, variance_buffer: VarianceBuffer) -> Self {
        self.variance_buffer = variance_buffer;
        self
    }

    pub fn with_shift_overrides(mut self, shift_overrides: &'a [ShiftOverride]) -> Self {
        self.shift_overrides = shift_overrides;
        self
    }

    pub fn with_weeks_to_look_ahead(mut self, weeks: u32) -> Self {
        self.weeks_to_look_ahead = weeks;
        self
    }

    /// Outstanding volume across every orbit.
    pub fn total_climbs(&self) -> f64 {
        self.orbit_targets.iter().map(|o| o.total_climbs).sum()
    }

    pub fn active_staff(&self) -> impl Iterator<Item = &'a StaffProfile> + 'a {
        self.staff_profiles.values().filter(|p| p.active)
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Scheduled days in the 7-day window from `start` that are not PTO.
fn working_days_in_week(profile: &StaffProfile, start: NaiveDate) -> usize {
    days_of_week(start)
        .filter(|day| profile.base_schedule.covers(*day) && !profile.is_on_pto(*day))
        .count()
}

/// `total_climbs / horsepower`, or infinity when there is no capacity.
fn projected_weeks(total_climbs: f64, horsepower: f64) -> f64 {
    if horsepower > 0.0 {
        total_climbs / horsepower
    } else {
        f64::INFINITY
    }
}

/// Project how many weeks the gym needs to rotate all of its climbs.
///
/// Never fails: no orbits gives zero volume against a 7-week target, no
/// active staff gives an infinite projection. The look-ahead is clamped to
/// `1..=MAX_WEEKS_TO_LOOK_AHEAD`, and weeks past the end of the calendar are
/// left out of the average.
pub fn forecast_rotation(input: &ForecastInput<'_>) -> RotationForecast {
    if !input.shift_overrides.is_empty() {
        debug!(
            "{} shift overrides supplied for {}; forecast uses base schedules",
            input.shift_overrides.len(),
            input.gym_code
        );
    }

    let total_climbs = input.total_climbs();
    let target_weeks =
        mean(input.orbit_targets.iter().map(|o| o.rotation_target)).unwrap_or(DEFAULT_TARGET_WEEKS);

    let weeks = input
        .weeks_to_look_ahead
        .clamp(1, MAX_WEEKS_TO_LOOK_AHEAD);
    let starts: Vec<NaiveDate> = (0..weeks)
        .map_while(|w| checked_week_start(input.as_of, w))
        .collect();
    let accumulated: f64 = starts
        .iter()
        .map(|&start| {
            input
                .active_staff()
                .map(|p| p.avg_weekly_output * working_days_in_week(p, start) as f64)
                .sum::<f64>()
        })
        .sum();
    let weekly_horsepower = input
        .variance_buffer
        .apply(accumulated / starts.len() as f64);

    let projected = projected_weeks(total_climbs, weekly_horsepower);
    if projected.is_infinite() {
        debug!("No setting capacity for {}; rotation never completes", input.gym_code);
    }

    let orbits = input
        .orbit_targets
        .iter()
        .map(|orbit| OrbitForecast {
            orbit_name: orbit.orbit_name.clone(),
            discipline: orbit.discipline,
            total_climbs: round_to(orbit.total_climbs, 1),
            target_weeks: round_to(orbit.rotation_target, 1),
            projected_weeks: round_to(projected, 1),
            status: classify(projected, orbit.rotation_target),
        })
        .collect();

    let disciplines = Discipline::ALL
        .into_iter()
        .map(|discipline| {
            let matching: Vec<&OrbitTarget> = input
                .orbit_targets
                .iter()
                .filter(|o| o.discipline == discipline)
                .collect();
            let target = mean(matching.iter().map(|o| o.rotation_target))
                .unwrap_or_else(|| discipline.default_target_weeks());

            DisciplineForecast {
                discipline,
                orbit_count: matching.len(),
                total_climbs: round_to(matching.iter().map(|o| o.total_climbs).sum(), 1),
                target_weeks: round_to(target, 1),
                projected_weeks: round_to(projected, 1),
                status: classify(projected, target),
            }
        })
        .collect();

    RotationForecast {
        gym_code: input.gym_code.clone(),
        target_weeks: round_to(target_weeks, 1),
        projected_weeks: round_to(projected, 1),
        weekly_debt: round_to(total_climbs, 1),
        weekly_horsepower: round_to(weekly_horsepower, 1),
        status: classify(projected, target_weeks),
        orbits,
        disciplines,
    }
}

#[cfg(test)]
#[path = "forecast_tests.rs"]
mod forecast_tests;

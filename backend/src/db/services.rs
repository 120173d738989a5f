//! High-level service layer over the repository traits.
//!
//! These functions glue storage to the pure forecasting engine in
//! [`crate::services`]: they load what a forecast needs from any
//! [`FullRepository`], build the inputs and hand back the engine's result.
//! The reference date is always passed in by the caller.
//!
//! ```text
//! http handlers ──► db::services ──► repository traits ──► LocalRepository
//!                        │
//!                        └──────────► services (pure engine)
//! ```

use chrono::NaiveDate;
use log::{debug, info};

use super::models::{GymSummary, ImportSummary, StaffSnapshot};
use super::repository::{FullRepository, RepositoryResult};
use crate::config::ForecastSettings;
use crate::models::{GymCode, ProductionRecord, ProfileMap, RotationForecast, YearlyDataPoint};
use crate::services::{
    aggregate_velocity, forecast_rotation, merge_profiles, project_yearly_outlook, ForecastInput,
    VelocityWindow,
};

// ==================== Health & Listing ====================

/// Check if the repository is healthy.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// All gyms known to the repository.
pub async fn list_gyms<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<GymSummary>> {
    repo.list_gyms().await
}

// ==================== Imports ====================

/// Import a batch of production records for one gym.
///
/// Re-importing an identical batch is not an error; the summary reports it
/// as a duplicate and nothing is stored twice.
pub async fn import_records<R: FullRepository + ?Sized>(
    repo: &R,
    gym_code: &GymCode,
    records: &[ProductionRecord],
) -> RepositoryResult<ImportSummary> {
    let summary = repo.store_records(gym_code, records).await?;
    if summary.duplicate {
        info!(
            "Skipped duplicate batch of {} records for {}",
            summary.received, gym_code
        );
    } else {
        info!("Imported {} records for {}", summary.stored, gym_code);
    }
    Ok(summary)
}

// ==================== Staff Profiles ====================

/// Baseline profiles aggregated from every gym's history.
pub async fn baseline_profiles<R: FullRepository + ?Sized>(
    repo: &R,
    window: VelocityWindow,
) -> RepositoryResult<ProfileMap> {
    let records = repo.fetch_all_records().await?;
    let profiles = aggregate_velocity(&records, None, window);
    debug!(
        "Aggregated {} baseline profiles from {} gyms",
        profiles.len(),
        records.len()
    );
    Ok(profiles)
}

/// Baseline profiles with stored overrides applied.
pub async fn profiles_in_use<R: FullRepository + ?Sized>(
    repo: &R,
    window: VelocityWindow,
) -> RepositoryResult<ProfileMap> {
    Ok(staff_snapshot(repo, window).await?.in_use)
}

/// Baseline, overrides and merged profiles in one read.
pub async fn staff_snapshot<R: FullRepository + ?Sized>(
    repo: &R,
    window: VelocityWindow,
) -> RepositoryResult<StaffSnapshot> {
    let baseline = baseline_profiles(repo, window).await?;
    let overrides = repo.get_staff_overrides().await?;
    let in_use = merge_profiles(&baseline, &overrides);
    Ok(StaffSnapshot {
        baseline,
        overrides,
        in_use,
    })
}

// ==================== Forecasts ====================

/// Rotation forecast for one gym.
///
/// Unknown gyms are forecast with no orbits rather than rejected.
pub async fn gym_forecast<R: FullRepository + ?Sized>(
    repo: &R,
    gym_code: &GymCode,
    as_of: NaiveDate,
    settings: &ForecastSettings,
) -> RepositoryResult<RotationForecast> {
    let window = VelocityWindow::new(as_of).with_lookback_days(settings.lookback_days);
    let profiles = profiles_in_use(repo, window).await?;
    let orbits = repo.get_orbit_targets(gym_code).await?;
    let shifts = repo.get_shift_overrides(gym_code).await?;
    let buffer = repo.get_variance_buffer().await?;

    let input = ForecastInput::new(gym_code, &profiles, &orbits, as_of)
        .with_shift_overrides(&shifts)
        .with_variance_buffer(buffer)
        .with_weeks_to_look_ahead(settings.weeks_to_look_ahead);

    let forecast = forecast_rotation(&input);
    info!(
        "Forecast for {} as of {}: {} weeks against {} ({:?})",
        gym_code, as_of, forecast.projected_weeks, forecast.target_weeks, forecast.status
    );
    Ok(forecast)
}

/// 52-week outlook for one gym.
pub async fn gym_outlook<R: FullRepository + ?Sized>(
    repo: &R,
    gym_code: &GymCode,
    as_of: NaiveDate,
    settings: &ForecastSettings,
) -> RepositoryResult<Vec<YearlyDataPoint>> {
    let window = VelocityWindow::new(as_of).with_lookback_days(settings.lookback_days);
    let profiles = profiles_in_use(repo, window).await?;
    let orbits = repo.get_orbit_targets(gym_code).await?;
    let buffer = repo.get_variance_buffer().await?;

    let input =
        ForecastInput::new(gym_code, &profiles, &orbits, as_of).with_variance_buffer(buffer);
    Ok(project_yearly_outlook(&input).collect())
}

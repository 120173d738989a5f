//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer in [`crate::db::services`]. The reference date defaults to
//! today (UTC) here and nowhere else.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};

use super::dto::{
    ForecastQuery, GymListResponse, HealthResponse, ImportRequest, OutlookResponse,
    VarianceBufferDto, WindowQuery,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::models::{ImportSummary, StaffSnapshot};
use crate::db::repository::PlanningRepository;
use crate::db::services as db_services;
use crate::models::{
    GymCode, OrbitTarget, ProductionRecord, RotationForecast, ShiftOverride, StaffProfilePatch,
    VarianceBuffer,
};
use crate::models::time::checked_week_start;
use crate::services::forecast::MAX_WEEKS_TO_LOOK_AHEAD;
use crate::services::outlook::OUTLOOK_WEEKS;
use crate::services::VelocityWindow;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn resolve_as_of(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| Utc::now().date_naive())
}

/// Reject a reference date whose `weeks`-week range runs past the calendar.
fn check_horizon(as_of: NaiveDate, weeks: u32) -> Result<(), AppError> {
    match checked_week_start(as_of, weeks) {
        Some(_) => Ok(()),
        None => Err(AppError::BadRequest(format!(
            "as_of {} leaves no room for a {}-week horizon",
            as_of, weeks
        ))),
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let repo_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        repository: repo_status,
    }))
}

// =============================================================================
// Gyms and Records
// =============================================================================

/// GET /v1/gyms
pub async fn list_gyms(State(state): State<AppState>) -> HandlerResult<GymListResponse> {
    let gyms = db_services::list_gyms(state.repository.as_ref()).await?;
    let total = gyms.len();
    Ok(Json(GymListResponse { gyms, total }))
}

/// POST /v1/gyms/{gym}/records
///
/// Returns `201 Created` for a new batch and `200 OK` for a duplicate.
pub async fn import_records(
    State(state): State<AppState>,
    Path(gym): Path<String>,
    Json(request): Json<ImportRequest>,
) -> Result<(StatusCode, Json<ImportSummary>), AppError> {
    let gym_code = GymCode::from(gym);
    let records: Vec<ProductionRecord> = request
        .records
        .into_iter()
        .map(|r| r.into_record(&gym_code))
        .collect();

    let summary =
        db_services::import_records(state.repository.as_ref(), &gym_code, &records).await?;
    let status = if summary.duplicate {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(summary)))
}

// =============================================================================
// Planning Inputs
// =============================================================================

/// GET /v1/gyms/{gym}/orbits
pub async fn get_orbits(
    State(state): State<AppState>,
    Path(gym): Path<String>,
) -> HandlerResult<Vec<OrbitTarget>> {
    let orbits = state
        .repository
        .get_orbit_targets(&GymCode::from(gym))
        .await?;
    Ok(Json(orbits))
}

/// PUT /v1/gyms/{gym}/orbits
pub async fn put_orbits(
    State(state): State<AppState>,
    Path(gym): Path<String>,
    Json(targets): Json<Vec<OrbitTarget>>,
) -> HandlerResult<Vec<OrbitTarget>> {
    let gym_code = GymCode::from(gym);
    state
        .repository
        .put_orbit_targets(&gym_code, targets)
        .await?;
    Ok(Json(state.repository.get_orbit_targets(&gym_code).await?))
}

/// GET /v1/gyms/{gym}/shifts
pub async fn get_shifts(
    State(state): State<AppState>,
    Path(gym): Path<String>,
) -> HandlerResult<Vec<ShiftOverride>> {
    let shifts = state
        .repository
        .get_shift_overrides(&GymCode::from(gym))
        .await?;
    Ok(Json(shifts))
}

/// PUT /v1/gyms/{gym}/shifts
pub async fn put_shifts(
    State(state): State<AppState>,
    Path(gym): Path<String>,
    Json(overrides): Json<Vec<ShiftOverride>>,
) -> HandlerResult<Vec<ShiftOverride>> {
    let gym_code = GymCode::from(gym);
    state
        .repository
        .put_shift_overrides(&gym_code, overrides)
        .await?;
    Ok(Json(state.repository.get_shift_overrides(&gym_code).await?))
}

// =============================================================================
// Forecasts
// =============================================================================

/// GET /v1/gyms/{gym}/forecast
///
/// `weeks` above [`MAX_WEEKS_TO_LOOK_AHEAD`] and reference dates too close to
/// the end of the calendar are rejected with `400 Bad Request`.
pub async fn get_forecast(
    State(state): State<AppState>,
    Path(gym): Path<String>,
    Query(query): Query<ForecastQuery>,
) -> HandlerResult<RotationForecast> {
    if let Some(weeks) = query.weeks.filter(|w| *w > MAX_WEEKS_TO_LOOK_AHEAD) {
        return Err(AppError::BadRequest(format!(
            "weeks must be at most {}, got {}",
            MAX_WEEKS_TO_LOOK_AHEAD, weeks
        )));
    }
    let settings = query.settings(&state.settings);
    let as_of = resolve_as_of(query.as_of);
    check_horizon(
        as_of,
        settings.weeks_to_look_ahead.clamp(1, MAX_WEEKS_TO_LOOK_AHEAD),
    )?;

    let forecast = db_services::gym_forecast(
        state.repository.as_ref(),
        &GymCode::from(gym),
        as_of,
        &settings,
    )
    .await?;
    Ok(Json(forecast))
}

/// GET /v1/gyms/{gym}/outlook
pub async fn get_outlook(
    State(state): State<AppState>,
    Path(gym): Path<String>,
    Query(query): Query<WindowQuery>,
) -> HandlerResult<OutlookResponse> {
    let gym_code = GymCode::from(gym);
    let as_of = resolve_as_of(query.as_of);
    check_horizon(as_of, OUTLOOK_WEEKS as u32)?;
    let settings = query.settings(&state.settings);
    let points =
        db_services::gym_outlook(state.repository.as_ref(), &gym_code, as_of, &settings).await?;

    Ok(Json(OutlookResponse {
        gym_code,
        as_of,
        points,
    }))
}

// =============================================================================
// Staff
// =============================================================================

/// GET /v1/staff
pub async fn get_staff(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> HandlerResult<StaffSnapshot> {
    let settings = query.settings(&state.settings);
    let window =
        VelocityWindow::new(resolve_as_of(query.as_of)).with_lookback_days(settings.lookback_days);
    let snapshot = db_services::staff_snapshot(state.repository.as_ref(), window).await?;
    Ok(Json(snapshot))
}

/// PUT /v1/staff/{name}
pub async fn put_staff_override(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(patch): Json<StaffProfilePatch>,
) -> HandlerResult<StaffProfilePatch> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("staff name must not be empty".into()));
    }
    state
        .repository
        .put_staff_override(name, patch.clone())
        .await?;
    Ok(Json(patch))
}

/// DELETE /v1/staff/{name}
pub async fn clear_staff_override(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, AppError> {
    state.repository.clear_staff_override(name.trim()).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Settings
// =============================================================================

/// GET /v1/settings/variance-buffer
pub async fn get_variance_buffer(
    State(state): State<AppState>,
) -> HandlerResult<VarianceBufferDto> {
    let buffer = state.repository.get_variance_buffer().await?;
    Ok(Json(VarianceBufferDto {
        percent: buffer.percent(),
    }))
}

/// PUT /v1/settings/variance-buffer
///
/// Out-of-range values are clamped; the response carries the stored value.
pub async fn put_variance_buffer(
    State(state): State<AppState>,
    Json(body): Json<VarianceBufferDto>,
) -> HandlerResult<VarianceBufferDto> {
    let buffer = VarianceBuffer::new(body.percent);
    state.repository.set_variance_buffer(buffer).await?;
    Ok(Json(VarianceBufferDto {
        percent: buffer.percent(),
    }))
}

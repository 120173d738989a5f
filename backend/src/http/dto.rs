//! Data Transfer Objects for the HTTP API.
//!
//! Forecast results, profiles and planning inputs already derive
//! `Serialize`/`Deserialize` and are returned as-is; this module only holds
//! the request and envelope types specific to the API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::ForecastSettings;
use crate::db::models::GymSummary;
use crate::models::{Discipline, GymCode, ProductionRecord, YearlyDataPoint};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository status
    pub repository: String,
}

/// Gym list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GymListResponse {
    pub gyms: Vec<GymSummary>,
    pub total: usize,
}

/// One record in an import batch.
///
/// `gym_code` may be omitted; it then defaults to the gym in the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRecord {
    pub date_set: NaiveDate,
    #[serde(default)]
    pub setter: Option<String>,
    #[serde(default)]
    pub gym_code: Option<GymCode>,
    pub discipline: Discipline,
}

impl ImportRecord {
    pub fn into_record(self, path_gym: &GymCode) -> ProductionRecord {
        ProductionRecord {
            date_set: self.date_set,
            setter: self.setter,
            gym_code: self.gym_code.unwrap_or_else(|| path_gym.clone()),
            discipline: self.discipline,
        }
    }
}

/// Request body for `POST /v1/gyms/{gym}/records`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRequest {
    pub records: Vec<ImportRecord>,
}

/// Query for endpoints that only need a reference date and history window.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindowQuery {
    /// Reference date; today (UTC) when omitted
    pub as_of: Option<NaiveDate>,
    pub lookback_days: Option<u32>,
}

/// Query for `GET /v1/gyms/{gym}/forecast`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastQuery {
    pub as_of: Option<NaiveDate>,
    /// Simulation horizon in weeks
    pub weeks: Option<u32>,
    pub lookback_days: Option<u32>,
}

impl WindowQuery {
    /// Server defaults with this query's overrides applied.
    pub fn settings(&self, defaults: &ForecastSettings) -> ForecastSettings {
        ForecastSettings {
            lookback_days: self.lookback_days.unwrap_or(defaults.lookback_days),
            ..*defaults
        }
    }
}

impl ForecastQuery {
    pub fn window(&self) -> WindowQuery {
        WindowQuery {
            as_of: self.as_of,
            lookback_days: self.lookback_days,
        }
    }

    pub fn settings(&self, defaults: &ForecastSettings) -> ForecastSettings {
        ForecastSettings {
            weeks_to_look_ahead: self.weeks.unwrap_or(defaults.weeks_to_look_ahead),
            ..self.window().settings(defaults)
        }
    }
}

/// Outlook response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlookResponse {
    pub gym_code: GymCode,
    pub as_of: NaiveDate,
    pub points: Vec<YearlyDataPoint>,
}

/// Body of the variance buffer endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VarianceBufferDto {
    pub percent: f64,
}

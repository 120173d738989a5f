//! # Orbit Forecast
//!
//! Capacity forecasting engine for climbing gym route-setting teams.
//!
//! Given historical production records, staff profiles, and per-gym orbit
//! targets, the crate estimates how many weeks each gym needs to rotate its
//! climbs, classifies that against the target, and projects a year-long
//! capacity curve that accounts for planned absences.
//!
//! ## Architecture
//!
//! - [`models`]: domain types (records, profiles, orbits, forecast results)
//! - [`services`]: the pure forecasting engine
//! - [`db`]: repository traits, the in-memory repository, and async
//!   orchestration over them
//! - [`config`]: TOML configuration with environment overrides
//! - [`http`]: Axum-based REST API (feature `http-server`)
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use orbit_forecast::models::{Discipline, GymCode, OrbitTarget, ProfileMap, StaffProfile};
//! use orbit_forecast::services::{forecast_rotation, ForecastInput};
//!
//! let gym = GymCode::from("G1");
//! let mut staff = ProfileMap::new();
//! staff.insert("Alice".into(), StaffProfile::new("Alice").with_output(8.0));
//! let orbits = vec![OrbitTarget::new("Cave", Discipline::Boulders, 120.0, 6.0)];
//! let as_of = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//!
//! let forecast = forecast_rotation(&ForecastInput::new(&gym, &staff, &orbits, as_of));
//! assert_eq!(forecast.weekly_horsepower, 40.0);
//! assert_eq!(forecast.projected_weeks, 3.0);
//! ```

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

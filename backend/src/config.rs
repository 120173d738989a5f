//! Application configuration.
//!
//! Settings are read from an `orbit.toml` file and can be overridden with
//! environment variables. Every field has a default, so an empty file (or
//! no file at all) yields a working configuration.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [forecast]
//! lookback_days = 90
//! weeks_to_look_ahead = 4
//! variance_buffer_percent = 0.0
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::db::repository::RepositoryError;
use crate::models::VarianceBuffer;
use crate::services::forecast::DEFAULT_WEEKS_TO_LOOK_AHEAD;
use crate::services::velocity::DEFAULT_LOOKBACK_DAYS;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub forecast: ForecastSettings,
}

/// Listener settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Defaults applied to forecasts when a request does not say otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastSettings {
    /// History window for velocity aggregation.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    /// Simulation horizon for the capacity forecast.
    #[serde(default = "default_weeks_to_look_ahead")]
    pub weeks_to_look_ahead: u32,
    /// Initial value of the global variance buffer.
    #[serde(default)]
    pub variance_buffer_percent: f64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_lookback_days() -> u32 {
    DEFAULT_LOOKBACK_DAYS
}

fn default_weeks_to_look_ahead() -> u32 {
    DEFAULT_WEEKS_TO_LOOK_AHEAD
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            lookback_days: default_lookback_days(),
            weeks_to_look_ahead: default_weeks_to_look_ahead(),
            variance_buffer_percent: 0.0,
        }
    }
}

impl ForecastSettings {
    /// The configured buffer, clamped to `0..=100`.
    pub fn variance_buffer(&self) -> VarianceBuffer {
        VarianceBuffer::new(self.variance_buffer_percent)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(AppConfig)` if successful
    /// * `Err(RepositoryError::ConfigurationError)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `orbit.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Returns `Ok(None)` when no file exists in any of them.
    pub fn from_default_location() -> Result<Option<Self>, RepositoryError> {
        let search_paths = [
            PathBuf::from("orbit.toml"),
            PathBuf::from("backend/orbit.toml"),
            PathBuf::from("../orbit.toml"),
        ];

        match search_paths.iter().find(|path| path.exists()) {
            Some(path) => Self::from_file(path).map(Some),
            None => Ok(None),
        }
    }

    /// Apply overrides from the process environment.
    ///
    /// # Environment Variables
    /// - `HOST`: listener address
    /// - `PORT`: listener port
    /// - `LOOKBACK_DAYS`: velocity window in days
    /// - `VARIANCE_BUFFER_PERCENT`: initial variance buffer
    pub fn apply_env_overrides(&mut self) -> Result<(), RepositoryError> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from any key lookup; see [`Self::apply_env_overrides`].
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), RepositoryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_override("PORT", &port)?;
        }
        if let Some(days) = lookup("LOOKBACK_DAYS") {
            self.forecast.lookback_days = parse_override("LOOKBACK_DAYS", &days)?;
        }
        if let Some(percent) = lookup("VARIANCE_BUFFER_PERCENT") {
            self.forecast.variance_buffer_percent =
                parse_override("VARIANCE_BUFFER_PERCENT", &percent)?;
        }
        Ok(())
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, RepositoryError> {
    raw.trim().parse().map_err(|_| {
        RepositoryError::configuration(format!("{} has an invalid value '{}'", key, raw))
    })
}

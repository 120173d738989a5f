//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::ForecastSettings;
use crate::db::repository::FullRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for storage operations
    pub repository: Arc<dyn FullRepository>,
    /// Defaults used when a request omits `weeks` or `lookback_days`
    pub settings: ForecastSettings,
}

impl AppState {
    /// Create a new application state with default forecast settings.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self {
            repository,
            settings: ForecastSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ForecastSettings) -> Self {
        self.settings = settings;
        self
    }
}

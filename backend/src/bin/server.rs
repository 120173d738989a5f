//! Orbit Forecast HTTP Server Binary
//!
//! Loads configuration, seeds the in-memory repository and serves the REST API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin orbit-server
//!
//! # Override settings without a config file
//! PORT=3000 VARIANCE_BUFFER_PERCENT=10 cargo run --bin orbit-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `LOOKBACK_DAYS`: Velocity window in days (default: 90)
//! - `VARIANCE_BUFFER_PERCENT`: Initial variance buffer (default: 0)
//! - `RUST_LOG`: Log filter (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use orbit_forecast::config::AppConfig;
use orbit_forecast::db::repositories::LocalRepository;
use orbit_forecast::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Orbit Forecast HTTP Server");

    let mut config = match AppConfig::from_default_location()? {
        Some(config) => config,
        None => {
            info!("No orbit.toml found; using defaults");
            AppConfig::default()
        }
    };
    config.apply_env_overrides()?;

    let repository =
        LocalRepository::new().with_variance_buffer(config.forecast.variance_buffer());
    info!(
        "Repository initialized (variance buffer {}%)",
        config.forecast.variance_buffer().percent()
    );

    let state = AppState::new(Arc::new(repository)).with_settings(config.forecast);
    let app = create_router(state);

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

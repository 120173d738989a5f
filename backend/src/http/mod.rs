//! HTTP server module for the forecasting dashboard.
//!
//! Exposes the service layer as a small JSON REST API. Handlers parse the
//! request, resolve the reference date and delegate to [`crate::db::services`].
//!
//! ```text
//! axum handlers ──► db::services ──► repository traits
//!                         └────────► forecasting engine
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;

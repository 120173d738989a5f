//! Storage and orchestration for the forecasting dashboard.
//!
//! - [`repository`]: trait definitions and error types
//! - [`repositories`]: concrete implementations (in-memory)
//! - [`services`]: async operations that combine storage with the engine
//! - [`checksum`]: batch fingerprints used for import deduplication
//! - [`models`]: summaries returned by the repository layer

pub mod checksum;
pub mod models;
pub mod repositories;
pub mod repository;
pub mod services;

pub use models::{GymSummary, ImportSummary, StaffSnapshot};
pub use repository::{
    ErrorContext, FullRepository, PlanningRepository, RecordRepository, RepositoryError,
    RepositoryResult,
};

#[cfg(feature = "local-repo")]
pub use repositories::LocalRepository;

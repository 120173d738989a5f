//! Production record storage.

use std::collections::HashMap;

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::db::models::{GymSummary, ImportSummary};
use crate::models::{GymCode, ProductionRecord};

/// Repository trait for imported production history.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Check if the store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Append a batch of records for `gym_code`.
    ///
    /// # Returns
    /// * `Ok(ImportSummary)` - with `duplicate = true` and nothing stored when
    ///   this exact batch was imported for the gym before
    /// * `Err(RepositoryError::ValidationError)` - if a record belongs to another gym
    async fn store_records(
        &self,
        gym_code: &GymCode,
        records: &[ProductionRecord],
    ) -> RepositoryResult<ImportSummary>;

    /// All records stored for one gym (empty for unknown gyms).
    async fn fetch_records(&self, gym_code: &GymCode) -> RepositoryResult<Vec<ProductionRecord>>;

    /// Every stored record, grouped by gym.
    async fn fetch_all_records(&self) -> RepositoryResult<HashMap<GymCode, Vec<ProductionRecord>>>;

    /// Gyms that have records or orbit targets, sorted by code.
    async fn list_gyms(&self) -> RepositoryResult<Vec<GymSummary>>;
}

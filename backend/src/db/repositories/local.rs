//! In-memory local repository implementation.
//!
//! All data lives behind a single `parking_lot::RwLock`, so clones of a
//! [`LocalRepository`] share state. That makes it suitable both as the
//! server's store and as an isolated fixture in tests.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use parking_lot::RwLock;

use crate::db::checksum::batch_checksum;
use crate::db::models::{GymSummary, ImportSummary};
use crate::db::repository::*;
use crate::models::{
    GymCode, ModelError, OrbitTarget, ProductionRecord, ShiftOverride, StaffOverrides,
    StaffProfilePatch, VarianceBuffer,
};

/// In-memory local repository.
///
/// # Example
/// ```
/// use orbit_forecast::db::repositories::LocalRepository;
/// use orbit_forecast::db::repository::PlanningRepository;
/// use orbit_forecast::models::VarianceBuffer;
///
/// # tokio_test_block(async {
/// let repo = LocalRepository::new().with_variance_buffer(VarianceBuffer::new(10.0));
/// assert_eq!(repo.get_variance_buffer().await.unwrap().percent(), 10.0);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    records: HashMap<GymCode, Vec<ProductionRecord>>,
    // Grows with every distinct batch; only `clear` resets it.
    batch_checksums: HashMap<GymCode, HashSet<String>>,
    orbit_targets: HashMap<GymCode, Vec<OrbitTarget>>,
    shift_overrides: HashMap<GymCode, Vec<ShiftOverride>>,
    staff_overrides: StaffOverrides,
    variance_buffer: VarianceBuffer,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            batch_checksums: HashMap::new(),
            orbit_targets: HashMap::new(),
            shift_overrides: HashMap::new(),
            staff_overrides: StaffOverrides::new(),
            variance_buffer: VarianceBuffer::default(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the global variance buffer.
    pub fn with_variance_buffer(self, buffer: VarianceBuffer) -> Self {
        self.data.write().variance_buffer = buffer;
        self
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository, keeping the health flag.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Total number of records stored across all gyms.
    pub fn record_count(&self) -> usize {
        self.data.read().records.values().map(Vec::len).sum()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::internal("Repository is not healthy")
                .with_context(ErrorContext::new(operation)));
        }
        Ok(())
    }
}

fn validation_failed(
    operation: &str,
    entity: &str,
    id: impl ToString,
    err: ModelError,
) -> RepositoryError {
    RepositoryError::from(err).with_context(
        ErrorContext::new(operation)
            .with_entity(entity)
            .with_entity_id(id),
    )
}

#[async_trait]
impl RecordRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn store_records(
        &self,
        gym_code: &GymCode,
        records: &[ProductionRecord],
    ) -> RepositoryResult<ImportSummary> {
        const OP: &str = "store_records";
        self.check_health(OP)?;

        if let Some(stray) = records.iter().find(|r| &r.gym_code != gym_code) {
            let err = ModelError::GymMismatch {
                expected: gym_code.to_string(),
                found: stray.gym_code.to_string(),
            };
            return Err(validation_failed(OP, "gym", gym_code, err));
        }

        let checksum = batch_checksum(records).map_err(|e| {
            RepositoryError::from(e)
                .with_context(ErrorContext::new(OP).with_entity("gym").with_entity_id(gym_code))
        })?;

        let mut data = self.data.write();
        let is_new = data
            .batch_checksums
            .entry(gym_code.clone())
            .or_default()
            .insert(checksum.clone());

        let stored = if is_new {
            data.records
                .entry(gym_code.clone())
                .or_default()
                .extend_from_slice(records);
            records.len()
        } else {
            debug!("Batch {} already imported for {}", checksum, gym_code);
            0
        };

        Ok(ImportSummary {
            gym_code: gym_code.clone(),
            received: records.len(),
            stored,
            duplicate: !is_new,
            checksum,
        })
    }

    async fn fetch_records(&self, gym_code: &GymCode) -> RepositoryResult<Vec<ProductionRecord>> {
        self.check_health("fetch_records")?;
        Ok(self
            .data
            .read()
            .records
            .get(gym_code)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_all_records(&self) -> RepositoryResult<HashMap<GymCode, Vec<ProductionRecord>>> {
        self.check_health("fetch_all_records")?;
        Ok(self.data.read().records.clone())
    }

    async fn list_gyms(&self) -> RepositoryResult<Vec<GymSummary>> {
        self.check_health("list_gyms")?;
        let data = self.data.read();

        let codes: HashSet<&GymCode> = data
            .records
            .keys()
            .chain(data.orbit_targets.keys())
            .collect();

        let mut gyms: Vec<GymSummary> = codes
            .into_iter()
            .map(|code| {
                let records = data.records.get(code);
                GymSummary {
                    gym_code: code.clone(),
                    record_count: records.map_or(0, Vec::len),
                    orbit_count: data.orbit_targets.get(code).map_or(0, Vec::len),
                    latest_record: records.and_then(|r| r.iter().map(|r| r.date_set).max()),
                }
            })
            .collect();

        gyms.sort_by(|a, b| a.gym_code.cmp(&b.gym_code));
        Ok(gyms)
    }
}

#[async_trait]
impl PlanningRepository for LocalRepository {
    async fn get_orbit_targets(&self, gym_code: &GymCode) -> RepositoryResult<Vec<OrbitTarget>> {
        self.check_health("get_orbit_targets")?;
        Ok(self
            .data
            .read()
            .orbit_targets
            .get(gym_code)
            .cloned()
            .unwrap_or_default())
    }

    async fn put_orbit_targets(
        &self,
        gym_code: &GymCode,
        targets: Vec<OrbitTarget>,
    ) -> RepositoryResult<()> {
        const OP: &str = "put_orbit_targets";
        self.check_health(OP)?;

        for target in &targets {
            target
                .validate()
                .map_err(|e| validation_failed(OP, "orbit", &target.orbit_name, e))?;
        }

        info!("Storing {} orbit targets for {}", targets.len(), gym_code);
        self.data.write().orbit_targets.insert(gym_code.clone(), targets);
        Ok(())
    }

    async fn get_shift_overrides(
        &self,
        gym_code: &GymCode,
    ) -> RepositoryResult<Vec<ShiftOverride>> {
        self.check_health("get_shift_overrides")?;
        Ok(self
            .data
            .read()
            .shift_overrides
            .get(gym_code)
            .cloned()
            .unwrap_or_default())
    }

    async fn put_shift_overrides(
        &self,
        gym_code: &GymCode,
        overrides: Vec<ShiftOverride>,
    ) -> RepositoryResult<()> {
        const OP: &str = "put_shift_overrides";
        self.check_health(OP)?;

        if let Some(stray) = overrides.iter().find(|o| &o.gym_code != gym_code) {
            let err = ModelError::GymMismatch {
                expected: gym_code.to_string(),
                found: stray.gym_code.to_string(),
            };
            return Err(validation_failed(OP, "gym", gym_code, err));
        }

        self.data
            .write()
            .shift_overrides
            .insert(gym_code.clone(), overrides);
        Ok(())
    }

    async fn get_staff_overrides(&self) -> RepositoryResult<StaffOverrides> {
        self.check_health("get_staff_overrides")?;
        Ok(self.data.read().staff_overrides.clone())
    }

    async fn put_staff_override(
        &self,
        name: &str,
        patch: StaffProfilePatch,
    ) -> RepositoryResult<()> {
        const OP: &str = "put_staff_override";
        self.check_health(OP)?;

        patch
            .validate(name)
            .map_err(|e| validation_failed(OP, "staff", name, e))?;

        self.data
            .write()
            .staff_overrides
            .insert(name.to_string(), patch);
        Ok(())
    }

    async fn clear_staff_override(&self, name: &str) -> RepositoryResult<()> {
        const OP: &str = "clear_staff_override";
        self.check_health(OP)?;

        match self.data.write().staff_overrides.remove(name) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::not_found("No override stored for staff member")
                .with_context(ErrorContext::new(OP).with_entity("staff").with_entity_id(name))),
        }
    }

    async fn get_variance_buffer(&self) -> RepositoryResult<VarianceBuffer> {
        self.check_health("get_variance_buffer")?;
        Ok(self.data.read().variance_buffer)
    }

    async fn set_variance_buffer(&self, buffer: VarianceBuffer) -> RepositoryResult<()> {
        self.check_health("set_variance_buffer")?;
        self.data.write().variance_buffer = buffer;
        Ok(())
    }
}

//! Planning state storage.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{
    GymCode, OrbitTarget, ShiftOverride, StaffOverrides, StaffProfilePatch, VarianceBuffer,
};

/// Repository trait for the editable inputs of a forecast.
#[async_trait]
pub trait PlanningRepository: Send + Sync {
    /// Orbit targets configured for a gym (empty if none).
    async fn get_orbit_targets(&self, gym_code: &GymCode) -> RepositoryResult<Vec<OrbitTarget>>;

    /// Replace a gym's orbit targets.
    ///
    /// # Returns
    /// * `Err(RepositoryError::ValidationError)` - if any target fails
    ///   [`OrbitTarget::validate`]; nothing is stored in that case
    async fn put_orbit_targets(
        &self,
        gym_code: &GymCode,
        targets: Vec<OrbitTarget>,
    ) -> RepositoryResult<()>;

    async fn get_shift_overrides(&self, gym_code: &GymCode)
        -> RepositoryResult<Vec<ShiftOverride>>;

    /// Replace a gym's shift overrides.
    async fn put_shift_overrides(
        &self,
        gym_code: &GymCode,
        overrides: Vec<ShiftOverride>,
    ) -> RepositoryResult<()>;

    /// All staff overrides keyed by name.
    async fn get_staff_overrides(&self) -> RepositoryResult<StaffOverrides>;

    /// Set (replace) the override for one staff member.
    async fn put_staff_override(
        &self,
        name: &str,
        patch: StaffProfilePatch,
    ) -> RepositoryResult<()>;

    /// Remove the override for one staff member.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - if no override exists for `name`
    async fn clear_staff_override(&self, name: &str) -> RepositoryResult<()>;

    async fn get_variance_buffer(&self) -> RepositoryResult<VarianceBuffer>;

    async fn set_variance_buffer(&self, buffer: VarianceBuffer) -> RepositoryResult<()>;
}

use serde::{Deserialize, Serialize};

use super::error::{ModelError, ModelResult};
use super::production::Discipline;

/// A named wall-zone that is cyclically re-set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitTarget {
    pub orbit_name: String,
    pub discipline: Discipline,
    /// Outstanding volume needing replacement.
    pub total_climbs: f64,
    /// Target weeks to fully rotate the orbit.
    pub rotation_target: f64,
}

impl OrbitTarget {
    pub fn new(
        orbit_name: impl Into<String>,
        discipline: Discipline,
        total_climbs: f64,
        rotation_target: f64,
    ) -> Self {
        Self {
            orbit_name: orbit_name.into(),
            discipline,
            total_climbs,
            rotation_target,
        }
    }

    /// Reject volumes below zero and targets that are not strictly positive.
    pub fn validate(&self) -> ModelResult<()> {
        let invalid = |reason: String| ModelError::InvalidOrbitTarget {
            orbit: self.orbit_name.clone(),
            reason,
        };

        if self.orbit_name.trim().is_empty() {
            return Err(invalid("orbit name must not be empty".to_string()));
        }
        if !self.total_climbs.is_finite() || self.total_climbs < 0.0 {
            return Err(invalid(format!(
                "total_climbs must be a finite value >= 0, got {}",
                self.total_climbs
            )));
        }
        if !self.rotation_target.is_finite() || self.rotation_target <= 0.0 {
            return Err(invalid(format!(
                "rotation_target must be a finite value > 0, got {}",
                self.rotation_target
            )));
        }
        Ok(())
    }
}

//! Validation errors for forecasting inputs.
//!
//! These are only raised at input boundaries (deserialization and repository
//! writes). The forecasting services themselves never fail.

/// Result alias for model validation.
pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Weekday index outside `0..=6`.
    #[error("invalid weekday index {0}; expected 0 (Sunday) through 6 (Saturday)")]
    InvalidWeekday(u8),

    /// A staff name that is empty after trimming.
    #[error("staff name must not be empty")]
    EmptyName,

    /// Output rate that is negative or not a number.
    #[error("staff '{name}' has invalid average output {value}; expected a finite value >= 0")]
    InvalidOutput { name: String, value: f64 },

    /// Attendance variance that is negative or not a number.
    #[error("staff '{name}' has invalid attendance variance {value}; expected a finite value >= 0")]
    InvalidAttendanceVariance { name: String, value: f64 },

    /// Orbit target that cannot be forecast against.
    #[error("orbit '{orbit}' is invalid: {reason}")]
    InvalidOrbitTarget { orbit: String, reason: String },

    /// Record filed under a gym other than its own.
    #[error("record for gym '{found}' submitted under gym '{expected}'")]
    GymMismatch { expected: String, found: String },
}

//! Repository trait definitions.
//!
//! Storage is split across two focused traits:
//!
//! - [`records`]: imported production history, keyed by gym
//! - [`planning`]: the editable planning state the dashboard owns (orbit
//!   targets, shift overrides, staff overrides and the variance buffer)
//!
//! For code that needs both, use the [`FullRepository`] bound.

pub mod error;
pub mod planning;
pub mod records;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use planning::PlanningRepository;
pub use records::RecordRepository;

/// Composite trait bound for a complete repository implementation.
pub trait FullRepository: RecordRepository + PlanningRepository {}

// Blanket implementation: any type implementing both traits is a FullRepository
impl<T> FullRepository for T where T: RecordRepository + PlanningRepository {}

//! Repository implementations.
//!
//! Only the in-memory [`LocalRepository`] ships today. It backs the server,
//! unit tests and the integration suite alike.

#[cfg(feature = "local-repo")]
pub mod local;

#[cfg(feature = "local-repo")]
pub use local::LocalRepository;

//! Lookup-related errors.

use thiserror::Error;

/// Errors surfaced by the strict lookup entry point.
///
/// Duplicate registration is deliberately absent: it is non-fatal, logged at
/// registration time, and the offending entry is dropped.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No registry could be resolved at all.
    #[error("Service locator not found")]
    LocatorNotFound,

    /// A registry exists but holds no service of the requested type.
    #[error("Service not found: {0}")]
    NotFound(String),
}

//! # Stagehand Protocols
//!
//! Contract layer for the stagehand service registry:
//!
//! - [`Service`] - the capability trait a component implements to become
//!   discoverable by the registry
//! - [`Container`] - the host collaborator that owns services and supplies
//!   the discovery pass
//! - [`ServiceError`] - lookup error taxonomy

pub mod container;
pub mod error;
pub mod service;

pub use container::{Container, RunMode};
pub use error::ServiceError;
pub use service::Service;

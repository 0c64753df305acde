//! # Stagehand Core
//!
//! Typed service registry with ordered lifecycle dispatch.
//!
//! ## Components
//!
//! - [`ServiceRegistry`] - type-keyed index over a container's services,
//!   driving initialize/shutdown hooks in discovery order
//! - [`ServiceLocator`] - resolution front-end holding a weak reference to
//!   the active registry
//! - [`RegistryState`] - coarse registry lifecycle state
//!
//! The registry is populated by a discovery pass supplied by the host's
//! [`Container`](stagehand_protocols::Container) implementation; it never
//! walks the host's object graph itself.

pub mod locator;
pub mod registry;

pub use locator::{RegistryFinder, ServiceLocator};
pub use registry::{RegistryState, ServiceRegistry};

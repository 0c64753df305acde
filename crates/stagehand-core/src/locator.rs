//! Resolution front-end over the active registry.

use std::any::type_name;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::debug;

use stagehand_protocols::{Service, ServiceError};

use crate::registry::ServiceRegistry;

/// Environment seam used to recover a registry when none is cached.
///
/// Implemented by the host; answers "find any existing registry instance in
/// the environment."
pub trait RegistryFinder: Send + Sync {
    /// Returns an existing registry from the environment, if any.
    fn find_registry(&self) -> Option<Arc<ServiceRegistry>>;
}

/// Lookup handle constructed by the composition root and passed by
/// reference to everything needing service resolution.
///
/// Holds the active registry weakly: the locator never keeps a registry
/// alive, and a registry torn down before its dependents degrades to an
/// ordinary not-found instead of a dangling reference.
pub struct ServiceLocator {
    registry: RwLock<Weak<ServiceRegistry>>,
    finder: Option<Arc<dyn RegistryFinder>>,
}

impl ServiceLocator {
    /// Locator that can recover a registry through the given environment
    /// finder.
    pub fn new(finder: Arc<dyn RegistryFinder>) -> Self {
        Self {
            registry: RwLock::new(Weak::new()),
            finder: Some(finder),
        }
    }

    /// Locator bound to a known registry, with no recovery path.
    pub fn bound(registry: &Arc<ServiceRegistry>) -> Self {
        Self {
            registry: RwLock::new(Arc::downgrade(registry)),
            finder: None,
        }
    }

    /// Point the locator at a registry.
    pub fn bind(&self, registry: &Arc<ServiceRegistry>) {
        *self.registry.write() = Arc::downgrade(registry);
    }

    /// Upgrade the cached registry, falling back to the environment finder.
    ///
    /// A registry found through the environment gets a registration pass
    /// before it is cached.
    fn resolve(&self) -> Option<Arc<ServiceRegistry>> {
        if let Some(registry) = self.registry.read().upgrade() {
            return Some(registry);
        }

        let found = self.finder.as_ref()?.find_registry()?;
        debug!(
            "Recovered registry for {} from environment",
            found.container().name()
        );
        found.register_services();
        *self.registry.write() = Arc::downgrade(&found);
        Some(found)
    }

    /// Look up the service of concrete type `T`, reporting failure as
    /// `None`.
    pub fn try_get<T: Service>(&self) -> Option<Arc<T>> {
        // The registry can already be gone during teardown, destroyed
        // before its dependents; treat that as an ordinary miss.
        self.resolve()?.try_get::<T>()
    }

    /// Look up the service of concrete type `T`, failing fast.
    ///
    /// Fails with [`ServiceError::LocatorNotFound`] when no registry can be
    /// resolved at all, and with [`ServiceError::NotFound`] naming `T` when
    /// a registry exists but has no such service.
    pub fn get<T: Service>(&self) -> Result<Arc<T>, ServiceError> {
        let registry = self.resolve().ok_or(ServiceError::LocatorNotFound)?;
        registry
            .try_get::<T>()
            .ok_or_else(|| ServiceError::NotFound(type_name::<T>().to_string()))
    }
}

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;

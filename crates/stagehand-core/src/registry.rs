//! Typed service registry with ordered lifecycle dispatch.

use std::any::TypeId;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use stagehand_protocols::{Container, Service};

/// Registry lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RegistryState {
    /// No registration pass has run yet.
    Uninitialized = 0,
    /// Services discovered and indexed; hooks not active.
    Registered = 1,
    /// Initialize hooks have fired.
    Active = 2,
}

impl From<u8> for RegistryState {
    fn from(v: u8) -> Self {
        match v {
            1 => RegistryState::Registered,
            2 => RegistryState::Active,
            _ => RegistryState::Uninitialized,
        }
    }
}

/// Type-keyed registry over the services attached to one container.
///
/// Each concrete service type is registered at most once; the first
/// registration wins and later duplicates are dropped with a diagnostic.
/// The ordered sequence preserves discovery order and drives lifecycle
/// dispatch: initialize forward, shutdown in reverse.
///
/// The host drives all calls from a single thread; the interior mutability
/// here exists so the registry can be shared behind `Arc` with `&self`
/// methods, not to support concurrent mutation.
pub struct ServiceRegistry {
    container: Arc<dyn Container>,
    by_type: DashMap<TypeId, Arc<dyn Service>>,
    ordered: RwLock<Vec<Arc<dyn Service>>>,
    state: AtomicU8,
}

impl ServiceRegistry {
    /// Create an empty registry owned by the given container.
    pub fn new(container: Arc<dyn Container>) -> Self {
        Self {
            container,
            by_type: DashMap::new(),
            ordered: RwLock::new(Vec::new()),
            state: AtomicU8::new(RegistryState::Uninitialized as u8),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RegistryState {
        RegistryState::from(self.state.load(Ordering::SeqCst))
    }

    /// The container this registry reads its services from.
    pub fn container(&self) -> &Arc<dyn Container> {
        &self.container
    }

    /// Clear and rebuild the registry from the container's current
    /// attachments.
    ///
    /// Discovery order is container-defined and preserved. A second service
    /// of an already-registered concrete type is dropped with a diagnostic;
    /// the earlier registration wins.
    pub fn register_services(&self) {
        let mut ordered = self.ordered.write();
        self.by_type.clear();
        ordered.clear();

        for service in self.container.discover_services() {
            let type_id = service.as_any().type_id();
            if self.by_type.contains_key(&type_id) {
                warn!(
                    "{} attached to {} is already registered, dropping duplicate",
                    service.service_name(),
                    self.container.name()
                );
                continue;
            }
            self.by_type.insert(type_id, service.clone());
            ordered.push(service);
        }

        // A rebuild forced while hooks are live keeps the Active state.
        let _ = self.state.compare_exchange(
            RegistryState::Uninitialized as u8,
            RegistryState::Registered as u8,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );

        debug!(
            "Registered {} services on {}",
            ordered.len(),
            self.container.name()
        );
    }

    /// Look up the registered service of concrete type `T`.
    ///
    /// On a miss while the host is in design-time, runs one synchronous
    /// re-registration pass and retries once, picking up services attached
    /// after the initial discovery. Never re-registers while live, where
    /// registry contents are expected to be stable.
    pub fn try_get<T: Service>(&self) -> Option<Arc<T>> {
        if let Some(service) = self.lookup::<T>() {
            return Some(service);
        }

        if !self.container.mode().is_live() {
            self.register_services();
            return self.lookup::<T>();
        }

        None
    }

    fn lookup<T: Service>(&self) -> Option<Arc<T>> {
        let service = self
            .by_type
            .get(&TypeId::of::<T>())
            .map(|entry| Arc::clone(entry.value()))?;
        service.as_any_arc().downcast::<T>().ok()
    }

    /// Whether a service of concrete type `T` is registered.
    pub fn contains<T: Service>(&self) -> bool {
        self.by_type.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered services.
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    /// Whether the registry holds no services.
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    /// Names of registered services in discovery order.
    pub fn service_names(&self) -> Vec<&'static str> {
        self.ordered
            .read()
            .iter()
            .map(|service| service.service_name())
            .collect()
    }

    /// Fire initialize hooks on every service in discovery order.
    ///
    /// Runs a registration pass first if none has happened yet, so an
    /// activation racing discovery still sees the full set. A no-op outside
    /// live operation and when already active.
    pub fn activate(&self) {
        if !self.container.mode().is_live() {
            debug!(
                "Activation of {} suppressed outside live operation",
                self.container.name()
            );
            return;
        }
        if self.state() == RegistryState::Active {
            return;
        }
        if self.ordered.read().is_empty() {
            self.register_services();
        }

        let services: Vec<_> = self.ordered.read().clone();
        info!(
            "Activating {} services on {}",
            services.len(),
            self.container.name()
        );
        for service in &services {
            service.initialize();
        }

        self.state
            .store(RegistryState::Active as u8, Ordering::SeqCst);
    }

    /// Fire shutdown hooks in reverse discovery order, last-registered
    /// first, mirroring acquire/release nesting.
    ///
    /// A no-op unless the registry is active, so hooks always pair up with
    /// a preceding activation.
    pub fn deactivate(&self) {
        if self.state() != RegistryState::Active {
            return;
        }

        let services: Vec<_> = self.ordered.read().clone();
        info!(
            "Deactivating {} services on {}",
            services.len(),
            self.container.name()
        );
        for service in services.iter().rev() {
            service.shutdown();
        }

        self.state
            .store(RegistryState::Registered as u8, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

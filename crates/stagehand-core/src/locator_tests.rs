use super::*;

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use stagehand_protocols::{Container, RunMode};

struct PingService;

impl Service for PingService {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

struct MissingService;

impl Service for MissingService {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

struct StubContainer {
    services: Vec<Arc<dyn Service>>,
    discovery_passes: AtomicUsize,
}

impl StubContainer {
    fn with_ping() -> Arc<Self> {
        Arc::new(Self {
            services: vec![Arc::new(PingService)],
            discovery_passes: AtomicUsize::new(0),
        })
    }

    fn empty() -> Arc<Self> {
        Arc::new(Self {
            services: Vec::new(),
            discovery_passes: AtomicUsize::new(0),
        })
    }

    fn discovery_passes(&self) -> usize {
        self.discovery_passes.load(Ordering::SeqCst)
    }
}

impl Container for StubContainer {
    fn name(&self) -> &str {
        "root"
    }

    fn mode(&self) -> RunMode {
        RunMode::Live
    }

    fn discover_services(&self) -> Vec<Arc<dyn Service>> {
        self.discovery_passes.fetch_add(1, Ordering::SeqCst);
        self.services.clone()
    }
}

struct StubFinder {
    registry: Mutex<Option<Arc<ServiceRegistry>>>,
}

impl StubFinder {
    fn holding(registry: Arc<ServiceRegistry>) -> Arc<Self> {
        Arc::new(Self {
            registry: Mutex::new(Some(registry)),
        })
    }

    fn empty() -> Arc<Self> {
        Arc::new(Self {
            registry: Mutex::new(None),
        })
    }
}

impl RegistryFinder for StubFinder {
    fn find_registry(&self) -> Option<Arc<ServiceRegistry>> {
        self.registry.lock().clone()
    }
}

#[test]
fn test_get_without_registry_reports_locator_not_found() {
    let locator = ServiceLocator::new(StubFinder::empty());

    let result = locator.get::<PingService>();
    assert!(matches!(result, Err(ServiceError::LocatorNotFound)));
}

#[test]
fn test_try_get_without_registry_is_none() {
    let locator = ServiceLocator::new(StubFinder::empty());
    assert!(locator.try_get::<PingService>().is_none());
}

#[test]
fn test_bound_locator_resolves_service() {
    let registry = Arc::new(ServiceRegistry::new(StubContainer::with_ping()));
    registry.register_services();
    let locator = ServiceLocator::bound(&registry);

    assert!(locator.try_get::<PingService>().is_some());
    assert!(locator.get::<PingService>().is_ok());
}

#[test]
fn test_get_miss_names_requested_type() {
    let registry = Arc::new(ServiceRegistry::new(StubContainer::with_ping()));
    registry.register_services();
    let locator = ServiceLocator::bound(&registry);

    match locator.get::<MissingService>() {
        Err(ServiceError::NotFound(name)) => assert!(name.contains("MissingService")),
        other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_finder_recovery_runs_registration_pass() {
    let container = StubContainer::with_ping();
    let registry = Arc::new(ServiceRegistry::new(container.clone()));
    let locator = ServiceLocator::new(StubFinder::holding(registry));

    assert!(locator.try_get::<PingService>().is_some());
    assert_eq!(container.discovery_passes(), 1);

    // The recovered registry is cached; later lookups reuse it.
    assert!(locator.try_get::<PingService>().is_some());
    assert_eq!(container.discovery_passes(), 1);
}

#[test]
fn test_teardown_degrades_to_not_found() {
    let registry = Arc::new(ServiceRegistry::new(StubContainer::with_ping()));
    registry.register_services();
    let locator = ServiceLocator::bound(&registry);
    drop(registry);

    assert!(locator.try_get::<PingService>().is_none());
    assert!(matches!(
        locator.get::<PingService>(),
        Err(ServiceError::LocatorNotFound)
    ));
}

#[test]
fn test_bind_points_at_new_registry() {
    let empty = Arc::new(ServiceRegistry::new(StubContainer::empty()));
    empty.register_services();
    let locator = ServiceLocator::bound(&empty);
    assert!(locator.try_get::<PingService>().is_none());

    let full = Arc::new(ServiceRegistry::new(StubContainer::with_ping()));
    full.register_services();
    locator.bind(&full);

    assert!(locator.try_get::<PingService>().is_some());
}

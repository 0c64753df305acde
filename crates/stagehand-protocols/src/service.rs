//! Service capability trait.

use std::any::Any;
use std::sync::Arc;

/// Capability trait a component implements to become discoverable by the
/// registry.
///
/// The lifecycle hooks default to no-ops, so the registry never calls into
/// behavior a service did not declare.
pub trait Service: Send + Sync + 'static {
    /// Human-readable name used in diagnostics.
    fn service_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Called when the owning container becomes active, in discovery order.
    fn initialize(&self) {}

    /// Called when the owning container becomes inactive, in reverse
    /// discovery order.
    fn shutdown(&self) {}

    /// Returns the service as `Any` for concrete-type identification.
    fn as_any(&self) -> &dyn Any;

    /// Returns the service as a shared `Any` for downcasting.
    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

//! Host container collaborator.

use std::sync::Arc;

use crate::service::Service;

/// Host execution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Editing state: lookups may trigger an on-demand re-registration pass
    /// and lifecycle hooks are suppressed.
    DesignTime,
    /// Live operation: registry contents are stable and hooks fire.
    Live,
}

impl RunMode {
    /// Whether the host is actively running.
    pub fn is_live(self) -> bool {
        matches!(self, RunMode::Live)
    }
}

/// The owning object services and the registry are attached to.
///
/// The host implements the subtree traversal; the registry only consumes its
/// result and never walks the object graph itself.
pub trait Container: Send + Sync {
    /// Identity used in diagnostics.
    fn name(&self) -> &str;

    /// Current host execution state.
    fn mode(&self) -> RunMode;

    /// All capability-implementers attached within this container's subtree.
    ///
    /// The returned order must be stable and deterministic; it becomes the
    /// registry's discovery order.
    fn discover_services(&self) -> Vec<Arc<dyn Service>>;
}

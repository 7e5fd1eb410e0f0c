// ABOUTME: Notifications emitted by containers and panels.
// ABOUTME: Events fan out to the emitting container's subscribers and every ancestor's.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use dock_core::{Pixels, Region};
use tokio::sync::broadcast;

use crate::PanelKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(pub u64);

impl ContainerId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    /// A panel's close affordance fired; the panel is removed right after
    Close {
        container: ContainerId,
        panel: PanelKey,
        id: Option<String>,
    },

    /// A panel was collapsed or expanded
    Toggle {
        container: ContainerId,
        panel: PanelKey,
        id: Option<String>,
        collapsed: bool,
    },

    /// An edge region changed size during a resize gesture
    Resized {
        container: ContainerId,
        region: Region,
        size: Pixels,
    },
}

impl PanelEvent {
    /// Container the event originated in
    pub fn container(&self) -> ContainerId {
        match self {
            PanelEvent::Close { container, .. }
            | PanelEvent::Toggle { container, .. }
            | PanelEvent::Resized { container, .. } => *container,
        }
    }
}

/// Broadcast point for one container, linked to its parent's scope.
///
/// Clones share the same channel and parent link, so re-parenting a
/// nested container is seen by every panel already holding its scope.
#[derive(Debug, Clone)]
pub struct EventScope {
    inner: Arc<ScopeInner>,
}

#[derive(Debug)]
struct ScopeInner {
    tx: broadcast::Sender<PanelEvent>,
    parent: RwLock<Option<EventScope>>,
}

impl EventScope {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            inner: Arc::new(ScopeInner {
                tx,
                parent: RwLock::new(None),
            }),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PanelEvent> {
        self.inner.tx.subscribe()
    }

    /// Deliver to this scope, then to each ancestor in turn
    pub fn emit(&self, event: PanelEvent) {
        let mut scope = Some(self.clone());
        while let Some(current) = scope {
            // No subscribers is fine
            let _ = current.inner.tx.send(event.clone());
            scope = current.parent();
        }
    }

    pub fn parent(&self) -> Option<EventScope> {
        match self.inner.parent.read() {
            Ok(parent) => parent.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub(crate) fn set_parent(&self, parent: Option<EventScope>) {
        match self.inner.parent.write() {
            Ok(mut slot) => *slot = parent,
            Err(poisoned) => *poisoned.into_inner() = parent,
        }
    }

    pub fn same_scope(&self, other: &EventScope) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

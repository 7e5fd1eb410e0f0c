// ABOUTME: A panel whose content is a container of its own.
// ABOUTME: The inner container is built when the panel is docked; a ready signal marks it.

use dock_core::RegionName;
use tokio::sync::watch;

use crate::container::{Container, RegionPanel};
use crate::events::EventScope;
use crate::panel::{Panel, PanelKey, PanelOptions, PanelRef};

/// Resolves once a nested container has its inner container
#[derive(Debug, Clone)]
pub struct ReadySignal {
    rx: watch::Receiver<bool>,
}

impl ReadySignal {
    pub fn is_ready(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait for the inner container. Returns false if the nested
    /// container was dropped before it was ever docked.
    pub async fn wait(mut self) -> bool {
        // The guard borrows `self`; drop it before the result is returned
        self.rx.wait_for(|ready| *ready).await.map(drop).is_ok()
    }
}

/// Recursive layouts: dock this into a region of another container and
/// it gets a full container inside.
///
/// Until it is docked there is nowhere for the inner container to live,
/// so the delegated API logs and returns its empty result. Callers that
/// build the tree out of order can await `ready_signal()` instead.
#[derive(Debug)]
pub struct NestedContainer<C> {
    inner: Option<Container<C>>,
    ready: watch::Sender<bool>,
}

impl<C> NestedContainer<C> {
    pub fn new() -> Self {
        let (ready, _) = watch::channel(false);
        Self { inner: None, ready }
    }

    pub fn is_ready(&self) -> bool {
        self.inner.is_some()
    }

    pub fn ready_signal(&self) -> ReadySignal {
        ReadySignal {
            rx: self.ready.subscribe(),
        }
    }

    pub(crate) fn mount(&mut self, container: Container<C>) {
        tracing::debug!("Nested container ready as {:?}", container.id());
        self.inner = Some(container);
        self.ready.send_replace(true);
    }

    pub(crate) fn set_parent_scope(&mut self, scope: Option<EventScope>) {
        if let Some(inner) = &self.inner {
            inner.events().set_parent(scope);
        }
    }

    pub fn container(&self) -> Option<&Container<C>> {
        self.inner.as_ref()
    }

    pub fn container_mut(&mut self) -> Option<&mut Container<C>> {
        self.inner.as_mut()
    }

    fn ready_mut(&mut self, op: &str) -> Option<&mut Container<C>> {
        if self.inner.is_none() {
            tracing::warn!("Nested container not mounted yet, dropping {}", op);
        }
        self.inner.as_mut()
    }

    fn ready_ref(&self, op: &str) -> Option<&Container<C>> {
        if self.inner.is_none() {
            tracing::warn!("Nested container not mounted yet, dropping {}", op);
        }
        self.inner.as_ref()
    }

    pub fn add_panel(&mut self, content: C, region: impl RegionName, options: PanelOptions) -> Option<PanelKey> {
        self.ready_mut("add_panel")?.add_panel(content, region, options)
    }

    pub fn add_nested(
        &mut self,
        nested: NestedContainer<C>,
        region: impl RegionName,
        options: PanelOptions,
    ) -> Option<PanelKey> {
        self.ready_mut("add_nested")?.add_nested(nested, region, options)
    }

    pub fn remove_panel<'a>(&mut self, panel: impl Into<PanelRef<'a>>) -> bool {
        self.ready_mut("remove_panel")
            .is_some_and(|inner| inner.remove_panel(panel))
    }

    pub fn get_panel_by_id(&self, id: &str) -> Option<&Panel<C>> {
        self.ready_ref("get_panel_by_id")?.get_panel_by_id(id)
    }

    pub fn move_panel<'a>(&mut self, panel: impl Into<PanelRef<'a>>, region: impl RegionName) -> bool {
        self.ready_mut("move_panel")
            .is_some_and(|inner| inner.move_panel(panel, region))
    }

    pub fn panels(&self) -> Vec<RegionPanel<'_, C>> {
        self.ready_ref("panels")
            .map(Container::panels)
            .unwrap_or_default()
    }

    pub fn panels_in(&self, region: impl RegionName) -> &[Panel<C>] {
        match self.ready_ref("panels_in") {
            Some(inner) => inner.panels_in(region),
            None => &[],
        }
    }

    pub fn clear_panels(&mut self) -> Vec<Panel<C>> {
        self.ready_mut("clear_panels")
            .map(Container::clear_panels)
            .unwrap_or_default()
    }

    pub fn clear_region(&mut self, region: impl RegionName) -> Vec<Panel<C>> {
        self.ready_mut("clear_region")
            .map(|inner| inner.clear_region(region))
            .unwrap_or_default()
    }
}

impl<C> Default for NestedContainer<C> {
    fn default() -> Self {
        Self::new()
    }
}

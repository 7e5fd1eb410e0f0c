// ABOUTME: A dockable panel wrapping one piece of content.
// ABOUTME: Owns header options and collapsed state, and announces close/toggle.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::events::{ContainerId, EventScope, PanelEvent};
use crate::nested::NestedContainer;

/// Opaque handle for a panel, unique for the life of the process.
/// Survives moves between regions and containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelKey(pub u64);

impl PanelKey {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Header and affordance settings applied when a panel is created
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelOptions {
    /// Caller-chosen identifier, expected unique within a container
    pub id: Option<String>,
    pub title: Option<String>,
    pub closable: bool,
    pub collapsible: bool,
}

impl PanelOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    pub fn collapsible(mut self, collapsible: bool) -> Self {
        self.collapsible = collapsible;
        self
    }
}

/// How callers point at a panel: by handle or by id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelRef<'a> {
    Key(PanelKey),
    Id(&'a str),
}

impl PanelRef<'_> {
    pub fn matches<C>(&self, panel: &Panel<C>) -> bool {
        match self {
            PanelRef::Key(key) => panel.key() == *key,
            PanelRef::Id(id) => panel.id() == Some(*id),
        }
    }
}

impl From<PanelKey> for PanelRef<'_> {
    fn from(key: PanelKey) -> Self {
        PanelRef::Key(key)
    }
}

impl<'a> From<&'a str> for PanelRef<'a> {
    fn from(id: &'a str) -> Self {
        PanelRef::Id(id)
    }
}

impl<'a> From<&'a String> for PanelRef<'a> {
    fn from(id: &'a String) -> Self {
        PanelRef::Id(id.as_str())
    }
}

impl<'a, C> From<&'a Panel<C>> for PanelRef<'a> {
    fn from(panel: &'a Panel<C>) -> Self {
        PanelRef::Key(panel.key())
    }
}

/// What a panel wraps: caller content, or a whole container of its own
#[derive(Debug)]
pub enum PanelContent<C> {
    Leaf(C),
    Nested(NestedContainer<C>),
}

/// Where a docked panel currently lives
#[derive(Debug, Clone)]
struct Host {
    container: ContainerId,
    scope: EventScope,
}

#[derive(Debug)]
pub struct Panel<C> {
    key: PanelKey,
    options: PanelOptions,
    collapsed: bool,
    content: PanelContent<C>,
    host: Option<Host>,
}

impl<C> Panel<C> {
    /// A standalone panel, not yet docked anywhere
    pub fn new(content: C, options: PanelOptions) -> Self {
        Self::from_content(PanelContent::Leaf(content), options)
    }

    pub fn nested(nested: NestedContainer<C>, options: PanelOptions) -> Self {
        Self::from_content(PanelContent::Nested(nested), options)
    }

    pub(crate) fn from_content(content: PanelContent<C>, options: PanelOptions) -> Self {
        Self {
            key: PanelKey::next(),
            options,
            collapsed: false,
            content,
            host: None,
        }
    }

    pub fn key(&self) -> PanelKey {
        self.key
    }

    pub fn id(&self) -> Option<&str> {
        self.options.id.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.options.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.options.title = Some(title.into());
    }

    pub fn options(&self) -> &PanelOptions {
        &self.options
    }

    pub fn is_closable(&self) -> bool {
        self.options.closable
    }

    pub fn is_collapsible(&self) -> bool {
        self.options.collapsible
    }

    /// A header is drawn when there is a title or any affordance to put in it
    pub fn has_header(&self) -> bool {
        self.options.title.is_some() || self.options.closable || self.options.collapsible
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Collapsing hides the body; the header stays
    pub fn is_body_visible(&self) -> bool {
        !self.collapsed
    }

    /// Flip collapsed state and announce it. Returns the new state.
    pub fn toggle_collapse(&mut self) -> bool {
        self.collapsed = !self.collapsed;
        tracing::debug!("Panel {:?} collapsed={}", self.key, self.collapsed);
        if let Some(host) = &self.host {
            host.scope.emit(PanelEvent::Toggle {
                container: host.container,
                panel: self.key,
                id: self.options.id.clone(),
                collapsed: self.collapsed,
            });
        }
        self.collapsed
    }

    /// Returns true when the state actually changed
    pub fn set_collapsed(&mut self, collapsed: bool) -> bool {
        if self.collapsed == collapsed {
            return false;
        }
        self.toggle_collapse();
        true
    }

    pub fn content(&self) -> &PanelContent<C> {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut PanelContent<C> {
        &mut self.content
    }

    pub fn into_content(self) -> PanelContent<C> {
        self.content
    }

    pub fn leaf(&self) -> Option<&C> {
        match &self.content {
            PanelContent::Leaf(content) => Some(content),
            PanelContent::Nested(_) => None,
        }
    }

    pub fn leaf_mut(&mut self) -> Option<&mut C> {
        match &mut self.content {
            PanelContent::Leaf(content) => Some(content),
            PanelContent::Nested(_) => None,
        }
    }

    pub fn as_nested(&self) -> Option<&NestedContainer<C>> {
        match &self.content {
            PanelContent::Nested(nested) => Some(nested),
            PanelContent::Leaf(_) => None,
        }
    }

    pub fn as_nested_mut(&mut self) -> Option<&mut NestedContainer<C>> {
        match &mut self.content {
            PanelContent::Nested(nested) => Some(nested),
            PanelContent::Leaf(_) => None,
        }
    }

    /// Container this panel is docked in, if any
    pub fn container_id(&self) -> Option<ContainerId> {
        self.host.as_ref().map(|host| host.container)
    }

    /// Close a panel that is not owned by any container. No event is
    /// emitted since nothing is listening; docked panels are closed
    /// through `Container::close_panel`.
    pub fn close(self) -> PanelContent<C> {
        self.content
    }

    pub(crate) fn emit_close(&self) {
        if let Some(host) = &self.host {
            host.scope.emit(PanelEvent::Close {
                container: host.container,
                panel: self.key,
                id: self.options.id.clone(),
            });
        }
    }

    pub(crate) fn attach(&mut self, container: ContainerId, scope: &EventScope) {
        if let PanelContent::Nested(nested) = &mut self.content {
            nested.set_parent_scope(Some(scope.clone()));
        }
        self.host = Some(Host {
            container,
            scope: scope.clone(),
        });
    }

    pub(crate) fn detach(&mut self) {
        if let PanelContent::Nested(nested) = &mut self.content {
            nested.set_parent_scope(None);
        }
        self.host = None;
    }
}

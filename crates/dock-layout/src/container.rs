// ABOUTME: Docking surface with five regions, panel management and edge resizing.
// ABOUTME: Persists region sizes after resize gestures and panel moves.

use std::sync::Arc;

use dock_core::{DockConfig, LayoutRecord, LayoutStore, Pixels, Region, RegionName, RegionSizes};
use tokio::sync::broadcast;

use crate::events::{ContainerId, EventScope, PanelEvent};
use crate::geometry::{LayoutFrame, Point, Rect};
use crate::nested::NestedContainer;
use crate::panel::{Panel, PanelContent, PanelKey, PanelOptions, PanelRef};
use crate::resize::{PointerEvent, PointerId, ResizeGesture, ResizeState};

/// A panel together with the region it is docked in
#[derive(Debug)]
pub struct RegionPanel<'a, C> {
    pub region: Region,
    pub panel: &'a Panel<C>,
}

#[derive(Debug)]
pub struct Container<C> {
    id: ContainerId,
    config: DockConfig,
    /// Indexed by `Region::index`; order within a region is stacking order
    regions: [Vec<Panel<C>>; 5],
    visible: [bool; 5],
    sizes: RegionSizes,
    resize: ResizeState,
    store: Option<Arc<dyn LayoutStore>>,
    storage_key: Option<String>,
    events: EventScope,
}

impl<C> Container<C> {
    /// Mount a container that persists its geometry under `config.storage_key`.
    /// Previously saved sizes are restored here.
    pub fn new(config: DockConfig, store: Arc<dyn LayoutStore>) -> Self {
        let key = config.storage_key.clone();
        Self::mount(config, Some(store), Some(key))
    }

    /// Mount a container whose geometry only lives for this session
    pub fn in_memory(config: DockConfig) -> Self {
        Self::mount(config, None, None)
    }

    fn mount(config: DockConfig, store: Option<Arc<dyn LayoutStore>>, storage_key: Option<String>) -> Self {
        let mut container = Self {
            id: ContainerId::next(),
            sizes: config.initial_sizes(),
            events: EventScope::new(config.event_capacity),
            config,
            regions: Default::default(),
            visible: [false; 5],
            resize: ResizeState::Idle,
            store,
            storage_key,
        };
        container.load_layout();
        tracing::debug!(
            "Mounted container {:?} (storage key: {:?})",
            container.id,
            container.storage_key
        );
        container
    }

    /// Inner container for a nested panel docked here. Persists under
    /// `"{key}/{id}"` when both this container and the nested panel have one.
    fn child(&self, nested_id: Option<&str>) -> Self {
        let key = match (&self.storage_key, nested_id) {
            (Some(parent), Some(id)) => Some(format!("{parent}/{id}")),
            _ => None,
        };
        let store = key.as_ref().and(self.store.clone());
        Self::mount(self.config.clone(), store, key)
    }

    pub fn id(&self) -> ContainerId {
        self.id
    }

    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    pub fn storage_key(&self) -> Option<&str> {
        self.storage_key.as_deref()
    }

    pub fn sizes(&self) -> &RegionSizes {
        &self.sizes
    }

    /// Declared size of an edge region; `None` for center
    pub fn size(&self, region: Region) -> Option<Pixels> {
        self.sizes.get(region)
    }

    pub fn events(&self) -> &EventScope {
        &self.events
    }

    /// Receive close/toggle/resized notifications from this container
    /// and everything nested inside it
    pub fn subscribe(&self) -> broadcast::Receiver<PanelEvent> {
        self.events.subscribe()
    }

    pub fn resize_state(&self) -> &ResizeState {
        &self.resize
    }

    pub fn is_region_visible(&self, region: Region) -> bool {
        self.visible[region.index()]
    }

    pub fn visible_regions(&self) -> Vec<Region> {
        Region::ALL
            .into_iter()
            .filter(|region| self.is_region_visible(*region))
            .collect()
    }

    /* Panel management */

    /// Wrap `content` in a panel and append it to `region`.
    /// An unknown region name is logged and nothing is added.
    pub fn add_panel(&mut self, content: C, region: impl RegionName, options: PanelOptions) -> Option<PanelKey> {
        let region = resolve_region(&region)?;
        Some(self.insert(region, Panel::new(content, options)))
    }

    /// Dock a nested container. Its inner container is created here,
    /// which fires its ready signal.
    pub fn add_nested(
        &mut self,
        nested: NestedContainer<C>,
        region: impl RegionName,
        options: PanelOptions,
    ) -> Option<PanelKey> {
        let region = resolve_region(&region)?;
        Some(self.insert(region, Panel::from_content(PanelContent::Nested(nested), options)))
    }

    /// Dock a panel that was built standalone or taken from another container
    pub fn dock_panel(&mut self, panel: Panel<C>, region: Region) -> PanelKey {
        self.insert(region, panel)
    }

    fn insert(&mut self, region: Region, mut panel: Panel<C>) -> PanelKey {
        let nested_id = panel.id().map(str::to_owned);
        if let Some(nested) = panel.as_nested_mut() {
            if !nested.is_ready() {
                nested.mount(self.child(nested_id.as_deref()));
            }
        }
        panel.attach(self.id, &self.events);

        let key = panel.key();
        self.regions[region.index()].push(panel);
        self.update_region_visibility();
        tracing::trace!("Added panel {:?} to {} in {:?}", key, region, self.id);
        key
    }

    /// Remove a panel by key or id. First match wins.
    pub fn remove_panel<'a>(&mut self, panel: impl Into<PanelRef<'a>>) -> bool {
        self.take_panel(panel).is_some()
    }

    /// Remove a panel and hand it back to the caller
    pub fn take_panel<'a>(&mut self, panel: impl Into<PanelRef<'a>>) -> Option<Panel<C>> {
        let panel = panel.into();
        let Some((region, index)) = self.locate(panel) else {
            tracing::debug!("No panel {:?} in {:?}", panel, self.id);
            return None;
        };
        let mut removed = self.regions[region.index()].remove(index);
        removed.detach();
        self.update_region_visibility();
        Some(removed)
    }

    pub fn get_panel_by_id(&self, id: &str) -> Option<&Panel<C>> {
        self.panel(id)
    }

    pub fn panel<'a>(&self, panel: impl Into<PanelRef<'a>>) -> Option<&Panel<C>> {
        let (region, index) = self.locate(panel.into())?;
        self.regions[region.index()].get(index)
    }

    pub fn panel_mut<'a>(&mut self, panel: impl Into<PanelRef<'a>>) -> Option<&mut Panel<C>> {
        let (region, index) = self.locate(panel.into())?;
        self.regions[region.index()].get_mut(index)
    }

    /// Region a panel is docked in
    pub fn region_of<'a>(&self, panel: impl Into<PanelRef<'a>>) -> Option<Region> {
        self.locate(panel.into()).map(|(region, _)| region)
    }

    fn locate(&self, panel: PanelRef<'_>) -> Option<(Region, usize)> {
        Region::ALL.into_iter().find_map(|region| {
            self.regions[region.index()]
                .iter()
                .position(|p| panel.matches(p))
                .map(|index| (region, index))
        })
    }

    /// Move a panel to the end of another region and save the layout.
    /// False when the region name is invalid or the panel is not here.
    pub fn move_panel<'a>(&mut self, panel: impl Into<PanelRef<'a>>, region: impl RegionName) -> bool {
        let Some(target) = resolve_region(&region) else {
            return false;
        };
        let Some((from, index)) = self.locate(panel.into()) else {
            return false;
        };

        let moved = self.regions[from.index()].remove(index);
        tracing::debug!("Moving panel {:?} from {} to {}", moved.key(), from, target);
        self.regions[target.index()].push(moved);
        self.update_region_visibility();
        self.save_layout();
        true
    }

    /// Hand a panel over to another container, docking it in `region` there.
    /// Both layouts are saved.
    pub fn transfer_panel<'a>(
        &mut self,
        panel: impl Into<PanelRef<'a>>,
        target: &mut Container<C>,
        region: impl RegionName,
    ) -> bool {
        let Some(region) = resolve_region(&region) else {
            return false;
        };
        let Some(panel) = self.take_panel(panel) else {
            return false;
        };
        target.insert(region, panel);
        self.save_layout();
        target.save_layout();
        true
    }

    /// Every panel, in region declaration order then insertion order
    pub fn panels(&self) -> Vec<RegionPanel<'_, C>> {
        Region::ALL
            .into_iter()
            .flat_map(|region| {
                self.regions[region.index()]
                    .iter()
                    .map(move |panel| RegionPanel { region, panel })
            })
            .collect()
    }

    /// Panels docked in one region. Empty for an unknown region name.
    pub fn panels_in(&self, region: impl RegionName) -> &[Panel<C>] {
        match resolve_region(&region) {
            Some(region) => &self.regions[region.index()],
            None => &[],
        }
    }

    pub fn panel_count(&self) -> usize {
        self.regions.iter().map(Vec::len).sum()
    }

    /// Remove every panel from every region
    pub fn clear_panels(&mut self) -> Vec<Panel<C>> {
        let mut removed = Vec::new();
        for region in Region::ALL {
            removed.extend(self.drain_region(region));
        }
        self.update_region_visibility();
        removed
    }

    /// Remove every panel from one region
    pub fn clear_region(&mut self, region: impl RegionName) -> Vec<Panel<C>> {
        let removed = match resolve_region(&region) {
            Some(region) => self.drain_region(region),
            None => Vec::new(),
        };
        self.update_region_visibility();
        removed
    }

    fn drain_region(&mut self, region: Region) -> Vec<Panel<C>> {
        let mut removed = std::mem::take(&mut self.regions[region.index()]);
        for panel in &mut removed {
            panel.detach();
        }
        removed
    }

    /* Panel affordances */

    /// Flip a panel's collapsed state. Returns the new state.
    pub fn toggle_collapse<'a>(&mut self, panel: impl Into<PanelRef<'a>>) -> Option<bool> {
        self.panel_mut(panel).map(Panel::toggle_collapse)
    }

    /// Returns whether the state changed, or `None` if the panel is not here
    pub fn set_collapsed<'a>(&mut self, panel: impl Into<PanelRef<'a>>, collapsed: bool) -> Option<bool> {
        self.panel_mut(panel).map(|p| p.set_collapsed(collapsed))
    }

    /// Fire the close affordance: announce, then remove.
    /// Panels created without `closable` have no close affordance.
    pub fn close_panel<'a>(&mut self, panel: impl Into<PanelRef<'a>>) -> Option<Panel<C>> {
        let panel = panel.into();
        let target = self.panel(panel)?;
        if !target.is_closable() {
            tracing::warn!("Panel {:?} is not closable", target.key());
            return None;
        }
        target.emit_close();
        self.take_panel(panel)
    }

    /* Resizing */

    /// Start a resize gesture on an edge's resizer.
    /// Refused for center, for hidden regions, and while another gesture is active.
    pub fn pointer_down(&mut self, edge: impl RegionName, pointer: PointerId, position: Point) -> bool {
        let Some(edge) = resolve_region(&edge) else {
            return false;
        };
        if !self.is_region_visible(edge) {
            tracing::debug!("Ignoring resize on hidden region {}", edge);
            return false;
        }
        let Some(start_size) = self.sizes.get(edge) else {
            return false;
        };
        let Some(gesture) = ResizeGesture::begin(edge, pointer, position, start_size) else {
            return false;
        };
        if !self.resize.begin(gesture) {
            tracing::debug!("Resize already active, ignoring pointer {:?}", pointer);
            return false;
        }
        tracing::trace!("Resize started on {} at {}", edge, start_size);
        true
    }

    /// Drive the active gesture. Only the pointer that started it counts.
    pub fn pointer_move(&mut self, pointer: PointerId, position: Point) -> Option<Pixels> {
        let gesture = self.resize.owned_by(pointer)?;
        let size = gesture.size_at(position, self.config.min_size, self.config.max_size);
        self.sizes.set(gesture.edge, size);
        self.events.emit(PanelEvent::Resized {
            container: self.id,
            region: gesture.edge,
            size,
        });
        Some(size)
    }

    /// Finish the gesture at its current size and save
    pub fn pointer_up(&mut self, pointer: PointerId) -> bool {
        self.end_resize(Some(pointer))
    }

    /// Losing capture finishes the gesture exactly like a pointer-up
    pub fn lost_pointer_capture(&mut self, pointer: PointerId) -> bool {
        self.end_resize(Some(pointer))
    }

    /// Finish whatever gesture is active, regardless of pointer
    pub fn cancel_resize(&mut self) -> bool {
        self.end_resize(None)
    }

    fn end_resize(&mut self, pointer: Option<PointerId>) -> bool {
        let Some(gesture) = self.resize.finish(pointer) else {
            return false;
        };
        tracing::debug!(
            "Resize of {} finished at {:?}",
            gesture.edge,
            self.sizes.get(gesture.edge)
        );
        self.save_layout();
        true
    }

    /// Route raw pointer input. A pointer-down is hit-tested against the
    /// resizers of the frame for `bounds`.
    pub fn handle_pointer(&mut self, bounds: Rect, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { pointer, position } => match self.layout(bounds).hit_resizer(position) {
                Some(edge) => self.pointer_down(edge, pointer, position),
                None => false,
            },
            PointerEvent::Move { pointer, position } => self.pointer_move(pointer, position).is_some(),
            PointerEvent::Up { pointer } => self.pointer_up(pointer),
            PointerEvent::CaptureLost { pointer } => self.lost_pointer_capture(pointer),
        }
    }

    /// Place visible regions and their resizers inside `bounds`
    pub fn layout(&self, bounds: Rect) -> LayoutFrame {
        LayoutFrame::compute(
            bounds,
            &self.sizes,
            |region| self.is_region_visible(region),
            self.config.resizer_thickness,
        )
    }

    /* Persistence */

    /// Snapshot of what gets written to the store
    pub fn layout_record(&self) -> LayoutRecord {
        let mut record = LayoutRecord::new(&self.sizes);
        for region in Region::ALL {
            record.set_region_ids(region, self.regions[region.index()].iter().map(Panel::id));
        }
        record
    }

    /// Write the current geometry. Failures are logged and the layout
    /// keeps working in memory. Returns whether anything was written.
    pub fn save_layout(&self) -> bool {
        let (Some(store), Some(key)) = (&self.store, &self.storage_key) else {
            return false;
        };
        match self.layout_record().save(store.as_ref(), key) {
            Ok(()) => {
                tracing::trace!("Saved layout under {}", key);
                true
            }
            Err(e) => {
                tracing::error!("Error saving panel configuration: {}", e);
                false
            }
        }
    }

    fn load_layout(&mut self) {
        let (Some(store), Some(key)) = (&self.store, &self.storage_key) else {
            return;
        };
        match LayoutRecord::load(store.as_ref(), key) {
            Ok(Some(record)) => {
                let applied = self
                    .sizes
                    .merge(&record.sizes, self.config.min_size, self.config.max_size);
                tracing::debug!("Restored {} region sizes from {}", applied, key);
            }
            Ok(None) => tracing::debug!("No saved layout under {}", key),
            Err(e) => tracing::error!("Error loading panel configuration: {}", e),
        }
    }

    fn update_region_visibility(&mut self) {
        for region in Region::ALL {
            let visible = !self.regions[region.index()].is_empty();
            if self.visible[region.index()] != visible {
                tracing::trace!(
                    "Region {} {} in {:?}",
                    region,
                    if visible { "shown" } else { "hidden" },
                    self.id
                );
                self.visible[region.index()] = visible;
            }
        }
    }
}

fn resolve_region(region: &impl RegionName) -> Option<Region> {
    match region.to_region() {
        Ok(region) => Some(region),
        Err(e) => {
            tracing::error!("{}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dock_core::{MemoryStore, StoreError};

    const MOUSE: PointerId = PointerId(1);
    const BOUNDS: Rect = Rect::new(0.0, 0.0, 1200.0, 800.0);

    fn container() -> Container<&'static str> {
        Container::in_memory(DockConfig::default())
    }

    fn persisted(store: &MemoryStore) -> Container<&'static str> {
        Container::new(DockConfig::default(), Arc::new(store.clone()))
    }

    fn counts(container: &Container<&'static str>) -> Vec<usize> {
        Region::ALL
            .iter()
            .map(|r| container.panels_in(*r).len())
            .collect()
    }

    #[test]
    fn add_to_every_region() {
        for region in Region::ALL {
            let mut c = container();
            let key = c.add_panel("body", region, PanelOptions::new()).unwrap();

            let panels = c.panels_in(region);
            assert_eq!(panels.len(), 1);
            assert_eq!(panels[0].key(), key);
            assert!(c.is_region_visible(region));
            assert!(c.layout(BOUNDS).region(region).is_some());
        }
    }

    #[test]
    fn add_to_invalid_region_is_a_noop() {
        let mut c = container();
        c.add_panel("a", "left", PanelOptions::new());
        let before = counts(&c);

        assert!(c.add_panel("b", "sidebar", PanelOptions::new()).is_none());

        assert_eq!(counts(&c), before);
        assert!(c.panels_in("sidebar").is_empty());
    }

    #[test]
    fn remove_unknown_id_returns_false() {
        let mut c = container();
        c.add_panel("a", Region::Top, PanelOptions::new().id("nav"));

        assert!(!c.remove_panel("missing"));
        assert_eq!(c.panel_count(), 1);
        assert!(c.remove_panel("nav"));
        assert_eq!(c.panel_count(), 0);
        assert!(!c.is_region_visible(Region::Top));
    }

    #[test]
    fn remove_first_match_when_ids_collide() {
        let mut c = container();
        let first = c.add_panel("first", Region::Right, PanelOptions::new().id("dup")).unwrap();
        let second = c.add_panel("second", Region::Top, PanelOptions::new().id("dup")).unwrap();

        let taken = c.take_panel("dup").unwrap();

        // Top is scanned before right
        assert_eq!(taken.key(), second);
        assert_eq!(c.get_panel_by_id("dup").unwrap().key(), first);
        assert_eq!(taken.container_id(), None);
    }

    #[test]
    fn sizes_survive_a_fresh_container() {
        let store = MemoryStore::new();
        let mut sizes = RegionSizes::default();
        sizes.top = Pixels(150.0);
        sizes.left = Pixels(250.0);
        LayoutRecord::new(&sizes)
            .save(&store, DockConfig::DEFAULT_STORAGE_KEY)
            .unwrap();

        let c = persisted(&store);

        assert_eq!(c.sizes(), &sizes);
        assert_eq!(c.size(Region::Center), None);
    }

    #[test]
    fn resize_roundtrip_through_store() {
        let store = MemoryStore::new();
        let mut c = persisted(&store);
        c.add_panel("tree", Region::Left, PanelOptions::new());

        assert!(c.pointer_down(Region::Left, MOUSE, Point::new(200.0, 300.0)));
        c.pointer_move(MOUSE, Point::new(250.0, 300.0));
        assert!(c.pointer_up(MOUSE));

        let reloaded = persisted(&store);
        assert_eq!(reloaded.size(Region::Left), Some(Pixels(250.0)));
        assert_eq!(reloaded.size(Region::Top), Some(Pixels(200.0)));
    }

    #[test]
    fn corrupt_saved_layout_falls_back_to_defaults() {
        let store = MemoryStore::new();
        store.set(DockConfig::DEFAULT_STORAGE_KEY, "{\"sizes\":").unwrap();

        let c = persisted(&store);

        assert_eq!(c.sizes(), &RegionSizes::default());
    }

    #[test]
    fn loaded_sizes_are_clamped() {
        let store = MemoryStore::new();
        store
            .set(DockConfig::DEFAULT_STORAGE_KEY, r#"{"sizes":{"bottom":"12px","right":20}}"#)
            .unwrap();

        let c = persisted(&store);

        assert_eq!(c.size(Region::Bottom), Some(Pixels(50.0)));
        assert_eq!(c.size(Region::Right), Some(Pixels(50.0)));
    }

    #[test]
    fn out_of_range_saved_size_does_not_poison_the_record() {
        let store = MemoryStore::new();
        store
            .set(DockConfig::DEFAULT_STORAGE_KEY, r#"{"sizes":{"top":"150px","left":1e39}}"#)
            .unwrap();

        let c = persisted(&store);
        assert_eq!(c.size(Region::Top), Some(Pixels(150.0)));
        assert_eq!(c.size(Region::Left), Some(Pixels(200.0)));
        assert!(c.save_layout());

        let reloaded = persisted(&store);
        assert_eq!(reloaded.size(Region::Top), Some(Pixels(150.0)));
        assert_eq!(reloaded.size(Region::Left), Some(Pixels(200.0)));
    }

    #[test]
    fn drag_below_floor_clamps_to_minimum() {
        let mut c = container();
        c.add_panel("tree", Region::Left, PanelOptions::new());
        let mut events = c.subscribe();

        c.pointer_down(Region::Left, MOUSE, Point::new(200.0, 100.0));
        let size = c.pointer_move(MOUSE, Point::new(-300.0, 100.0));

        assert_eq!(size, Some(Pixels(50.0)));
        assert_eq!(c.size(Region::Left), Some(Pixels(50.0)));
        assert_eq!(
            events.try_recv().unwrap(),
            PanelEvent::Resized {
                container: c.id(),
                region: Region::Left,
                size: Pixels(50.0),
            }
        );

        let grown = c.pointer_move(MOUSE, Point::new(3000.0, 100.0));
        assert_eq!(grown, Some(Pixels(3000.0)));
    }

    #[test]
    fn configured_ceiling_caps_growth() {
        let mut c: Container<&str> = Container::in_memory(DockConfig {
            max_size: Some(400.0),
            ..DockConfig::default()
        });
        c.add_panel("console", Region::Bottom, PanelOptions::new());

        c.pointer_down(Region::Bottom, MOUSE, Point::new(0.0, 600.0));

        assert_eq!(c.pointer_move(MOUSE, Point::new(0.0, 0.0)), Some(Pixels(400.0)));
    }

    #[test]
    fn every_move_emits_resized() {
        let mut c = container();
        c.add_panel("props", Region::Right, PanelOptions::new());
        let mut events = c.subscribe();

        c.pointer_down(Region::Right, MOUSE, Point::new(1000.0, 0.0));
        for x in [990.0, 980.0, 970.0] {
            c.pointer_move(MOUSE, Point::new(x, 0.0));
        }

        let mut sizes = Vec::new();
        while let Ok(PanelEvent::Resized { size, .. }) = events.try_recv() {
            sizes.push(size);
        }
        assert_eq!(sizes, vec![Pixels(210.0), Pixels(220.0), Pixels(230.0)]);
    }

    #[test]
    fn resize_refused_for_center_and_hidden_regions() {
        let mut c = container();
        c.add_panel("doc", Region::Center, PanelOptions::new());

        assert!(!c.pointer_down(Region::Center, MOUSE, Point::default()));
        assert!(!c.pointer_down(Region::Left, MOUSE, Point::default()));
        assert!(!c.pointer_down("gutter", MOUSE, Point::default()));
        assert!(!c.resize_state().is_active());
    }

    #[test]
    fn second_pointer_cannot_hijack_gesture() {
        let mut c = container();
        c.add_panel("tree", Region::Left, PanelOptions::new());
        c.add_panel("nav", Region::Top, PanelOptions::new());
        let stylus = PointerId(2);

        assert!(c.pointer_down(Region::Left, MOUSE, Point::new(200.0, 300.0)));
        assert!(!c.pointer_down(Region::Top, stylus, Point::new(10.0, 200.0)));
        assert_eq!(c.pointer_move(stylus, Point::new(400.0, 300.0)), None);
        assert!(!c.pointer_up(stylus));

        assert_eq!(c.pointer_move(MOUSE, Point::new(230.0, 300.0)), Some(Pixels(230.0)));
        assert_eq!(c.resize_state().active_edge(), Some(Region::Left));
        assert_eq!(c.resize_state().gesture().unwrap().start_pos, 200.0);
    }

    #[test]
    fn capture_loss_finishes_like_pointer_up() {
        let store = MemoryStore::new();
        let mut c = persisted(&store);
        c.add_panel("tree", Region::Left, PanelOptions::new());

        c.pointer_down(Region::Left, MOUSE, Point::new(200.0, 0.0));
        c.pointer_move(MOUSE, Point::new(180.0, 0.0));
        let writes = store.writes();

        assert!(c.lost_pointer_capture(MOUSE));
        assert!(!c.resize_state().is_active());
        assert_eq!(store.writes(), writes + 1);
        assert_eq!(persisted(&store).size(Region::Left), Some(Pixels(180.0)));
        assert_eq!(c.pointer_move(MOUSE, Point::new(400.0, 0.0)), None);
    }

    #[test]
    fn cancel_resize_finalizes_any_pointer() {
        let mut c = container();
        c.add_panel("nav", Region::Top, PanelOptions::new());
        c.pointer_down(Region::Top, PointerId(7), Point::new(0.0, 200.0));

        assert!(c.cancel_resize());
        assert!(!c.cancel_resize());
    }

    #[test]
    fn handle_pointer_hit_tests_resizers() {
        let mut c = container();
        c.add_panel("tree", Region::Left, PanelOptions::new());
        c.add_panel("doc", Region::Center, PanelOptions::new());

        // Inside center, away from any resizer
        assert!(!c.handle_pointer(BOUNDS, PointerEvent::Down { pointer: MOUSE, position: Point::new(600.0, 400.0) }));

        let on_edge = Point::new(201.0, 400.0);
        assert!(c.handle_pointer(BOUNDS, PointerEvent::Down { pointer: MOUSE, position: on_edge }));
        assert!(c.handle_pointer(BOUNDS, PointerEvent::Move { pointer: MOUSE, position: Point::new(321.0, 400.0) }));
        assert!(c.handle_pointer(BOUNDS, PointerEvent::Up { pointer: MOUSE }));
        assert_eq!(c.size(Region::Left), Some(Pixels(320.0)));
    }

    #[test]
    fn move_panel_between_regions_saves() {
        let store = MemoryStore::new();
        let mut c = persisted(&store);
        let key = c.add_panel("outline", Region::Left, PanelOptions::new().id("outline")).unwrap();
        let writes = store.writes();

        assert!(c.move_panel(key, Region::Right));

        assert!(c.panels_in(Region::Left).is_empty());
        assert_eq!(c.panels_in(Region::Right).len(), 1);
        assert_eq!(c.panels_in(Region::Right)[0].key(), key);
        assert_eq!(store.writes(), writes + 1);
        assert!(!c.is_region_visible(Region::Left));
        assert!(c.is_region_visible(Region::Right));

        let saved = LayoutRecord::load(&store, DockConfig::DEFAULT_STORAGE_KEY)
            .unwrap()
            .unwrap();
        assert_eq!(saved.region_ids(Region::Right), &["outline".to_string()]);
        assert!(saved.region_ids(Region::Left).is_empty());
    }

    #[test]
    fn move_panel_rejects_bad_region_and_unknown_panel() {
        let mut c = container();
        c.add_panel("a", Region::Left, PanelOptions::new().id("a"));

        assert!(!c.move_panel("a", "diagonal"));
        assert!(!c.move_panel("b", Region::Right));
        assert_eq!(c.region_of("a"), Some(Region::Left));
    }

    #[test]
    fn move_within_region_goes_to_end() {
        let mut c = container();
        let a = c.add_panel("a", Region::Bottom, PanelOptions::new()).unwrap();
        let b = c.add_panel("b", Region::Bottom, PanelOptions::new()).unwrap();

        c.move_panel(a, Region::Bottom);

        let order: Vec<_> = c.panels_in(Region::Bottom).iter().map(Panel::key).collect();
        assert_eq!(order, vec![b, a]);
    }

    #[test]
    fn transfer_moves_ownership() {
        let mut left = container();
        let mut right = container();
        let key = left.add_panel("log", Region::Bottom, PanelOptions::new()).unwrap();

        assert!(left.transfer_panel(key, &mut right, Region::Center));

        assert_eq!(left.panel_count(), 0);
        assert_eq!(right.panel(key).unwrap().container_id(), Some(right.id()));
        assert_eq!(right.region_of(key), Some(Region::Center));
    }

    #[test]
    fn taken_panel_docks_elsewhere_with_new_scope() {
        let mut first = container();
        let mut second = container();
        let mut at_first = first.subscribe();
        let mut at_second = second.subscribe();
        let key = first
            .add_panel("log", Region::Bottom, PanelOptions::new().id("log").collapsible(true))
            .unwrap();

        let panel = first.take_panel(key).unwrap();
        assert_eq!(second.dock_panel(panel, Region::Left), key);

        assert_eq!(second.region_of("log"), Some(Region::Left));
        assert!(second.is_region_visible(Region::Left));
        assert!(!first.is_region_visible(Region::Bottom));
        assert_eq!(second.panel(key).unwrap().container_id(), Some(second.id()));

        second.toggle_collapse(key);
        assert!(at_first.try_recv().is_err());
        assert_eq!(
            at_second.try_recv().unwrap(),
            PanelEvent::Toggle {
                container: second.id(),
                panel: key,
                id: Some("log".to_string()),
                collapsed: true,
            }
        );
    }

    #[test]
    fn closing_a_taken_panel_is_silent() {
        let mut c = container();
        let key = c.add_panel("find", Region::Bottom, PanelOptions::new().closable(true)).unwrap();
        let mut events = c.subscribe();

        let panel = c.take_panel(key).unwrap();
        assert!(matches!(panel.close(), PanelContent::Leaf("find")));

        assert!(events.try_recv().is_err());
    }

    #[test]
    fn retitled_panel_gains_header() {
        let mut c = container();
        let key = c.add_panel("log", Region::Bottom, PanelOptions::new()).unwrap();
        assert!(!c.panel(key).unwrap().has_header());

        c.panel_mut(key).unwrap().set_title("Log");

        assert_eq!(c.panel(key).unwrap().title(), Some("Log"));
        assert!(c.panel(key).unwrap().has_header());
    }

    #[test]
    fn visibility_tracks_occupancy_per_region() {
        for region in Region::ALL {
            let mut c = container();
            assert!(!c.is_region_visible(region));

            let a = c.add_panel("a", region, PanelOptions::new()).unwrap();
            let b = c.add_panel("b", region, PanelOptions::new()).unwrap();
            assert_eq!(c.visible_regions(), vec![region]);

            c.remove_panel(a);
            assert!(c.is_region_visible(region));
            c.remove_panel(b);
            assert!(!c.is_region_visible(region));
            assert!(c.layout(BOUNDS).region(region).is_none());
        }
    }

    #[test]
    fn panels_report_in_declaration_order() {
        let mut c = container();
        let a = c.add_panel("A", "top", PanelOptions::new().title("Nav")).unwrap();
        let b = c.add_panel("B", "center", PanelOptions::new()).unwrap();
        let cc = c
            .add_panel("C", "left", PanelOptions::new().title("Tree").collapsible(true))
            .unwrap();

        let all: Vec<_> = c.panels().iter().map(|rp| (rp.region, rp.panel.key())).collect();
        assert_eq!(
            all,
            vec![(Region::Top, a), (Region::Left, cc), (Region::Center, b)]
        );

        assert_eq!(c.toggle_collapse(cc), Some(true));
        assert!(!c.panel(cc).unwrap().is_body_visible());
        assert!(c.panel(cc).unwrap().has_header());
        assert!(c.panel(a).unwrap().is_body_visible());
        assert!(c.panel(b).unwrap().is_body_visible());
        assert_eq!(c.panel_count(), 3);
        assert_eq!(c.size(Region::Left), Some(Pixels(200.0)));
    }

    #[test]
    fn clear_region_and_all() {
        let mut c = container();
        c.add_panel("a", Region::Left, PanelOptions::new());
        c.add_panel("b", Region::Left, PanelOptions::new());
        c.add_panel("c", Region::Right, PanelOptions::new());

        let cleared = c.clear_region(Region::Left);
        assert_eq!(cleared.len(), 2);
        assert!(!c.is_region_visible(Region::Left));
        assert!(c.clear_region("nowhere").is_empty());

        let rest = c.clear_panels();
        assert_eq!(rest.len(), 1);
        assert!(c.visible_regions().is_empty());
    }

    #[test]
    fn close_announces_then_removes() {
        let mut c = container();
        let key = c
            .add_panel("find", Region::Bottom, PanelOptions::new().id("find").closable(true))
            .unwrap();
        let fixed = c.add_panel("status", Region::Bottom, PanelOptions::new()).unwrap();
        let mut events = c.subscribe();

        let closed = c.close_panel("find").unwrap();

        assert_eq!(closed.key(), key);
        assert_eq!(
            events.try_recv().unwrap(),
            PanelEvent::Close {
                container: c.id(),
                panel: key,
                id: Some("find".to_string()),
            }
        );
        assert!(c.close_panel(fixed).is_none());
        assert_eq!(c.panel_count(), 1);
    }

    #[test]
    fn toggle_emits_with_state() {
        let mut c = container();
        let key = c.add_panel("tree", Region::Left, PanelOptions::new().collapsible(true)).unwrap();
        let mut events = c.subscribe();

        c.set_collapsed(key, true);
        c.set_collapsed(key, true);
        c.toggle_collapse(key);

        let states: Vec<bool> = std::iter::from_fn(|| events.try_recv().ok())
            .filter_map(|e| match e {
                PanelEvent::Toggle { collapsed, .. } => Some(collapsed),
                _ => None,
            })
            .collect();
        assert_eq!(states, vec![true, false]);
    }

    #[test]
    fn write_failure_keeps_layout_in_memory() {
        let store = MemoryStore::with_quota(8);
        let mut c = persisted(&store);
        c.add_panel("tree", Region::Left, PanelOptions::new());

        c.pointer_down(Region::Left, MOUSE, Point::new(200.0, 0.0));
        c.pointer_move(MOUSE, Point::new(260.0, 0.0));
        assert!(c.pointer_up(MOUSE));

        assert!(!c.save_layout());
        assert_eq!(store.writes(), 0);
        assert_eq!(c.size(Region::Left), Some(Pixels(260.0)));
        assert!(matches!(
            store.set("x", "too long for the quota"),
            Err(StoreError::QuotaExceeded { .. })
        ));
    }

    #[test]
    fn in_memory_container_never_writes() {
        let c = container();
        assert!(!c.save_layout());
        assert_eq!(c.storage_key(), None);
    }
}

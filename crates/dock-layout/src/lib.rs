// ABOUTME: Panel docking layout for the desktop shell.
// ABOUTME: Containers slot panels into five regions with resizable edges.

mod container;
mod events;
mod geometry;
mod nested;
mod panel;
mod resize;

pub use container::{Container, RegionPanel};
pub use events::{ContainerId, EventScope, PanelEvent};
pub use geometry::{LayoutFrame, Point, Rect};
pub use nested::{NestedContainer, ReadySignal};
pub use panel::{Panel, PanelContent, PanelKey, PanelOptions, PanelRef};
pub use resize::{PointerEvent, PointerId, ResizeGesture, ResizeState};

pub use dock_core::{Pixels, Region, RegionName, RegionSizes};

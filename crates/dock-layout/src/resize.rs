// ABOUTME: Resize gesture state machine for edge regions.
// ABOUTME: Tracks the pointer that owns a drag and maps its travel to a clamped size.

use dock_core::{Pixels, Region};

use crate::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub u32);

/// Pointer input as a host toolkit would deliver it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { pointer: PointerId, position: Point },
    Move { pointer: PointerId, position: Point },
    Up { pointer: PointerId },
    /// The host took capture away (focus loss, window switch, ...)
    CaptureLost { pointer: PointerId },
}

/// Everything captured at pointer-down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeGesture {
    pub edge: Region,
    pub pointer: PointerId,
    /// Pointer coordinate along the edge's axis at pointer-down
    pub start_pos: f32,
    pub start_size: Pixels,
}

impl ResizeGesture {
    /// `None` for center, which has no resizer
    pub fn begin(edge: Region, pointer: PointerId, position: Point, start_size: Pixels) -> Option<Self> {
        let axis = edge.axis()?;
        Some(Self {
            edge,
            pointer,
            start_pos: position.along(axis),
            start_size,
        })
    }

    /// Size the edge should take with the pointer at `position`.
    ///
    /// Top and left grow as the pointer moves away from center, bottom and
    /// right as it moves toward it.
    pub fn size_at(&self, position: Point, min: f32, max: Option<f32>) -> Pixels {
        let Some(axis) = self.edge.axis() else {
            return self.start_size;
        };
        let delta = position.along(axis) - self.start_pos;
        Pixels(self.start_size.get() + self.edge.drag_sign() * delta).clamp(min, max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ResizeState {
    #[default]
    Idle,
    Active(ResizeGesture),
}

impl ResizeState {
    pub fn is_active(&self) -> bool {
        matches!(self, ResizeState::Active(_))
    }

    pub fn gesture(&self) -> Option<&ResizeGesture> {
        match self {
            ResizeState::Active(gesture) => Some(gesture),
            ResizeState::Idle => None,
        }
    }

    pub fn active_edge(&self) -> Option<Region> {
        self.gesture().map(|gesture| gesture.edge)
    }

    /// Only one gesture at a time; a second begin is refused untouched
    pub(crate) fn begin(&mut self, gesture: ResizeGesture) -> bool {
        if self.is_active() {
            return false;
        }
        *self = ResizeState::Active(gesture);
        true
    }

    /// The active gesture, if `pointer` is the one driving it
    pub(crate) fn owned_by(&self, pointer: PointerId) -> Option<ResizeGesture> {
        self.gesture()
            .filter(|gesture| gesture.pointer == pointer)
            .copied()
    }

    /// Return to idle. With `Some(pointer)` only that pointer may end the gesture.
    pub(crate) fn finish(&mut self, pointer: Option<PointerId>) -> Option<ResizeGesture> {
        let gesture = *self.gesture()?;
        if pointer.is_some_and(|p| p != gesture.pointer) {
            return None;
        }
        *self = ResizeState::Idle;
        Some(gesture)
    }
}

//! Per-gesture bookkeeping, kept apart from the persistent state

use super::{PointerId, VelocityTracker};

/// A pointer currently holding the panel
#[derive(Debug, Clone, Default)]
pub struct DragCapture {
    pub pointer: PointerId,
    pub start_y: i32,
    pub last_y: i32,
    /// Set once the pointer has moved past the touch slop, or at once when the
    /// capture stopped a settle
    pub dragging: bool,
    pub tracker: VelocityTracker,
}

/// Flags that live for one touch or nested-scroll stream
#[derive(Debug, Clone, Default)]
pub struct GestureSession {
    /// A nested scroll has moved the panel during the current scroll stream
    pub nested_scrolled: bool,
    /// The current touch began on the scrolling descendant
    pub touching_scrolling_child: bool,
    /// The current touch began outside the panel
    pub ignore_events: bool,
    pub active_pointer: Option<PointerId>,
    pub capture: Option<DragCapture>,
}

impl GestureSession {
    /// Forget everything tied to the current touch stream
    pub fn end_touch(&mut self) {
        self.touching_scrolling_child = false;
        self.ignore_events = false;
        self.active_pointer = None;
        self.capture = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.capture.as_ref().is_some_and(|capture| capture.dragging)
    }
}

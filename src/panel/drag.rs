//! Direct drag handling
//!
//! A touch stream captures the panel, moves it vertically within its drag
//! range, and on release optionally settles it to a resting state.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{DragCapture, PanelState, TabBehavior, VelocityTracker, HIDE_FRICTION, HIDE_THRESHOLD};
use crate::commands::Cmd;
use crate::host::{ViewId, ViewTree};

/// Identifies one pointer within a touch stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PointerId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchAction {
    Down,
    Move,
    Up,
    Cancel,
}

/// A raw pointer event in parent coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub action: TouchAction,
    pub pointer: PointerId,
    pub x: i32,
    pub y: i32,
    pub at: Instant,
}

impl TouchEvent {
    pub fn new(action: TouchAction, x: i32, y: i32, at: Instant) -> Self {
        Self {
            action,
            pointer: PointerId::default(),
            x,
            y,
            at,
        }
    }
}

impl TabBehavior {
    /// Feed one touch event; returns a settle command when a release settles
    pub fn on_touch_event(&mut self, tree: &mut ViewTree, event: TouchEvent) -> Option<Cmd> {
        let panel = self.attached_panel(tree)?;
        match event.action {
            TouchAction::Down => {
                self.on_touch_down(tree, panel, event);
                None
            }
            TouchAction::Move => self.on_touch_move(tree, panel, event),
            TouchAction::Up => {
                let cmd = self.on_touch_up(tree, panel, event);
                self.gesture.end_touch();
                cmd
            }
            TouchAction::Cancel => {
                self.gesture.end_touch();
                None
            }
        }
    }

    fn on_touch_down(&mut self, tree: &ViewTree, panel: ViewId, event: TouchEvent) {
        self.gesture.end_touch();
        self.gesture.active_pointer = Some(event.pointer);
        self.gesture.touching_scrolling_child = self
            .attached_scrolling_child(tree)
            .is_some_and(|scroll| tree.contains_point(scroll, event.x, event.y));
        self.gesture.ignore_events = !tree.contains_point(panel, event.x, event.y);
        if self.gesture.ignore_events {
            return;
        }

        if self.try_capture(tree, event.pointer) {
            // Grabbing the panel supersedes any settle in flight. The panel is
            // held mid-motion, so it is dragging from this point on and skips
            // the slop.
            let grabbed_mid_settle = match self.settler.cancel() {
                Some(run) => {
                    debug!(target: "drag", token = run.token.0, "capture cancelled settle");
                    true
                }
                None => false,
            };
            let mut tracker = VelocityTracker::new();
            tracker.record(0, event.at);
            self.gesture.capture = Some(DragCapture {
                pointer: event.pointer,
                start_y: event.y,
                last_y: event.y,
                dragging: grabbed_mid_settle,
                tracker,
            });
            if grabbed_mid_settle {
                self.set_state_internal(tree, PanelState::Dragging);
            }
            debug!(target: "drag", pointer = event.pointer.0, y = event.y, "captured");
        }
    }

    /// Whether a new touch may take hold of the panel
    ///
    /// Refused while already dragging, while the touch sits on the scrolling
    /// descendant or a nested scroll is moving the panel, and while expanded
    /// with content that can still scroll back.
    pub fn try_capture(&self, tree: &ViewTree, pointer: PointerId) -> bool {
        if self.state() == PanelState::Dragging {
            return false;
        }
        if self.gesture.touching_scrolling_child || self.gesture.nested_scrolled {
            return false;
        }
        if self.state() == PanelState::Expanded && self.gesture.active_pointer == Some(pointer) {
            let content_scrolled = self
                .attached_scrolling_child(tree)
                .is_some_and(|scroll| tree.can_scroll_vertically(scroll, -1));
            if content_scrolled {
                return false;
            }
        }
        self.attached_panel(tree).is_some()
    }

    fn on_touch_move(&mut self, tree: &mut ViewTree, panel: ViewId, event: TouchEvent) -> Option<Cmd> {
        if self.gesture.ignore_events {
            return None;
        }
        let slop = self.config.touch_slop;
        let capture = self
            .gesture
            .capture
            .as_mut()
            .filter(|capture| capture.pointer == event.pointer)?;

        capture.tracker.record(event.y - capture.last_y, event.at);

        if !capture.dragging {
            if (event.y - capture.start_y).abs() <= slop {
                capture.last_y = event.y;
                return None;
            }
            capture.dragging = true;
            // The first drag step covers the distance travelled inside the slop
            capture.last_y = capture.start_y;
            self.set_state_internal(tree, PanelState::Dragging);
        }

        let capture = self.gesture.capture.as_mut()?;
        let dy = event.y - capture.last_y;
        capture.last_y = event.y;

        let current_top = tree.top(panel)?;
        let new_top = self.geometry.clamp_top(current_top + dy, self.config.hideable);
        if new_top == current_top {
            return None;
        }
        // Horizontal position is pinned; only the top moves
        tree.set_top(panel, new_top);
        self.dispatch_on_slide(tree, new_top);
        trace!(target: "drag", dy, top = new_top, "drag move");
        Some(Cmd::Redraw)
    }

    fn on_touch_up(&mut self, tree: &mut ViewTree, panel: ViewId, event: TouchEvent) -> Option<Cmd> {
        let capture = self
            .gesture
            .capture
            .as_mut()
            .filter(|capture| capture.pointer == event.pointer && capture.dragging)?;
        capture.tracker.record(event.y - capture.last_y, event.at);
        let velocity = capture.tracker.velocity();
        self.on_view_released(tree, panel, velocity)
    }

    /// Decide what happens after the pointer lets go of a dragged panel
    ///
    /// With `settle_on_release` off the panel stays where it was released.
    fn on_view_released(&mut self, tree: &mut ViewTree, panel: ViewId, velocity_y: f32) -> Option<Cmd> {
        let current_top = tree.top(panel)?;
        if !self.config.settle_on_release {
            debug!(target: "drag", top = current_top, velocity_y, "released without settling");
            return None;
        }

        let (top, state) = self.release_target(current_top, velocity_y);
        debug!(target: "drag", from = current_top, to = top, %state, velocity_y, "released");
        match self.settler.start(panel, current_top, top, state) {
            Some(token) => Some(Cmd::ScheduleSettle { panel, token }),
            None => {
                self.set_state_internal(tree, state);
                Some(Cmd::Redraw)
            }
        }
    }

    /// Resting offset and state for a release at `top` with `velocity_y`
    ///
    /// Positive velocity moves down. Upward flings expand, fast enough downward
    /// releases past the collapsed line hide (when hideable), slow releases go
    /// to the nearer of expanded and collapsed, and everything else collapses.
    /// A non-collapsible panel lands on the anchor instead of collapsing.
    pub fn release_target(&self, top: i32, velocity_y: f32) -> (i32, PanelState) {
        let geometry = &self.geometry;
        let min_velocity = self.config.minimum_fling_velocity;

        let (mut target_top, mut state) = if velocity_y < -min_velocity {
            (geometry.min_offset, PanelState::Expanded)
        } else if self.config.hideable && self.should_hide(top, velocity_y) {
            (geometry.parent_height, PanelState::Hidden)
        } else if velocity_y.abs() <= min_velocity {
            if (top - geometry.min_offset).abs() < (top - geometry.max_offset).abs() {
                (geometry.min_offset, PanelState::Expanded)
            } else {
                (geometry.max_offset, PanelState::Collapsed)
            }
        } else {
            (geometry.max_offset, PanelState::Collapsed)
        };

        if !self.config.collapsible && state == PanelState::Collapsed {
            target_top = geometry.anchor_point;
            state = PanelState::AnchorPoint;
        }
        (target_top, state)
    }

    fn should_hide(&self, top: i32, velocity_y: f32) -> bool {
        let max_offset = self.geometry.max_offset;
        if top < max_offset {
            return false;
        }
        let projected = top as f32 + velocity_y * HIDE_FRICTION;
        let peek = self.config.peek_height;
        if peek <= 0 {
            return projected > max_offset as f32;
        }
        (projected - max_offset as f32).abs() / peek as f32 > HIDE_THRESHOLD
    }
}

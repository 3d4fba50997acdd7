//! Vertical reference offsets for the panel
//!
//! All offsets are top positions in parent coordinates; a smaller value means
//! the panel is higher on screen.

use super::PanelState;

/// Derived offsets, recomputed on every layout pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    /// Top position when expanded
    pub min_offset: i32,
    /// Top position when collapsed (never above `min_offset`)
    pub max_offset: i32,
    /// Top position when resting at the anchor
    pub anchor_point: i32,
    /// Height of the host container
    pub parent_height: i32,
}

impl Geometry {
    pub fn compute(parent_height: i32, panel_height: i32, peek_height: i32, anchor_point: i32) -> Self {
        let min_offset = (parent_height - panel_height).max(0);
        let max_offset = (parent_height - peek_height).max(min_offset);
        Self {
            min_offset,
            max_offset,
            anchor_point,
            parent_height,
        }
    }

    /// Recompute `max_offset` after the peek height changed
    pub fn with_peek_height(mut self, peek_height: i32) -> Self {
        self.max_offset = (self.parent_height - peek_height).max(self.min_offset);
        self
    }

    /// Top offset a panel resting in `state` occupies
    ///
    /// `Dragging` has no resting offset, and `Hidden` only has one when the
    /// panel is hideable.
    pub fn top_for_state(&self, state: PanelState, hideable: bool) -> Option<i32> {
        match state {
            PanelState::AnchorPoint | PanelState::Blocked => Some(self.anchor_point),
            PanelState::Expanded => Some(self.min_offset),
            PanelState::Collapsed => Some(self.max_offset),
            PanelState::Hidden if hideable => Some(self.parent_height),
            PanelState::Hidden | PanelState::Dragging => None,
        }
    }

    /// Lowest top a drag may reach
    pub fn drag_limit(&self, hideable: bool) -> i32 {
        if hideable {
            self.parent_height
        } else {
            self.max_offset
        }
    }

    /// Vertical range reported to the drag helper
    pub fn vertical_drag_range(&self, hideable: bool) -> i32 {
        self.drag_limit(hideable) - self.min_offset
    }

    /// Clamp a proposed drag position into `[min_offset, drag_limit]`
    pub fn clamp_top(&self, top: i32, hideable: bool) -> i32 {
        top.clamp(self.min_offset, self.drag_limit(hideable).max(self.min_offset))
    }

    /// Slide offset reported to listeners for a panel at `top`
    ///
    /// Positive while above the collapsed line, negative inside the peek band.
    /// A zero-sized range reports 0.
    pub fn slide_offset(&self, top: i32, peek_height: i32) -> f32 {
        let distance = (self.max_offset - top) as f32;
        let range = if top > self.max_offset {
            peek_height
        } else {
            self.max_offset - self.min_offset
        };
        if range == 0 {
            0.0
        } else {
            distance / range as f32
        }
    }
}

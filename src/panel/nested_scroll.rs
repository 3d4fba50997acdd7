//! Nested scroll coordination
//!
//! The scrolling descendant offers each scroll delta to the panel first. The
//! panel takes as much as it needs to move between its resting offsets and
//! leaves the rest for the descendant's own content.
//!
//! `dy > 0` means the content scrolls up, so the panel rises (its top shrinks).

use std::time::Instant;

use tracing::trace;

use super::{PanelState, TabBehavior};
use crate::host::{ViewId, ViewTree};

/// Axes a nested scroll gesture covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollAxes {
    pub horizontal: bool,
    pub vertical: bool,
}

impl ScrollAxes {
    pub const VERTICAL: ScrollAxes = ScrollAxes {
        horizontal: false,
        vertical: true,
    };
    pub const HORIZONTAL: ScrollAxes = ScrollAxes {
        horizontal: true,
        vertical: false,
    };
}

impl TabBehavior {
    /// A descendant is starting a nested scroll; accept vertical ones
    pub fn on_start_nested_scroll(&mut self, axes: ScrollAxes) -> bool {
        self.gesture.nested_scrolled = false;
        self.scroll_velocity.clear();
        axes.vertical
    }

    /// Offer `dy` from `target` before it scrolls its own content
    ///
    /// Returns the part of `dy` the panel consumed. Events from anything other
    /// than the tracked scrolling descendant, or arriving while blocked or
    /// before layout, consume nothing.
    pub fn on_nested_pre_scroll(
        &mut self,
        tree: &mut ViewTree,
        target: ViewId,
        dy: i32,
        at: Instant,
    ) -> i32 {
        if self.state() == PanelState::Blocked {
            return 0;
        }
        let Some(panel) = self.attached_panel(tree) else {
            return 0;
        };
        if self.attached_scrolling_child(tree) != Some(target) {
            trace!(target: "nested_scroll", %target, "ignoring foreign scroll target");
            return 0;
        }
        let Some(current_top) = tree.top(panel) else {
            return 0;
        };

        self.scroll_velocity.record(dy, at);

        let Some((consumed, state)) = self.nested_consumption(tree, target, current_top, dy) else {
            return 0;
        };

        tree.offset_top_and_bottom(panel, -consumed);
        self.set_state_internal(tree, state);
        self.dispatch_on_slide(tree, current_top - consumed);
        self.gesture.nested_scrolled = true;

        trace!(
            target: "nested_scroll",
            dy,
            consumed,
            top = current_top - consumed,
            %state,
            velocity = self.scroll_velocity.velocity(),
            "pre-scroll"
        );
        consumed
    }

    /// How much of `dy` the panel takes and the state it ends up in
    fn nested_consumption(
        &self,
        tree: &ViewTree,
        target: ViewId,
        current_top: i32,
        dy: i32,
    ) -> Option<(i32, PanelState)> {
        let geometry = &self.geometry;
        let new_top = current_top.saturating_sub(dy);

        if dy > 0 {
            if new_top < geometry.min_offset {
                return Some((current_top - geometry.min_offset, PanelState::Expanded));
            }
            return Some((dy, PanelState::Dragging));
        }

        let hideable = self.config.hideable;
        let has_room = current_top < geometry.drag_limit(hideable);
        if dy == 0 || !has_room || tree.can_scroll_vertically(target, -1) {
            return None;
        }

        if new_top <= geometry.max_offset || hideable {
            if !self.config.collapsible && new_top > geometry.anchor_point {
                return None;
            }
            if hideable && new_top >= geometry.parent_height {
                return Some((current_top - geometry.parent_height, PanelState::Hidden));
            }
            let state = if new_top == geometry.anchor_point {
                PanelState::AnchorPoint
            } else {
                PanelState::Dragging
            };
            Some((dy, state))
        } else {
            Some((current_top - geometry.max_offset, PanelState::Collapsed))
        }
    }

    /// The nested scroll stream ended
    pub fn on_stop_nested_scroll(&mut self) {
        self.gesture.nested_scrolled = false;
        self.scroll_velocity.clear();
    }

    /// Whether the panel intercepts a fling from `target`
    ///
    /// Flings from the scrolling descendant are swallowed unless the panel is
    /// expanded, in which case the descendant flings its own content.
    pub fn on_nested_pre_fling(&self, tree: &ViewTree, target: ViewId, _velocity_y: f32) -> bool {
        self.attached_scrolling_child(tree) == Some(target) && self.state() != PanelState::Expanded
    }

    /// A nested scroll has moved the panel in the current stream
    pub fn is_nested_scrolling(&self) -> bool {
        self.gesture.nested_scrolled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BehaviorConfig;
    use crate::host::View;
    use crate::panel::EventLog;

    /// Parent 900, panel 900 tall, peek 100: min 0, max 800, anchor 400
    fn setup(config: BehaviorConfig) -> (TabBehavior, ViewTree, ViewId, ViewId, EventLog) {
        let mut tree = ViewTree::new();
        let panel = tree.add(None, View::new(500, 900));
        let list = tree.add(Some(panel), View::scrollable(500, 900, 2000));
        let mut behavior = TabBehavior::new(BehaviorConfig {
            peek_height: 100,
            anchor_point: 400,
            ..config
        });
        let log = EventLog::new();
        behavior.add_listener(Box::new(log.clone()));
        behavior.on_layout_child(&mut tree, 900, panel);
        (behavior, tree, panel, list, log)
    }

    #[test]
    fn test_rise_within_range() {
        let (mut behavior, mut tree, panel, list, log) = setup(BehaviorConfig::default());
        assert_eq!(behavior.on_nested_pre_scroll(&mut tree, list, 50, Instant::now()), 50);
        assert_eq!(tree.top(panel), Some(350));
        assert_eq!(behavior.state(), PanelState::Dragging);
        assert_eq!(log.slides(), vec![(800.0 - 350.0) / 800.0]);
        assert!(behavior.is_nested_scrolling());
    }

    #[test]
    fn test_rise_past_min_clamps() {
        let (mut behavior, mut tree, panel, list, _) = setup(BehaviorConfig::default());
        assert_eq!(behavior.on_nested_pre_scroll(&mut tree, list, 500, Instant::now()), 400);
        assert_eq!(tree.top(panel), Some(0));
        assert_eq!(behavior.state(), PanelState::Expanded);
    }

    #[test]
    fn test_descend_blocked_while_content_scrolled() {
        let (mut behavior, mut tree, panel, list, _) = setup(BehaviorConfig::default());
        tree.scroll_by(list, 100);
        assert_eq!(behavior.on_nested_pre_scroll(&mut tree, list, -50, Instant::now()), 0);
        assert_eq!(tree.top(panel), Some(400));
        assert_eq!(behavior.state(), PanelState::AnchorPoint);
    }

    #[test]
    fn test_non_collapsible_stops_at_anchor() {
        let (mut behavior, mut tree, panel, list, _) = setup(BehaviorConfig {
            collapsible: false,
            ..BehaviorConfig::default()
        });
        tree.set_top(panel, 300);
        assert_eq!(behavior.on_nested_pre_scroll(&mut tree, list, -100, Instant::now()), -100);
        assert_eq!(behavior.state(), PanelState::AnchorPoint);
        assert_eq!(tree.top(panel), Some(400));

        assert_eq!(behavior.on_nested_pre_scroll(&mut tree, list, -10, Instant::now()), 0);
        assert_eq!(tree.top(panel), Some(400));
    }

    #[test]
    fn test_hideable_descends_to_hidden() {
        let (mut behavior, mut tree, panel, list, _) = setup(BehaviorConfig {
            hideable: true,
            ..BehaviorConfig::default()
        });
        tree.set_top(panel, 800);
        assert_eq!(behavior.on_nested_pre_scroll(&mut tree, list, -50, Instant::now()), -50);
        assert_eq!(tree.top(panel), Some(850));
        assert_eq!(behavior.state(), PanelState::Dragging);

        assert_eq!(behavior.on_nested_pre_scroll(&mut tree, list, -200, Instant::now()), -50);
        assert_eq!(tree.top(panel), Some(900));
        assert_eq!(behavior.state(), PanelState::Hidden);
    }

    #[test]
    fn test_collapsed_panel_leaves_scroll_to_content() {
        let (mut behavior, mut tree, panel, list, _) = setup(BehaviorConfig::default());
        tree.set_top(panel, 800);
        assert_eq!(behavior.on_nested_pre_scroll(&mut tree, list, -20, Instant::now()), 0);
        assert_eq!(tree.top(panel), Some(800));
    }

    #[test]
    fn test_foreign_target_and_blocked_ignored() {
        let (mut behavior, mut tree, panel, list, log) = setup(BehaviorConfig::default());
        let other = tree.add(None, View::scrollable(10, 10, 10));
        assert_eq!(behavior.on_nested_pre_scroll(&mut tree, other, 50, Instant::now()), 0);

        behavior.block(&tree);
        log.drain();
        assert_eq!(behavior.on_nested_pre_scroll(&mut tree, list, 50, Instant::now()), 0);
        assert_eq!(tree.top(panel), Some(400));
        assert!(log.is_empty());
    }

    #[test]
    fn test_detached_scrolling_child() {
        let (mut behavior, mut tree, _, list, _) = setup(BehaviorConfig::default());
        tree.remove(list);
        assert_eq!(behavior.on_nested_pre_scroll(&mut tree, list, 50, Instant::now()), 0);
        assert!(!behavior.on_nested_pre_fling(&tree, list, 100.0));
    }

    #[test]
    fn test_extreme_deltas_clamp() {
        let (mut behavior, mut tree, panel, list, _) = setup(BehaviorConfig::default());
        assert_eq!(behavior.on_nested_pre_scroll(&mut tree, list, i32::MIN, Instant::now()), -400);
        assert_eq!(tree.top(panel), Some(800));
        assert_eq!(behavior.state(), PanelState::Collapsed);

        assert_eq!(behavior.on_nested_pre_scroll(&mut tree, list, i32::MAX, Instant::now()), 800);
        assert_eq!(tree.top(panel), Some(0));
        assert_eq!(behavior.state(), PanelState::Expanded);
    }

    #[test]
    fn test_start_and_stop() {
        let (mut behavior, mut tree, _, list, _) = setup(BehaviorConfig::default());
        assert!(behavior.on_start_nested_scroll(ScrollAxes::VERTICAL));
        assert!(!behavior.on_start_nested_scroll(ScrollAxes::HORIZONTAL));
        behavior.on_nested_pre_scroll(&mut tree, list, 10, Instant::now());
        assert!(behavior.is_nested_scrolling());
        behavior.on_stop_nested_scroll();
        assert!(!behavior.is_nested_scrolling());
    }

    #[test]
    fn test_pre_fling() {
        let (mut behavior, mut tree, _, list, _) = setup(BehaviorConfig::default());
        assert!(behavior.on_nested_pre_fling(&tree, list, 1000.0));
        behavior.on_nested_pre_scroll(&mut tree, list, 1000, Instant::now());
        assert_eq!(behavior.state(), PanelState::Expanded);
        assert!(!behavior.on_nested_pre_fling(&tree, list, 1000.0));
    }
}

//! Coordinator layout host
//!
//! Owns the view tree and the per-child layout params, and routes layout,
//! touch, nested-scroll, and settle events to the behaviors attached to its
//! direct children.

use std::collections::HashMap;
use std::time::Instant;

use tracing::debug;

use super::{View, ViewId, ViewTree};
use crate::commands::Cmd;
use crate::panel::{BehaviorError, SavedState, ScrollAxes, SettleToken, TabBehavior, TouchEvent};

/// Behavior attached to a coordinator child
#[derive(Debug)]
pub enum Behavior {
    Tab(Box<TabBehavior>),
    /// Some other behavior the coordinator knows only by name
    Other(String),
}

impl Behavior {
    pub fn as_tab(&self) -> Option<&TabBehavior> {
        match self {
            Behavior::Tab(tab) => Some(tab),
            Behavior::Other(_) => None,
        }
    }

    pub fn as_tab_mut(&mut self) -> Option<&mut TabBehavior> {
        match self {
            Behavior::Tab(tab) => Some(tab),
            Behavior::Other(_) => None,
        }
    }
}

impl From<TabBehavior> for Behavior {
    fn from(behavior: TabBehavior) -> Self {
        Behavior::Tab(Box::new(behavior))
    }
}

#[derive(Debug, Default)]
pub struct LayoutParams {
    pub behavior: Option<Behavior>,
}

impl LayoutParams {
    pub fn with_behavior(behavior: impl Into<Behavior>) -> Self {
        Self {
            behavior: Some(behavior.into()),
        }
    }
}

/// Result of running one nested scroll delta through the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NestedScrollOutcome {
    /// Taken by panel behaviors
    pub consumed: i32,
    /// Scrolled by the target's own content
    pub scrolled: i32,
}

#[derive(Debug)]
pub struct CoordinatorLayout {
    pub width: i32,
    pub height: i32,
    pub tree: ViewTree,
    children: Vec<ViewId>,
    params: HashMap<ViewId, LayoutParams>,
}

impl CoordinatorLayout {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            tree: ViewTree::new(),
            children: Vec::new(),
            params: HashMap::new(),
        }
    }

    /// Add a direct child with its layout params
    pub fn add_child(&mut self, view: View, params: LayoutParams) -> ViewId {
        let id = self.tree.add(None, view);
        self.children.push(id);
        self.params.insert(id, params);
        id
    }

    /// Add a view somewhere below an existing child
    pub fn add_descendant(&mut self, parent: ViewId, view: View) -> ViewId {
        self.tree.add(Some(parent), view)
    }

    /// Detach a child and its subtree; behaviors keep dangling ids only
    pub fn remove_child(&mut self, id: ViewId) -> Option<LayoutParams> {
        self.children.retain(|child| *child != id);
        self.tree.remove(id);
        self.params.remove(&id)
    }

    pub fn children(&self) -> &[ViewId] {
        &self.children
    }

    /// The tab behavior attached to `view`
    ///
    /// Fails when `view` is not a direct child of this layout or has a
    /// different (or no) behavior.
    pub fn tab_behavior(&self, view: ViewId) -> Result<&TabBehavior, BehaviorError> {
        self.params
            .get(&view)
            .ok_or(BehaviorError::NotInCoordinator(view))?
            .behavior
            .as_ref()
            .and_then(Behavior::as_tab)
            .ok_or(BehaviorError::NoTabBehavior(view))
    }

    pub fn tab_behavior_mut(&mut self, view: ViewId) -> Result<&mut TabBehavior, BehaviorError> {
        self.split_mut(view).map(|(behavior, _)| behavior)
    }

    /// The tab behavior for `view` together with the tree it operates on
    pub fn split_mut(
        &mut self,
        view: ViewId,
    ) -> Result<(&mut TabBehavior, &mut ViewTree), BehaviorError> {
        let behavior = self
            .params
            .get_mut(&view)
            .ok_or(BehaviorError::NotInCoordinator(view))?
            .behavior
            .as_mut()
            .and_then(Behavior::as_tab_mut)
            .ok_or(BehaviorError::NoTabBehavior(view))?;
        Ok((behavior, &mut self.tree))
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }

    /// Run a layout pass over every child
    pub fn layout(&mut self) {
        let height = self.height;
        let children = self.children.clone();
        for child in children {
            let Some(behavior) = self
                .params
                .get_mut(&child)
                .and_then(|params| params.behavior.as_mut())
                .and_then(Behavior::as_tab_mut)
            else {
                self.tree.set_top(child, 0);
                continue;
            };
            behavior.on_layout_child(&mut self.tree, height, child);
        }
    }

    pub fn dispatch_touch(&mut self, event: TouchEvent) -> Option<Cmd> {
        let children = self.children.clone();
        let mut cmds = Vec::new();
        for child in children {
            if let Ok((behavior, tree)) = self.split_mut(child) {
                cmds.extend(behavior.on_touch_event(tree, event));
            }
        }
        Cmd::batch(cmds)
    }

    /// Start a nested scroll from `target`; true if any behavior accepted it
    pub fn start_nested_scroll(&mut self, target: ViewId, axes: ScrollAxes) -> bool {
        let mut accepted = false;
        for child in self.children.clone() {
            let Ok(behavior) = self.tab_behavior_mut(child) else {
                continue;
            };
            if behavior.on_start_nested_scroll(axes) {
                debug!(target: "nested_scroll", %child, %target, "nested scroll accepted");
                accepted = true;
            }
        }
        accepted
    }

    /// Offer `dy` to the behaviors, then let `target` scroll what is left
    pub fn nested_scroll(&mut self, target: ViewId, dy: i32, at: Instant) -> NestedScrollOutcome {
        let consumed = self.nested_pre_scroll(target, dy, at);
        let scrolled = self.tree.scroll_by(target, dy - consumed);
        NestedScrollOutcome { consumed, scrolled }
    }

    /// Offer `dy` to the behaviors, returning the amount they consumed
    pub fn nested_pre_scroll(&mut self, target: ViewId, dy: i32, at: Instant) -> i32 {
        let children = self.children.clone();
        let mut consumed = 0;
        for child in children {
            if let Ok((behavior, tree)) = self.split_mut(child) {
                let taken = behavior.on_nested_pre_scroll(tree, target, dy - consumed, at);
                consumed += taken;
            }
        }
        consumed
    }

    pub fn stop_nested_scroll(&mut self, target: ViewId) {
        for child in self.children.clone() {
            let Ok(behavior) = self.tab_behavior_mut(child) else {
                continue;
            };
            behavior.on_stop_nested_scroll();
            debug!(target: "nested_scroll", %child, %target, "nested scroll stopped");
        }
    }

    /// Whether a behavior swallows the fling from `target`
    pub fn nested_pre_fling(&self, target: ViewId, velocity_y: f32) -> bool {
        let tree = &self.tree;
        self.children.iter().any(|child| {
            self.params
                .get(child)
                .and_then(|params| params.behavior.as_ref())
                .and_then(Behavior::as_tab)
                .is_some_and(|behavior| behavior.on_nested_pre_fling(tree, target, velocity_y))
        })
    }

    /// Run one settle tick for `panel`
    pub fn settle_tick(&mut self, panel: ViewId, token: SettleToken) -> Option<Cmd> {
        let (behavior, tree) = self.split_mut(panel).ok()?;
        behavior.continue_settling(tree, token)
    }

    pub fn save_state(
        &self,
        panel: ViewId,
        super_state: Option<Vec<u8>>,
    ) -> Result<SavedState, BehaviorError> {
        Ok(self.tab_behavior(panel)?.on_save_instance_state(super_state))
    }

    pub fn restore_state(
        &mut self,
        panel: ViewId,
        saved: &SavedState,
    ) -> Result<Option<Vec<u8>>, BehaviorError> {
        self.tab_behavior_mut(panel)?.on_restore_instance_state(saved)
    }
}

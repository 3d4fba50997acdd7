//! The sheet controller
//!
//! `TabBehavior` holds everything that outlives a single gesture: the
//! configuration, the geometry from the last layout pass, the state machine,
//! listeners, and the settler. Views are only ever referenced by id and
//! re-resolved through the host's `ViewTree` on each call.

use tracing::{debug, trace};

use super::{
    BehaviorError, Geometry, GestureSession, ListenerRegistry, PanelState, SavedState, SettleStep,
    SettleToken, Settler, SheetCallback, StateMachine, VelocityTracker,
};
use crate::commands::Cmd;
use crate::config::BehaviorConfig;
use crate::host::{ViewId, ViewTree};

#[derive(Debug)]
pub struct TabBehavior {
    pub(super) config: BehaviorConfig,
    pub(super) geometry: Geometry,
    pub(super) state: StateMachine,
    pub(super) gesture: GestureSession,
    pub(super) scroll_velocity: VelocityTracker,
    pub(super) settler: Settler,
    listeners: ListenerRegistry,
    /// Back-reference to the laid-out panel
    pub(super) panel: Option<ViewId>,
    /// Back-reference to the first scrollable descendant of the panel
    pub(super) scrolling_child: Option<ViewId>,
}

impl TabBehavior {
    pub fn new(mut config: BehaviorConfig) -> Self {
        config.peek_height = config.peek_height.max(0);
        Self {
            geometry: Geometry {
                anchor_point: config.anchor_point,
                ..Geometry::default()
            },
            state: StateMachine::new(config.default_state),
            gesture: GestureSession::default(),
            scroll_velocity: VelocityTracker::new(),
            settler: Settler::new(config.settle_fraction),
            listeners: ListenerRegistry::new(),
            panel: None,
            scrolling_child: None,
            config,
        }
    }

    // === Accessors ===

    pub fn state(&self) -> PanelState {
        self.state.current()
    }

    pub fn last_stable_state(&self) -> PanelState {
        self.state.last_stable()
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn gesture(&self) -> &GestureSession {
        &self.gesture
    }

    pub fn settler(&self) -> &Settler {
        &self.settler
    }

    /// Latest nested-scroll velocity, pixels per second
    pub fn scroll_velocity(&self) -> f32 {
        self.scroll_velocity.velocity()
    }

    /// The panel this controller was last laid out with
    pub fn panel(&self) -> Option<ViewId> {
        self.panel
    }

    pub fn scrolling_child(&self) -> Option<ViewId> {
        self.scrolling_child
    }

    /// The panel, if it still exists in `tree`
    pub(super) fn attached_panel(&self, tree: &ViewTree) -> Option<ViewId> {
        self.panel.filter(|id| tree.contains(*id))
    }

    pub(super) fn attached_scrolling_child(&self, tree: &ViewTree) -> Option<ViewId> {
        self.scrolling_child.filter(|id| tree.contains(*id))
    }

    // === Configuration ===

    pub fn peek_height(&self) -> i32 {
        self.config.peek_height
    }

    /// Set the collapsed height; negative values clamp to 0
    pub fn set_peek_height(&mut self, peek_height: i32) {
        self.config.peek_height = peek_height.max(0);
        self.geometry = self.geometry.with_peek_height(self.config.peek_height);
    }

    pub fn anchor_point(&self) -> i32 {
        self.config.anchor_point
    }

    pub fn set_anchor_point(&mut self, anchor_point: i32) {
        self.config.anchor_point = anchor_point;
        self.geometry.anchor_point = anchor_point;
    }

    pub fn is_collapsible(&self) -> bool {
        self.config.collapsible
    }

    pub fn set_collapsible(&mut self, collapsible: bool) {
        self.config.collapsible = collapsible;
    }

    pub fn is_hideable(&self) -> bool {
        self.config.hideable
    }

    pub fn set_hideable(&mut self, hideable: bool) {
        self.config.hideable = hideable;
    }

    /// Register a callback; callbacks are notified in registration order
    pub fn add_listener(&mut self, callback: Box<dyn SheetCallback>) {
        self.listeners.add(callback);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // === State ===

    /// Request a resting state, sliding the panel there
    ///
    /// Accepts `Collapsed`, `Expanded`, `AnchorPoint`, and `Hidden` when
    /// hideable. The state applies immediately; the returned command drives
    /// the visual settle.
    pub fn set_state(
        &mut self,
        tree: &ViewTree,
        target: PanelState,
    ) -> Result<Option<Cmd>, BehaviorError> {
        let accepted = match target {
            PanelState::Collapsed | PanelState::Expanded | PanelState::AnchorPoint => true,
            PanelState::Hidden => self.config.hideable,
            PanelState::Dragging | PanelState::Blocked => false,
        };
        if !accepted {
            tracing::warn!(target: "state", requested = %target, "rejected state request");
            return Err(BehaviorError::IllegalState(target));
        }
        Ok(self.slide_to_state(tree, target))
    }

    /// Pin the panel at the anchor offset
    ///
    /// While blocked, nested scrolling no longer moves the panel.
    pub fn block(&mut self, tree: &ViewTree) -> Option<Cmd> {
        self.slide_to_state(tree, PanelState::Blocked)
    }

    /// Release a pinned panel back to the anchor state
    pub fn unblock(&mut self, tree: &ViewTree) -> Option<Cmd> {
        if self.state() != PanelState::Blocked {
            return None;
        }
        self.slide_to_state(tree, PanelState::AnchorPoint)
    }

    fn slide_to_state(&mut self, tree: &ViewTree, target: PanelState) -> Option<Cmd> {
        let Some((panel, current_top)) = self
            .attached_panel(tree)
            .and_then(|panel| tree.top(panel).map(|top| (panel, top)))
        else {
            // Not laid out yet: remember the request for the first layout pass
            self.state.transition(target);
            debug!(target: "state", state = %target, "state recorded before layout");
            return None;
        };

        let top = self
            .geometry
            .top_for_state(target, self.config.hideable)
            .unwrap_or(self.geometry.anchor_point);

        self.set_state_internal(tree, target);

        let token = self.settler.start(panel, current_top, top, target)?;
        debug!(
            target: "settle",
            %panel,
            from = current_top,
            to = top,
            state = %target,
            token = token.0,
            "settle started"
        );
        Some(Cmd::ScheduleSettle { panel, token })
    }

    /// The single state setter
    ///
    /// Notifies listeners even when the state is unchanged, but only while a
    /// panel is attached.
    pub(super) fn set_state_internal(&mut self, tree: &ViewTree, state: PanelState) {
        let previous = self.state.transition(state);
        if previous != state {
            debug!(target: "state", from = %previous, to = %state, "state changed");
        }
        if let Some(panel) = self.attached_panel(tree) {
            self.listeners.notify_state_changed(panel, state);
        }
    }

    /// Report the slide offset for a panel top
    pub(super) fn dispatch_on_slide(&mut self, tree: &ViewTree, top: i32) {
        let Some(panel) = self.attached_panel(tree) else {
            return;
        };
        let offset = self.geometry.slide_offset(top, self.config.peek_height);
        trace!(target: "slide", %panel, top, offset, "slide");
        self.listeners.notify_slide(panel, offset);
    }

    // === Layout ===

    /// Recompute geometry for `child` inside a parent of `parent_height` and
    /// place it according to the current state
    ///
    /// `Hidden` places the panel at `parent_height` only while hideable.
    ///
    /// Repeating a pass with unchanged inputs changes nothing. Returns false if
    /// `child` is not in the tree.
    pub fn on_layout_child(&mut self, tree: &mut ViewTree, parent_height: i32, child: ViewId) -> bool {
        let Some(panel_height) = tree.get(child).map(|view| view.height) else {
            return false;
        };

        self.geometry = Geometry::compute(
            parent_height,
            panel_height,
            self.config.peek_height,
            self.config.anchor_point,
        );

        // States without a resting offset leave the panel where it is: a
        // panel mid-drag, or a hidden one that is no longer hideable
        if let Some(top) = self
            .geometry
            .top_for_state(self.state(), self.config.hideable)
        {
            tree.set_top(child, top);
        }

        self.panel = Some(child);
        self.scrolling_child = tree.find_scrolling_child(child);
        trace!(
            target: "layout",
            %child,
            geometry = ?self.geometry,
            scrolling_child = ?self.scrolling_child,
            "laid out"
        );
        true
    }

    // === Settle ===

    /// Advance the settle identified by `token` by one tick
    ///
    /// Stale tokens are ignored. Returns the follow-up tick while motion
    /// continues.
    pub fn continue_settling(&mut self, tree: &mut ViewTree, token: SettleToken) -> Option<Cmd> {
        if !self.settler.is_current(token) {
            trace!(target: "settle", token = token.0, "stale settle tick");
            return None;
        }
        let Some((panel, current_top)) = self
            .attached_panel(tree)
            .and_then(|panel| tree.top(panel).map(|top| (panel, top)))
        else {
            self.settler.cancel();
            return None;
        };

        match self.settler.step(token, current_top) {
            SettleStep::Stale => None,
            SettleStep::Continue { top } => {
                tree.set_top(panel, top);
                self.dispatch_on_slide(tree, top);
                Some(Cmd::ScheduleSettle { panel, token })
            }
            SettleStep::Finished { top, state } => {
                tree.set_top(panel, top);
                self.dispatch_on_slide(tree, top);
                debug!(target: "settle", %panel, top, %state, "settle finished");
                self.set_state_internal(tree, state);
                Some(Cmd::Redraw)
            }
        }
    }

    // === Persistence ===

    pub fn on_save_instance_state(&self, super_state: Option<Vec<u8>>) -> SavedState {
        SavedState::new(super_state, self.state())
    }

    /// Restore the state code from `saved`
    ///
    /// Returns the host's opaque blob. Any settle in flight is dropped.
    /// Listeners are not notified; the next layout pass positions the panel.
    pub fn on_restore_instance_state(
        &mut self,
        saved: &SavedState,
    ) -> Result<Option<Vec<u8>>, BehaviorError> {
        let restored = saved.restored_state()?;
        if let Some(run) = self.settler.cancel() {
            debug!(target: "settle", token = run.token.0, "restore cancelled settle");
        }
        self.state = StateMachine::new(restored);
        debug!(target: "state", state = %restored, "restored");
        Ok(saved.super_state.clone())
    }
}

impl Default for TabBehavior {
    fn default() -> Self {
        Self::new(BehaviorConfig::default())
    }
}

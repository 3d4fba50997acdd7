//! Application model - the complete state of the sheet simulator
//!
//! One coordinator layout holding a single bottom sheet: a header strip on top
//! of a scrollable item list.

use crate::config::SheetConfig;
use crate::host::{CoordinatorLayout, LayoutParams, View, ViewId};
use crate::panel::{BehaviorError, PanelState, SheetCallback, TabBehavior};

/// Coordinator size used by the demo model
pub const DEMO_WIDTH: i32 = 1080;
pub const DEMO_HEIGHT: i32 = 1920;
/// Height of the sheet's drag handle strip
pub const HEADER_HEIGHT: i32 = 160;
/// Height of one list row
pub const ROW_HEIGHT: i32 = 120;
/// Rows in the demo list
pub const DEMO_ITEMS: i32 = 38;

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    pub layout: CoordinatorLayout,
    /// The sheet panel, a direct child of `layout`
    pub panel: ViewId,
    /// The list inside the sheet
    pub list: ViewId,
    pub config: SheetConfig,
}

impl AppModel {
    /// Build the demo sheet with `config` and run the first layout pass
    pub fn new(config: SheetConfig) -> Self {
        Self::with_size(config, DEMO_WIDTH, DEMO_HEIGHT)
    }

    pub fn with_size(config: SheetConfig, width: i32, height: i32) -> Self {
        let mut layout = CoordinatorLayout::new(width, height);
        let behavior = TabBehavior::new(config.behavior.clone());
        let panel = layout.add_child(View::new(width, height), LayoutParams::with_behavior(behavior));

        layout.add_descendant(panel, View::new(width, HEADER_HEIGHT));
        let list_height = height - HEADER_HEIGHT;
        let extent = (DEMO_ITEMS * ROW_HEIGHT - list_height).max(0);
        let list = layout.add_descendant(
            panel,
            View::scrollable(width, list_height, extent).at(0, HEADER_HEIGHT),
        );

        layout.layout();
        Self {
            layout,
            panel,
            list,
            config,
        }
    }

    /// Demo model with default configuration
    pub fn demo() -> Self {
        Self::new(SheetConfig::default())
    }

    pub fn behavior(&self) -> Result<&TabBehavior, BehaviorError> {
        self.layout.tab_behavior(self.panel)
    }

    pub fn behavior_mut(&mut self) -> Result<&mut TabBehavior, BehaviorError> {
        self.layout.tab_behavior_mut(self.panel)
    }

    pub fn add_listener(&mut self, callback: Box<dyn SheetCallback>) -> Result<(), BehaviorError> {
        self.behavior_mut()?.add_listener(callback);
        Ok(())
    }

    /// Current state of the sheet, `None` if its behavior is gone
    pub fn state(&self) -> Option<PanelState> {
        self.behavior().ok().map(TabBehavior::state)
    }

    pub fn panel_top(&self) -> Option<i32> {
        self.layout.tree.top(self.panel)
    }

    /// Current scroll offset of the list content
    pub fn list_offset(&self) -> Option<i32> {
        self.layout
            .tree
            .get(self.list)
            .and_then(|view| view.scroll)
            .map(|scroll| scroll.offset)
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::demo()
    }
}

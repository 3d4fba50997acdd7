//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::time::{Duration, Instant};

use tabsheet::commands::Cmd;
use tabsheet::config::{BehaviorConfig, SheetConfig};
use tabsheet::host::{View, ViewId, ViewTree};
use tabsheet::messages::{Msg, SettleMsg};
use tabsheet::model::AppModel;
use tabsheet::panel::{EventLog, TabBehavior};
use tabsheet::update::update;

/// Parent and panel height used throughout: min 0, max 800 with peek 200
pub const PARENT_HEIGHT: i32 = 1000;

/// Peek 200, anchor 400 in a 1000px parent
pub fn sheet_config() -> BehaviorConfig {
    BehaviorConfig {
        peek_height: 200,
        anchor_point: 400,
        ..BehaviorConfig::default()
    }
}

/// A 1000x1000 demo model with `behavior` and a recording listener
pub fn test_model(behavior: BehaviorConfig) -> (AppModel, EventLog) {
    let config = SheetConfig {
        behavior,
        ..SheetConfig::default()
    };
    let mut model = AppModel::with_size(config, 1000, PARENT_HEIGHT);
    let log = EventLog::new();
    model
        .add_listener(Box::new(log.clone()))
        .expect("demo panel has a tab behavior");
    (model, log)
}

/// A controller laid out directly on a bare tree, no coordinator involved
pub struct Sheet {
    pub behavior: TabBehavior,
    pub tree: ViewTree,
    pub panel: ViewId,
    pub header: ViewId,
    pub list: ViewId,
    pub log: EventLog,
}

/// Panel 1000 tall with a 100px header above a 900px list
pub fn laid_out(config: BehaviorConfig) -> Sheet {
    let mut tree = ViewTree::new();
    let panel = tree.add(None, View::new(600, PARENT_HEIGHT));
    let header = tree.add(Some(panel), View::new(600, 100));
    let list = tree.add(Some(panel), View::scrollable(600, 900, 3000).at(0, 100));
    let mut behavior = TabBehavior::new(config);
    let log = EventLog::new();
    behavior.add_listener(Box::new(log.clone()));
    assert!(behavior.on_layout_child(&mut tree, PARENT_HEIGHT, panel));
    Sheet {
        behavior,
        tree,
        panel,
        header,
        list,
        log,
    }
}

/// Keep delivering settle ticks from `cmd` until the motion ends
///
/// Returns the number of ticks delivered.
pub fn run_settle(model: &mut AppModel, mut cmd: Option<Cmd>) -> usize {
    let mut ticks = 0;
    while let Some((panel, token)) = cmd.as_ref().and_then(scheduled_tick) {
        cmd = update(model, Msg::Settle(SettleMsg::Tick { panel, token }));
        ticks += 1;
        assert!(ticks < 1000, "settle did not converge");
    }
    ticks
}

fn scheduled_tick(cmd: &Cmd) -> Option<(ViewId, tabsheet::panel::SettleToken)> {
    match cmd {
        Cmd::ScheduleSettle { panel, token } => Some((*panel, *token)),
        Cmd::Batch(cmds) => cmds.iter().find_map(scheduled_tick),
        _ => None,
    }
}

/// `start + ms` milliseconds
pub fn after(start: Instant, ms: u64) -> Instant {
    start + Duration::from_millis(ms)
}

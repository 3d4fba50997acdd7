//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod layout;
mod nested_scroll;
mod panel;
mod persist;
mod settle;
mod touch;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::tracing::SheetSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use layout::update_layout;
pub use nested_scroll::update_nested_scroll;
pub use panel::update_panel;
pub use persist::update_persist;
pub use settle::update_settle;
pub use touch::update_touch;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Layout(m) => layout::update_layout(model, m),
        Msg::Touch(m) => touch::update_touch(model, m),
        Msg::NestedScroll(m) => nested_scroll::update_nested_scroll(model, m),
        Msg::Settle(m) => settle::update_settle(model, m),
        Msg::Panel(m) => panel::update_panel(model, m),
        Msg::Persist(m) => persist::update_persist(model, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after sheet state and logs diffs. Settle ticks and moves
/// are too frequent for the per-message debug line.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    use crate::messages::{SettleMsg, TouchMsg};

    let is_noisy = matches!(
        &msg,
        Msg::Settle(SettleMsg::Tick { .. }) | Msg::Touch(TouchMsg::Move { .. })
    );

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = SheetSnapshot::capture(model);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    if let (Some(before), Some(after)) = (before, SheetSnapshot::capture(model)) {
        if let Some(diff) = before.diff(&after) {
            debug!(target: "sheet", %diff, "state changed");
        }
    }

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Panel::SetState(Expanded)`
/// - `NestedScroll::Stop { target: ViewId(3) }`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Layout(m) => format!("Layout::{:?}", m),
        Msg::Touch(m) => format!("Touch::{:?}", m),
        Msg::NestedScroll(m) => format!("NestedScroll::{:?}", m),
        Msg::Settle(m) => format!("Settle::{:?}", m),
        Msg::Panel(m) => format!("Panel::{:?}", m),
        Msg::Persist(m) => format!("Persist::{:?}", m),
    }
}

//! Nested scroll handlers
//!
//! Each pre-scroll is offered to the sheet first; whatever it leaves scrolls
//! the target's own content.

use tracing::{debug, trace};

use crate::commands::Cmd;
use crate::messages::NestedScrollMsg;
use crate::model::AppModel;

pub fn update_nested_scroll(model: &mut AppModel, msg: NestedScrollMsg) -> Option<Cmd> {
    match msg {
        NestedScrollMsg::Start { target, axes } => {
            let accepted = model.layout.start_nested_scroll(target, axes);
            debug!(target: "nested_scroll", %target, accepted, "start");
            None
        }

        NestedScrollMsg::PreScroll { target, dy, at } => {
            let outcome = model.layout.nested_scroll(target, dy, at);
            trace!(
                target: "nested_scroll",
                dy,
                consumed = outcome.consumed,
                scrolled = outcome.scrolled,
                "scroll"
            );
            (outcome.consumed != 0 || outcome.scrolled != 0).then_some(Cmd::Redraw)
        }

        NestedScrollMsg::Stop { target } => {
            model.layout.stop_nested_scroll(target);
            None
        }

        NestedScrollMsg::Fling { target, velocity_y } => {
            if model.layout.nested_pre_fling(target, velocity_y) {
                debug!(target: "nested_scroll", %target, velocity_y, "fling swallowed");
                return None;
            }
            // Content flings by itself; approximate it with one frame of travel
            let scrolled = model.layout.tree.scroll_by(target, (velocity_y / 60.0) as i32);
            (scrolled != 0).then_some(Cmd::Redraw)
        }
    }
}

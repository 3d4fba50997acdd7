//! Programmatic panel control handlers

use tracing::warn;

use crate::commands::Cmd;
use crate::messages::PanelMsg;
use crate::model::AppModel;

pub fn update_panel(model: &mut AppModel, msg: PanelMsg) -> Option<Cmd> {
    let panel = model.panel;
    let (behavior, tree) = match model.layout.split_mut(panel) {
        Ok(split) => split,
        Err(e) => {
            warn!(target: "state", %panel, error = %e, "panel message dropped");
            return None;
        }
    };

    match msg {
        PanelMsg::SetState(state) => match behavior.set_state(tree, state) {
            Ok(cmd) => cmd.or(Some(Cmd::Redraw)),
            Err(e) => {
                warn!(target: "state", error = %e, "setState rejected");
                None
            }
        },

        PanelMsg::Block => behavior.block(tree),

        PanelMsg::Unblock => behavior.unblock(tree),

        PanelMsg::SetPeekHeight(peek_height) => {
            behavior.set_peek_height(peek_height);
            model.layout.layout();
            Some(Cmd::Redraw)
        }

        PanelMsg::SetAnchorPoint(anchor_point) => {
            behavior.set_anchor_point(anchor_point);
            model.layout.layout();
            Some(Cmd::Redraw)
        }

        PanelMsg::SetCollapsible(collapsible) => {
            behavior.set_collapsible(collapsible);
            None
        }

        PanelMsg::SetHideable(hideable) => {
            behavior.set_hideable(hideable);
            None
        }
    }
}

//! Settle animation frame handlers

use crate::commands::Cmd;
use crate::messages::SettleMsg;
use crate::model::AppModel;

pub fn update_settle(model: &mut AppModel, msg: SettleMsg) -> Option<Cmd> {
    match msg {
        SettleMsg::Tick { panel, token } => {
            #[cfg(feature = "profile-tracing")]
            let _span = tracing::trace_span!("settle_tick", token = token.0).entered();
            model.layout.settle_tick(panel, token)
        }
    }
}

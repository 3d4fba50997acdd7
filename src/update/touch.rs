//! Pointer input handlers

use crate::commands::Cmd;
use crate::messages::TouchMsg;
use crate::model::AppModel;

pub fn update_touch(model: &mut AppModel, msg: TouchMsg) -> Option<Cmd> {
    model.layout.dispatch_touch(msg.to_event())
}

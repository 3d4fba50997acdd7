//! Save and restore of the sheet state

use tracing::{debug, warn};

use crate::commands::Cmd;
use crate::messages::PersistMsg;
use crate::model::AppModel;
use crate::panel::{BehaviorError, SavedState};

pub fn update_persist(model: &mut AppModel, msg: PersistMsg) -> Option<Cmd> {
    match msg {
        PersistMsg::Save => match save(model) {
            Ok(bytes) => Some(Cmd::PersistState { bytes }),
            Err(e) => {
                warn!(target: "persist", error = %e, "could not save sheet state");
                None
            }
        },

        PersistMsg::Restore(bytes) => match restore(model, &bytes) {
            Ok(()) => {
                model.layout.layout();
                Some(Cmd::Redraw)
            }
            Err(e) => {
                warn!(target: "persist", error = %e, "ignoring saved sheet state");
                None
            }
        },
    }
}

fn save(model: &AppModel) -> Result<Vec<u8>, BehaviorError> {
    let saved = model.layout.save_state(model.panel, None)?;
    debug!(target: "persist", code = saved.state, "saving");
    saved.to_bytes()
}

fn restore(model: &mut AppModel, bytes: &[u8]) -> Result<(), BehaviorError> {
    let saved = SavedState::from_bytes(bytes)?;
    model.layout.restore_state(model.panel, &saved)?;
    Ok(())
}

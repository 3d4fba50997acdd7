//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use crate::host::ViewId;
use crate::panel::SettleToken;

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Panel position changed, repaint
    Redraw,
    /// Run one settle step for `panel` on the next animation frame
    /// Sends Msg::Settle(SettleMsg::Tick) when the frame arrives
    ScheduleSettle { panel: ViewId, token: SettleToken },
    /// Write a serialized `SavedState` to the state file
    PersistState { bytes: Vec<u8> },
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Combine commands, dropping `None`s and flattening single entries
    pub fn batch(cmds: impl IntoIterator<Item = Cmd>) -> Option<Cmd> {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => None,
            1 => cmds.pop(),
            _ => Some(Cmd::Batch(cmds)),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Cmd::None)
    }

    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::Redraw | Cmd::ScheduleSettle { .. } => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            _ => false,
        }
    }

    /// Settle token carried by this command tree, if any
    pub fn settle_token(&self) -> Option<SettleToken> {
        match self {
            Cmd::ScheduleSettle { token, .. } => Some(*token),
            Cmd::Batch(cmds) => cmds.iter().find_map(|c| c.settle_token()),
            _ => None,
        }
    }
}

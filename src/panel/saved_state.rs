//! Persisted panel state
//!
//! Only the state code is stored. Whatever the host saved for the view itself
//! rides along in `super_state` untouched.

use serde::{Deserialize, Serialize};

use super::{BehaviorError, PanelState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    /// Opaque host view state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_state: Option<Vec<u8>>,
    /// `PanelState::code()` at save time
    pub state: i32,
}

impl SavedState {
    pub fn new(super_state: Option<Vec<u8>>, state: PanelState) -> Self {
        Self {
            super_state,
            state: state.code(),
        }
    }

    /// The state a restore should land in
    ///
    /// `Dragging` cannot be resumed and comes back as `Collapsed`.
    pub fn restored_state(&self) -> Result<PanelState, BehaviorError> {
        match PanelState::from_code(self.state)? {
            PanelState::Dragging => Ok(PanelState::Collapsed),
            state => Ok(state),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, BehaviorError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BehaviorError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

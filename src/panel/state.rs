//! Panel states and the two-slot state machine
//!
//! The panel is always in exactly one [`PanelState`]. The machine also remembers
//! the last *stable* state so an interrupted gesture can be recovered from.

use serde::{Deserialize, Serialize};

use crate::panel::BehaviorError;

/// Position class of the panel
///
/// Integer codes match the persisted representation (see [`PanelState::code`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelState {
    /// A live touch or scroll-driven move is in progress
    Dragging,
    /// Pinned at the anchor offset
    Blocked,
    /// Resting at the anchor offset
    AnchorPoint,
    /// Top at the minimum offset, fully visible
    Expanded,
    /// Top at the maximum offset, only the peek band visible
    Collapsed,
    /// Top at the parent's bottom edge, off screen
    Hidden,
}

impl PanelState {
    pub const ALL: [PanelState; 6] = [
        PanelState::Dragging,
        PanelState::Blocked,
        PanelState::AnchorPoint,
        PanelState::Expanded,
        PanelState::Collapsed,
        PanelState::Hidden,
    ];

    /// Stable integer code used for persistence
    pub fn code(self) -> i32 {
        match self {
            PanelState::Dragging => 1,
            PanelState::Blocked => 2,
            PanelState::AnchorPoint => 3,
            PanelState::Expanded => 4,
            PanelState::Collapsed => 5,
            PanelState::Hidden => 6,
        }
    }

    pub fn from_code(code: i32) -> Result<Self, BehaviorError> {
        PanelState::ALL
            .into_iter()
            .find(|state| state.code() == code)
            .ok_or(BehaviorError::UnknownStateCode(code))
    }

    /// Whether the state describes a resting position (anything but `Dragging`)
    pub fn is_stable(self) -> bool {
        self != PanelState::Dragging
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PanelState::Dragging => "dragging",
            PanelState::Blocked => "blocked",
            PanelState::AnchorPoint => "anchor_point",
            PanelState::Expanded => "expanded",
            PanelState::Collapsed => "collapsed",
            PanelState::Hidden => "hidden",
        }
    }
}

impl std::fmt::Display for PanelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Current state plus the last stable one
///
/// `last_stable` is never `Dragging`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateMachine {
    current: PanelState,
    last_stable: PanelState,
}

impl StateMachine {
    pub fn new(initial: PanelState) -> Self {
        let last_stable = if initial.is_stable() {
            initial
        } else {
            PanelState::AnchorPoint
        };
        Self {
            current: initial,
            last_stable,
        }
    }

    pub fn current(&self) -> PanelState {
        self.current
    }

    pub fn last_stable(&self) -> PanelState {
        self.last_stable
    }

    /// Move to `state`, returning the previous one
    pub fn transition(&mut self, state: PanelState) -> PanelState {
        let previous = self.current;
        self.current = state;
        if state.is_stable() {
            self.last_stable = state;
        }
        previous
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new(PanelState::AnchorPoint)
    }
}

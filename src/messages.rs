//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::time::Instant;

use crate::host::ViewId;
use crate::panel::{PanelState, PointerId, ScrollAxes, SettleToken, TouchAction, TouchEvent};

/// Coordinator layout messages
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutMsg {
    /// Coordinator resized; triggers a layout pass
    Resize { width: i32, height: i32 },
    /// Run a layout pass with the current size
    Relayout,
}

/// Raw pointer input, in coordinator coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchMsg {
    Down { pointer: PointerId, x: i32, y: i32, at: Instant },
    Move { pointer: PointerId, x: i32, y: i32, at: Instant },
    Up { pointer: PointerId, x: i32, y: i32, at: Instant },
    Cancel { pointer: PointerId, at: Instant },
}

impl TouchMsg {
    pub fn to_event(self) -> TouchEvent {
        let (action, pointer, x, y, at) = match self {
            TouchMsg::Down { pointer, x, y, at } => (TouchAction::Down, pointer, x, y, at),
            TouchMsg::Move { pointer, x, y, at } => (TouchAction::Move, pointer, x, y, at),
            TouchMsg::Up { pointer, x, y, at } => (TouchAction::Up, pointer, x, y, at),
            TouchMsg::Cancel { pointer, at } => (TouchAction::Cancel, pointer, 0, 0, at),
        };
        TouchEvent {
            action,
            pointer,
            x,
            y,
            at,
        }
    }
}

/// Nested scroll stream from a scrolling descendant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NestedScrollMsg {
    Start { target: ViewId, axes: ScrollAxes },
    /// Content wants to scroll by `dy` (positive = content moves up)
    PreScroll { target: ViewId, dy: i32, at: Instant },
    Stop { target: ViewId },
    Fling { target: ViewId, velocity_y: f32 },
}

/// Animation frame callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleMsg {
    Tick { panel: ViewId, token: SettleToken },
}

/// Programmatic panel control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMsg {
    SetState(PanelState),
    Block,
    Unblock,
    SetPeekHeight(i32),
    SetAnchorPoint(i32),
    SetCollapsible(bool),
    SetHideable(bool),
}

/// State persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistMsg {
    /// Serialize the panel state; produces `Cmd::PersistState`
    Save,
    /// Restore from a previously saved blob
    Restore(Vec<u8>),
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Layout(LayoutMsg),
    Touch(TouchMsg),
    NestedScroll(NestedScrollMsg),
    Settle(SettleMsg),
    Panel(PanelMsg),
    Persist(PersistMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn resize(width: i32, height: i32) -> Self {
        Msg::Layout(LayoutMsg::Resize { width, height })
    }

    pub fn set_state(state: PanelState) -> Self {
        Msg::Panel(PanelMsg::SetState(state))
    }

    pub fn pre_scroll(target: ViewId, dy: i32, at: Instant) -> Self {
        Msg::NestedScroll(NestedScrollMsg::PreScroll { target, dy, at })
    }

    pub fn touch(action: TouchAction, x: i32, y: i32, at: Instant) -> Self {
        let pointer = PointerId::default();
        Msg::Touch(match action {
            TouchAction::Down => TouchMsg::Down { pointer, x, y, at },
            TouchAction::Move => TouchMsg::Move { pointer, x, y, at },
            TouchAction::Up => TouchMsg::Up { pointer, x, y, at },
            TouchAction::Cancel => TouchMsg::Cancel { pointer, at },
        })
    }
}

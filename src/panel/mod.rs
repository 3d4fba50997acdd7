//! Panel system - draggable sheet controller
//!
//! This module moves a panel between a fixed set of vertical positions,
//! reconciling direct drags, nested scrolling from an inner list, and animated
//! settling.
//!
//! ## Architecture
//!
//! - `PanelState` / `StateMachine`: the six states and the last stable one
//! - `Geometry`: min/anchor/max/hidden offsets derived on each layout pass
//! - `TabBehavior`: the controller; owns config, geometry, state, gesture session,
//!   listeners, and the settler
//! - `nested_scroll` / `drag`: the two input paths, both `impl TabBehavior`
//! - `Settler`: token-identified iterative settle toward a target offset
//! - `SavedState`: the persisted state code
//!
//! ## Integration
//!
//! The controller never owns views. It is attached to a panel through
//! `host::CoordinatorLayout`, which feeds it layout, touch, and nested-scroll
//! events and returns `Cmd::ScheduleSettle` to the runtime.

mod behavior;
mod drag;
pub mod geometry;
mod gesture;
pub mod listener;
mod nested_scroll;
mod saved_state;
pub mod settle;
mod state;
pub mod velocity;

pub use behavior::TabBehavior;
pub use drag::{PointerId, TouchAction, TouchEvent};
pub use geometry::Geometry;
pub use gesture::{DragCapture, GestureSession};
pub use listener::{EventLog, ListenerRegistry, PanelEvent, SheetCallback};
pub use nested_scroll::ScrollAxes;
pub use saved_state::SavedState;
pub use settle::{SettleStep, SettleToken, Settler};
pub use state::{PanelState, StateMachine};
pub use velocity::VelocityTracker;

use crate::host::ViewId;

/// Anchor offset used when none is configured
pub const DEFAULT_ANCHOR_POINT: i32 = 700;
/// Fraction of the peek height a release must travel past collapsed to hide
pub const HIDE_THRESHOLD: f32 = 0.5;
/// Share of the release velocity projected onto the hide decision
pub const HIDE_FRICTION: f32 = 0.1;

/// Errors raised by controller operations
///
/// Checks run before any mutation, so a returned error leaves the controller untouched.
#[derive(Debug, thiserror::Error)]
pub enum BehaviorError {
    #[error("Illegal state argument: {0}")]
    IllegalState(PanelState),
    #[error("View {0} is not a child of the coordinator layout")]
    NotInCoordinator(ViewId),
    #[error("View {0} is not associated with a tab behavior")]
    NoTabBehavior(ViewId),
    #[error("Unknown panel state code {0}")]
    UnknownStateCode(i32),
    #[error("Malformed saved state: {0}")]
    SavedState(#[from] serde_json::Error),
}

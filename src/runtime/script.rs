//! YAML session scripts
//!
//! A script is a list of steps replayed against a [`FrameLoop`]. Every input
//! step is followed by one frame, so consecutive scroll or touch steps are one
//! frame interval apart on the virtual clock.
//!
//! ```yaml
//! steps:
//!   - type: start_scroll
//!   - type: scroll
//!     dy: 120
//!   - type: stop_scroll
//!   - type: set_state
//!     state: collapsed
//!   - type: settle
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::FrameLoop;
use crate::messages::{LayoutMsg, Msg, NestedScrollMsg, PanelMsg, PersistMsg, TouchMsg};
use crate::panel::{PanelState, PointerId, ScrollAxes, TouchAction};

/// The session replayed when no script is given
pub const DEMO_SESSION: &str = include_str!("../../samples/demo_session.yaml");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    Resize {
        width: i32,
        height: i32,
    },
    Touch {
        action: TouchAction,
        #[serde(default)]
        x: i32,
        #[serde(default)]
        y: i32,
        #[serde(default)]
        pointer: u32,
    },
    StartScroll,
    /// Positive `dy` scrolls the list content up
    Scroll {
        dy: i32,
    },
    StopScroll,
    Fling {
        velocity_y: f32,
    },
    SetState {
        state: PanelState,
    },
    Block,
    Unblock,
    SetPeekHeight {
        peek_height: i32,
    },
    SetAnchorPoint {
        anchor_point: i32,
    },
    SetCollapsible {
        collapsible: bool,
    },
    SetHideable {
        hideable: bool,
    },
    /// Advance the clock without running frames
    Wait {
        ms: u64,
    },
    /// Run a fixed number of frames
    Frames {
        count: usize,
    },
    /// Run frames until no settle is pending
    Settle,
    Save,
}

impl Script {
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }

    pub fn demo() -> Result<Self, serde_yaml::Error> {
        Self::from_yaml(DEMO_SESSION)
    }

    /// Replay every step; `max_frames` bounds each `settle` step
    pub fn run(&self, frame_loop: &mut FrameLoop, max_frames: usize) {
        for (index, step) in self.steps.iter().enumerate() {
            debug!(target: "script", index, ?step, "step");
            step.apply(frame_loop, max_frames);
        }
    }
}

impl Step {
    fn apply(&self, frame_loop: &mut FrameLoop, max_frames: usize) {
        match *self {
            Step::Wait { ms } => frame_loop.advance(Duration::from_millis(ms)),
            Step::Frames { count } => {
                for _ in 0..count {
                    frame_loop.frame();
                }
            }
            Step::Settle => {
                frame_loop.run_until_idle(max_frames);
            }
            _ => {
                if let Some(msg) = self.to_msg(frame_loop) {
                    frame_loop.dispatch(msg);
                }
                frame_loop.frame();
            }
        }
    }

    /// The message an input step turns into at the loop's current time
    pub fn to_msg(&self, frame_loop: &FrameLoop) -> Option<Msg> {
        let at = frame_loop.now();
        let list = frame_loop.model().list;
        let msg = match *self {
            Step::Resize { width, height } => Msg::Layout(LayoutMsg::Resize { width, height }),
            Step::Touch {
                action,
                x,
                y,
                pointer,
            } => {
                let pointer = PointerId(pointer);
                Msg::Touch(match action {
                    TouchAction::Down => TouchMsg::Down { pointer, x, y, at },
                    TouchAction::Move => TouchMsg::Move { pointer, x, y, at },
                    TouchAction::Up => TouchMsg::Up { pointer, x, y, at },
                    TouchAction::Cancel => TouchMsg::Cancel { pointer, at },
                })
            }
            Step::StartScroll => Msg::NestedScroll(NestedScrollMsg::Start {
                target: list,
                axes: ScrollAxes::VERTICAL,
            }),
            Step::Scroll { dy } => Msg::pre_scroll(list, dy, at),
            Step::StopScroll => Msg::NestedScroll(NestedScrollMsg::Stop { target: list }),
            Step::Fling { velocity_y } => Msg::NestedScroll(NestedScrollMsg::Fling {
                target: list,
                velocity_y,
            }),
            Step::SetState { state } => Msg::set_state(state),
            Step::Block => Msg::Panel(PanelMsg::Block),
            Step::Unblock => Msg::Panel(PanelMsg::Unblock),
            Step::SetPeekHeight { peek_height } => Msg::Panel(PanelMsg::SetPeekHeight(peek_height)),
            Step::SetAnchorPoint { anchor_point } => {
                Msg::Panel(PanelMsg::SetAnchorPoint(anchor_point))
            }
            Step::SetCollapsible { collapsible } => {
                Msg::Panel(PanelMsg::SetCollapsible(collapsible))
            }
            Step::SetHideable { hideable } => Msg::Panel(PanelMsg::SetHideable(hideable)),
            Step::Save => Msg::Persist(PersistMsg::Save),
            Step::Wait { .. } | Step::Frames { .. } | Step::Settle => return None,
        };
        Some(msg)
    }
}

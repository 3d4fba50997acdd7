//! Iterative settle toward a target offset
//!
//! Each settle run is identified by a [`SettleToken`]. Starting a new run or
//! cancelling retires the previous token, so a tick still queued for an older
//! run is recognised as stale and dropped.

use serde::{Deserialize, Serialize};

use super::PanelState;
use crate::host::ViewId;

/// Fraction of the remaining distance covered per tick
pub const DEFAULT_SETTLE_FRACTION: f32 = 0.35;

/// Identity of one settle run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SettleToken(pub u64);

/// The in-flight settle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleRun {
    pub panel: ViewId,
    pub target_top: i32,
    pub target_state: PanelState,
    pub token: SettleToken,
}

/// Outcome of one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettleStep {
    /// Token no longer current, nothing moved
    Stale,
    /// Moved to `top`, more ticks needed
    Continue { top: i32 },
    /// Reached `top`; `state` should now be committed
    Finished { top: i32, state: PanelState },
}

#[derive(Debug, Clone)]
pub struct Settler {
    active: Option<SettleRun>,
    generation: u64,
    fraction: f32,
}

impl Settler {
    pub fn new(fraction: f32) -> Self {
        Self {
            active: None,
            generation: 0,
            fraction: fraction.clamp(0.05, 1.0),
        }
    }

    pub fn active(&self) -> Option<&SettleRun> {
        self.active.as_ref()
    }

    pub fn is_settling(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_current(&self, token: SettleToken) -> bool {
        self.active.is_some_and(|run| run.token == token)
    }

    /// Begin a run from `current_top` to `target_top`
    ///
    /// Any previous run is superseded. Returns `None` when the panel is already
    /// at the target and no ticks are needed.
    pub fn start(
        &mut self,
        panel: ViewId,
        current_top: i32,
        target_top: i32,
        target_state: PanelState,
    ) -> Option<SettleToken> {
        self.generation += 1;
        if current_top == target_top {
            self.active = None;
            return None;
        }
        let token = SettleToken(self.generation);
        self.active = Some(SettleRun {
            panel,
            target_top,
            target_state,
            token,
        });
        Some(token)
    }

    /// Abandon the active run, if any
    pub fn cancel(&mut self) -> Option<SettleRun> {
        self.generation += 1;
        self.active.take()
    }

    /// Advance the run identified by `token` from `current_top`
    pub fn step(&mut self, token: SettleToken, current_top: i32) -> SettleStep {
        let Some(run) = self.active.filter(|run| run.token == token) else {
            return SettleStep::Stale;
        };

        let remaining = run.target_top.saturating_sub(current_top);
        let step = (remaining as f32 * self.fraction).round() as i32;
        let step = if step == 0 { remaining.signum() } else { step };

        if step.abs() >= remaining.abs() {
            self.active = None;
            SettleStep::Finished {
                top: run.target_top,
                state: run.target_state,
            }
        } else {
            SettleStep::Continue {
                top: current_top.saturating_add(step),
            }
        }
    }
}

impl Default for Settler {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE_FRACTION)
    }
}

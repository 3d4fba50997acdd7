//! Headless frame loop
//!
//! Drives `update()` and executes the returned commands. Settle ticks are
//! deferred to the next frame, the way a platform animation callback would
//! deliver them.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::commands::Cmd;
use crate::messages::{Msg, SettleMsg};
use crate::model::AppModel;
use crate::update::update;

pub struct FrameLoop {
    model: AppModel,
    /// Messages delivered at the start of the next frame
    next_frame: Vec<Msg>,
    /// Virtual clock; advances by `frame_interval` per frame
    now: Instant,
    frame_interval: Duration,
    frames: u64,
    redraws: u64,
    state_file: Option<PathBuf>,
    last_persisted: Option<Vec<u8>>,
}

impl FrameLoop {
    pub fn new(model: AppModel) -> Self {
        let frame_interval = Duration::from_millis(model.config.frame_interval_ms.max(1));
        Self {
            model,
            next_frame: Vec::new(),
            now: Instant::now(),
            frame_interval,
            frames: 0,
            redraws: 0,
            state_file: None,
            last_persisted: None,
        }
    }

    /// Write `Cmd::PersistState` payloads to `path`
    pub fn with_state_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_file = Some(path.into());
        self
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut AppModel {
        &mut self.model
    }

    pub fn into_model(self) -> AppModel {
        self.model
    }

    /// Current virtual time
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Move the virtual clock forward without running a frame
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    /// Bytes from the most recent `Cmd::PersistState`
    pub fn last_persisted(&self) -> Option<&[u8]> {
        self.last_persisted.as_deref()
    }

    /// No frame callbacks are pending
    pub fn is_idle(&self) -> bool {
        self.next_frame.is_empty()
    }

    /// Run `msg` through `update()` and execute the result
    pub fn dispatch(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(cmd);
        }
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => self.redraws += 1,
            Cmd::ScheduleSettle { panel, token } => {
                self.redraws += 1;
                self.next_frame
                    .push(Msg::Settle(SettleMsg::Tick { panel, token }));
            }
            Cmd::PersistState { bytes } => {
                if let Some(path) = &self.state_file {
                    if let Err(e) = write_state(path, &bytes) {
                        warn!(target: "persist", path = %path.display(), error = %e, "state write failed");
                    } else {
                        debug!(target: "persist", path = %path.display(), "state written");
                    }
                }
                self.last_persisted = Some(bytes);
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
        }
    }

    /// Advance one frame and deliver pending frame callbacks
    ///
    /// Returns the number of messages delivered.
    pub fn frame(&mut self) -> usize {
        self.now += self.frame_interval;
        self.frames += 1;
        let pending = std::mem::take(&mut self.next_frame);
        let delivered = pending.len();
        for msg in pending {
            self.dispatch(msg);
        }
        delivered
    }

    /// Run frames until nothing is pending or `max_frames` have run
    ///
    /// Returns the number of frames run.
    pub fn run_until_idle(&mut self, max_frames: usize) -> usize {
        let mut ran = 0;
        while !self.is_idle() && ran < max_frames {
            self.frame();
            ran += 1;
        }
        if !self.is_idle() {
            warn!(target: "settle", max_frames, "frame budget exhausted with callbacks pending");
        }
        ran
    }
}

fn write_state(path: &std::path::Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)
}

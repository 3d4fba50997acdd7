//! Scroll velocity from successive delta samples

use std::time::Instant;

/// Pixels-per-second estimate from the latest two samples
///
/// The velocity is the most recent delta divided by the time since the
/// previous sample. A lone sample reports 0.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    previous: Option<Instant>,
    velocity: f32,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, delta: i32, at: Instant) {
        if let Some(previous) = self.previous {
            let elapsed_ms = at.saturating_duration_since(previous).as_secs_f32() * 1000.0;
            // Same-instant samples keep the last estimate
            if elapsed_ms > 0.0 {
                self.velocity = delta as f32 / elapsed_ms * 1000.0;
            }
        }
        self.previous = Some(at);
    }

    /// Latest estimate in pixels per second
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn clear(&mut self) {
        self.previous = None;
        self.velocity = 0.0;
    }
}

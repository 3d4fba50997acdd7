//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging state
//! transitions, nested scroll consumption, and settle runs.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=state=debug,nested_scroll=trace` - scoped filtering
//! - `RUST_LOG=tabsheet::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/tabsheet/logs/tabsheet.log` with daily rotation.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::AppModel;
use crate::panel::PanelState;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). The file layer always
/// records debug level.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "tabsheet.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of the sheet for diffing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetSnapshot {
    pub state: PanelState,
    pub last_stable: PanelState,
    pub top: Option<i32>,
}

impl SheetSnapshot {
    /// `None` when the model's panel has no tab behavior
    pub fn capture(model: &AppModel) -> Option<Self> {
        let behavior = model.behavior().ok()?;
        Some(Self {
            state: behavior.state(),
            last_stable: behavior.last_stable_state(),
            top: model.panel_top(),
        })
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &SheetSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.state != other.state {
            changes.push(format!("state: {} → {}", self.state, other.state));
        }
        if self.last_stable != other.last_stable {
            changes.push(format!(
                "last stable: {} → {}",
                self.last_stable, other.last_stable
            ));
        }
        if self.top != other.top {
            changes.push(format!("top: {:?} → {:?}", self.top, other.top));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

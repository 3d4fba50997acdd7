//! Sheet configuration persistence
//!
//! Stores panel behavior settings in `~/.config/tabsheet/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::panel::settle::DEFAULT_SETTLE_FRACTION;
use crate::panel::{PanelState, DEFAULT_ANCHOR_POINT};

/// Per-panel behavior settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Visible height while collapsed, in pixels
    pub peek_height: i32,
    /// Whether the panel may be moved fully off screen
    pub hideable: bool,
    /// Whether `Collapsed` is reachable; when false downward motion stops at the anchor
    pub collapsible: bool,
    /// Top offset of the anchor resting position
    pub anchor_point: i32,
    /// State the panel starts in before anything is restored
    pub default_state: PanelState,
    /// Release velocities below this (pixels/second) count as "no fling"
    pub minimum_fling_velocity: f32,
    /// Distance a pointer must travel before a captured drag starts moving the panel
    pub touch_slop: i32,
    /// Settle to a resting state when a drag is released
    ///
    /// Off by default: the panel stays where the finger lifted.
    pub settle_on_release: bool,
    /// Fraction of the remaining distance covered per settle tick
    pub settle_fraction: f32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            peek_height: 0,
            hideable: false,
            collapsible: true,
            anchor_point: DEFAULT_ANCHOR_POINT,
            default_state: PanelState::AnchorPoint,
            minimum_fling_velocity: 150.0,
            touch_slop: 8,
            settle_on_release: false,
            settle_fraction: DEFAULT_SETTLE_FRACTION,
        }
    }
}

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    #[serde(default)]
    pub behavior: BehaviorConfig,
    /// Milliseconds between animation frames in the runtime
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    /// Upper bound on frames the runtime runs while waiting for settles
    #[serde(default = "default_max_frames")]
    pub max_frames: usize,
}

fn default_frame_interval_ms() -> u64 {
    16
}

fn default_max_frames() -> usize {
    600
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            behavior: BehaviorConfig::default(),
            frame_interval_ms: default_frame_interval_ms(),
            max_frames: default_max_frames(),
        }
    }
}

impl SheetConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to `path`
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

//! Configuration system tests
//!
//! Tests for config paths and sheet config loading/saving.

use tabsheet::config::{BehaviorConfig, SheetConfig};
use tabsheet::config_paths;
use tabsheet::panel::{PanelState, DEFAULT_ANCHOR_POINT};

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_named_after_app() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.ends_with("tabsheet"), "got {}", dir.display());
    }
}

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(path) = config_paths::config_file() {
        assert!(path.to_string_lossy().ends_with("config.yaml"));
    }
}

#[test]
fn test_state_file_beside_config() {
    if let (Some(state), Some(config)) = (config_paths::state_file(), config_paths::config_file()) {
        assert_eq!(state.parent(), config.parent());
        assert!(state.to_string_lossy().ends_with("state.json"));
    }
}

#[test]
fn test_logs_dir_inside_config_dir() {
    if let (Some(logs), Some(dir)) = (config_paths::logs_dir(), config_paths::config_dir()) {
        assert!(logs.starts_with(dir));
    }
}

// ========================================================================
// Sheet Config Tests
// ========================================================================

#[test]
fn test_behavior_defaults() {
    let config = BehaviorConfig::default();
    assert_eq!(config.peek_height, 0);
    assert!(!config.hideable);
    assert!(config.collapsible);
    assert_eq!(config.anchor_point, DEFAULT_ANCHOR_POINT);
    assert_eq!(config.default_state, PanelState::AnchorPoint);
    assert!(!config.settle_on_release);
}

#[test]
fn test_partial_yaml_fills_defaults() {
    let config: SheetConfig = serde_yaml::from_str(
        "behavior:\n  peek_height: 120\n  hideable: true\n  default_state: collapsed\n",
    )
    .unwrap();
    assert_eq!(config.behavior.peek_height, 120);
    assert!(config.behavior.hideable);
    assert_eq!(config.behavior.default_state, PanelState::Collapsed);
    assert!(config.behavior.collapsible);
    assert_eq!(config.frame_interval_ms, 16);
    assert_eq!(config.max_frames, 600);
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let mut config = SheetConfig::default();
    config.behavior.anchor_point = 320;
    config.behavior.settle_on_release = true;
    config.max_frames = 42;
    config.save_to(&path).unwrap();

    assert_eq!(SheetConfig::load_from(&path), config);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = SheetConfig::load_from(&dir.path().join("absent.yaml"));
    assert_eq!(config, SheetConfig::default());
}

#[test]
fn test_malformed_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "behavior: [not, a, map").unwrap();
    assert_eq!(SheetConfig::load_from(&path), SheetConfig::default());
}

#[test]
fn test_default_state_applies_to_new_sheet() {
    let behavior = tabsheet::TabBehavior::new(BehaviorConfig {
        default_state: PanelState::Expanded,
        ..BehaviorConfig::default()
    });
    assert_eq!(behavior.state(), PanelState::Expanded);
    assert_eq!(behavior.last_stable_state(), PanelState::Expanded);
}

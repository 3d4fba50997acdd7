//! tabsheet - draggable bottom-sheet controller
//!
//! The controller moves a panel between expanded, anchor, collapsed, and
//! hidden offsets in response to drags and nested scrolling, following the
//! Elm Architecture: `Msg` in, `update()` mutates the `AppModel`, `Cmd` out.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod host;
pub mod messages;
pub mod model;
pub mod panel;
pub mod runtime;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::SheetConfig;
pub use messages::Msg;
pub use model::AppModel;
pub use panel::{PanelState, TabBehavior};

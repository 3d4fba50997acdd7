//! Runtime module - headless command execution
//!
//! - `frame_loop` - executes `Cmd`s and delivers frame callbacks
//! - `script` - YAML session scripts replayed through the frame loop

pub mod frame_loop;
pub mod script;

pub use frame_loop::FrameLoop;
pub use script::{Script, Step};

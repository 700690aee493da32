//! Platform abstraction layer
//!
//! Backend-independent pieces of the event loop:
//! - Fixed-rate tick scheduling
//! - Mapping raw input events to game commands

pub mod input;
pub mod time;

pub use input::{Command, InputEvent, Key, MouseButton};
pub use time::FrameClock;

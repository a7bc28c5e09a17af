//! Data models for Gaze Replay.
//!
//! This module contains the core data structures shared across the crate:
//! - Frame (decoded image + index + recording-relative timestamp)
//! - Gaze samples and coordinate conversion
//! - Input events forwarded by the windowing layer
//! - Draw commands collected during the plugin render pass

mod draw;
mod frame;
mod gaze;
mod input;

pub use draw::{Canvas, Color, DrawCommand};
pub use frame::Frame;
pub use gaze::GazeSample;
pub use input::{ClickAction, MouseButton, SessionInput};

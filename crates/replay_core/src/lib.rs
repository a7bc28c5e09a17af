//! Replay Core - Backend logic for Gaze Replay
//!
//! This crate contains all replay logic with zero UI dependencies:
//! gaze-to-frame correlation, playback pacing, the plugin engine,
//! recording-directory loading, and session settings. The windowing
//! layer and the video decoder are consumed through the `session::Display`
//! and `capture::CaptureSource` traits.

pub mod capture;
pub mod clock;
pub mod correlate;
pub mod logging;
pub mod models;
pub mod plugins;
pub mod recording;
pub mod session;
pub mod settings;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

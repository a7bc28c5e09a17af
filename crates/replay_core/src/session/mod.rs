//! Session runtime: the composition root's main loop and the display
//! boundary it drives.
//!
//! One cooperative control flow per session: capture, correlate-lookup,
//! plugin update pass, pacing wait, render pass, present, reap, input.
//! Cancellation is observed between iterations through a shared close
//! flag; the only suspension point is the bounded pacing wait.

mod display;
mod runtime;

pub use display::{Display, DisplayError, HeadlessDisplay, InputQueue};
pub use runtime::{CloseHandle, SessionReport, SessionRuntime};

use thiserror::Error;

use crate::capture::CaptureError;
use crate::recording::RecordingError;
use crate::settings::SettingsError;

/// Errors surfaced by the session composition root.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Recording(#[from] RecordingError),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Display(#[from] DisplayError),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

//! Input events delivered by the windowing layer.

use serde_json::{Map, Value};

/// Mouse button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Press/release phase of a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    Press,
    Release,
}

/// Events the session drains from the display once per loop iteration.
///
/// Click positions arrive in window-pixel coordinates; the session
/// converts them to image-pixel coordinates of the current frame before
/// broadcasting to plugins.
#[derive(Debug, Clone)]
pub enum SessionInput {
    /// Window-close request or explicit exit control.
    Close,
    /// Toggle play/pause.
    TogglePlay,
    /// Step one frame forward (works while paused).
    StepForward,
    /// Step one frame back (works while paused).
    StepBack,
    /// Jump to an absolute frame index.
    Seek(usize),
    /// Pointer click in window-pixel coordinates.
    Click {
        pos: (f64, f64),
        button: MouseButton,
        action: ClickAction,
    },
    /// User request to open a plugin by type name.
    OpenPlugin {
        name: String,
        args: Map<String, Value>,
    },
}

//! Plugin engine: contract, catalog, and scheduler.
//!
//! Plugins observe and annotate each replayed frame. The scheduler owns
//! the ordered collection of live instances, enforces additive/exclusive
//! constraints, drives the per-frame update and render passes, isolates
//! individual plugin failure, and serializes plugin configuration for the
//! persisted session settings.

mod catalog;
mod scheduler;
pub mod vis;

pub use catalog::{PluginCatalog, PluginFactory, PluginKind};
pub use scheduler::{PluginScheduler, DEFAULT_PLUGINS};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{Canvas, ClickAction, Frame, GazeSample, MouseButton};

/// Constructor-argument mapping for a plugin instance.
pub type PluginArgs = Map<String, Value>;

/// Persisted initializer for a plugin instance: type name plus the
/// arguments needed to reconstruct it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginInit {
    pub name: String,
    #[serde(default)]
    pub args: PluginArgs,
}

impl PluginInit {
    pub fn new(name: impl Into<String>, args: PluginArgs) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// Errors raised at the plugin boundary.
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("unknown plugin type '{0}'")]
    UnknownType(String),

    #[error("invalid arguments for plugin '{name}': {message}")]
    InvalidArgs { name: String, message: String },

    /// Unrecoverable fault inside a plugin's update or render path.
    /// Caught at the scheduler boundary and treated as self-termination.
    #[error("plugin fault: {0}")]
    Fault(String),
}

impl PluginError {
    /// Create an invalid-arguments error.
    pub fn invalid_args(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgs {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a fault error.
    pub fn fault(message: impl Into<String>) -> Self {
        Self::Fault(message.into())
    }
}

/// Result type for plugin operations.
pub type PluginResult<T> = Result<T, PluginError>;

/// Per-iteration event list shared across the update pass.
///
/// This is the sole inter-plugin communication channel: a plugin pushes
/// events and every later plugin in the same pass observes them, which is
/// why the order key constitutes a dependency contract (a filter must run
/// before the plugin that renders filtered results).
#[derive(Debug, Clone, PartialEq)]
pub enum PluginEvent {
    /// Trailing window of gaze history, emitted by the scan path plugin.
    GazeTrail(Vec<GazeSample>),
    /// Gaze samples classified as fixations, emitted by the fixation filter.
    FilteredGaze(Vec<GazeSample>),
    /// Free-form event for plugins outside the builtin set.
    Custom(String, Value),
}

/// Contract every plugin instance satisfies.
///
/// `update` and `render` are required; the remaining hooks are optional
/// capabilities with no-op defaults. A plugin that does not override
/// `init_args` is non-persistable and silently skipped on serialize.
pub trait Plugin {
    /// Stable type identity, matching the catalog entry name.
    fn kind(&self) -> &'static str;

    /// Execution order key; lower runs earlier, ties keep insertion order.
    fn order(&self) -> f64;

    /// Per-frame work. The frame is a private copy the plugin may mutate;
    /// the gaze list is read-only; events are the shared pass-local sink.
    fn update(
        &mut self,
        frame: &mut Frame,
        gaze: &[GazeSample],
        events: &mut Vec<PluginEvent>,
    ) -> PluginResult<()>;

    /// Visual presentation only: read the frame, emit draw commands.
    fn render(&mut self, frame: &Frame, canvas: &mut Canvas) -> PluginResult<()>;

    /// Liveness flag; a plugin self-terminates by returning false.
    fn alive(&self) -> bool {
        true
    }

    /// GUI-initialization hook, invoked exactly once after insertion.
    fn init_gui(&mut self) {}

    /// Pointer input in image-pixel coordinates; broadcast, not bubbling.
    fn on_click(&mut self, _pos: (f64, f64), _button: MouseButton, _action: ClickAction) {}

    /// Reconstructable constructor arguments for persistence, or `None`
    /// if this instance opts out of being saved.
    fn init_args(&self) -> Option<PluginArgs> {
        None
    }

    /// Teardown; the scheduler guarantees exactly one invocation, during
    /// reap or session shutdown.
    fn close(&mut self) {}
}

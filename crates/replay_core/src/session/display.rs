//! Display boundary.
//!
//! The runtime never talks to a window system directly; it hands each
//! finished frame plus its overlay draw list to a [`Display`] and drains
//! user input from the same object. Window backends live outside this
//! crate and implement the trait; [`HeadlessDisplay`] is the in-crate
//! implementation used by tests and batch runs.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

use crate::models::{DrawCommand, Frame, SessionInput};

/// Failure reported by a display backend while presenting a frame.
#[derive(Error, Debug)]
#[error("display backend failed: {0}")]
pub struct DisplayError(pub String);

impl DisplayError {
    pub fn new(message: impl Into<String>) -> Self {
        DisplayError(message.into())
    }
}

/// Output and input boundary of a session.
///
/// `present` receives the frame after the update pass together with the
/// overlay commands produced by the render pass; the backend decides how
/// to rasterize them. `poll` returns the inputs accumulated since the
/// previous call, oldest first.
pub trait Display {
    fn present(&mut self, frame: &Frame, overlay: &[DrawCommand]) -> Result<(), DisplayError>;

    fn poll(&mut self) -> Vec<SessionInput>;

    /// Current window size in window pixels, used to map click
    /// coordinates onto the frame.
    fn window_size(&self) -> (u32, u32);
}

/// Thread-safe input queue shared between a display backend and whatever
/// produces events for it.
///
/// Cloning is cheap; all clones feed the same queue.
#[derive(Clone, Default)]
pub struct InputQueue {
    inner: Arc<Mutex<VecDeque<SessionInput>>>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, input: SessionInput) {
        self.inner.lock().push_back(input);
    }

    /// Removes and returns all queued inputs, oldest first.
    pub fn drain(&self) -> Vec<SessionInput> {
        self.inner.lock().drain(..).collect()
    }
}

/// Display backend without a window.
///
/// Counts presented frames and can inject a `Close` once a given frame
/// index or presentation count has been reached, which gives scripted
/// runs a deterministic way to terminate.
pub struct HeadlessDisplay {
    window_size: (u32, u32),
    inputs: InputQueue,
    close_after_index: Option<usize>,
    close_after_presents: Option<usize>,
    presented: usize,
    last_index: Option<usize>,
}

impl HeadlessDisplay {
    pub fn new(window_size: (u32, u32)) -> Self {
        HeadlessDisplay {
            window_size,
            inputs: InputQueue::new(),
            close_after_index: None,
            close_after_presents: None,
            presented: 0,
            last_index: None,
        }
    }

    /// Queues a `Close` as soon as a frame with at least this index has
    /// been presented.
    pub fn close_after_frame(mut self, index: usize) -> Self {
        self.close_after_index = Some(index);
        self
    }

    /// Queues a `Close` once this many frames have been presented,
    /// repeats of the same frame included.
    pub fn close_after_presents(mut self, count: usize) -> Self {
        self.close_after_presents = Some(count);
        self
    }

    /// Handle for feeding inputs into the display from outside.
    pub fn input_queue(&self) -> InputQueue {
        self.inputs.clone()
    }

    pub fn frames_presented(&self) -> usize {
        self.presented
    }

    pub fn last_presented_index(&self) -> Option<usize> {
        self.last_index
    }
}

impl Display for HeadlessDisplay {
    fn present(&mut self, frame: &Frame, _overlay: &[DrawCommand]) -> Result<(), DisplayError> {
        self.presented += 1;
        self.last_index = Some(frame.index);

        let index_reached = self
            .close_after_index
            .is_some_and(|limit| frame.index >= limit);
        let count_reached = self
            .close_after_presents
            .is_some_and(|limit| self.presented >= limit);
        if index_reached || count_reached {
            self.inputs.push(SessionInput::Close);
        }
        Ok(())
    }

    fn poll(&mut self) -> Vec<SessionInput> {
        self.inputs.drain()
    }

    fn window_size(&self) -> (u32, u32) {
        self.window_size
    }
}

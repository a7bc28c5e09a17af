//! The replay loop.
//!
//! Each iteration works on a private copy of the current frame: fetch
//! (when playing or after a seek), run the plugin update pass, wait out
//! the recorded inter-frame gap, run the render pass, present, reap dead
//! plugins, then apply user input. Pausing keeps the loop alive so the
//! last frame stays responsive to clicks and plugin changes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::capture::{CaptureError, CaptureSource};
use crate::clock::PlaybackClock;
use crate::correlate::GazeIndex;
use crate::models::{Canvas, Frame, SessionInput};
use crate::plugins::{PluginInit, PluginScheduler};
use crate::session::{Display, SessionError, SessionResult};

/// Poll interval while paused. Keeps input latency low without spinning.
const IDLE_POLL: Duration = Duration::from_millis(5);

/// Shared flag for requesting session shutdown from another thread.
#[derive(Clone)]
pub struct CloseHandle {
    flag: Arc<AtomicBool>,
}

impl CloseHandle {
    fn new() -> Self {
        CloseHandle {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn request_close(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// What a finished session leaves behind.
pub struct SessionReport {
    /// Number of present calls made, repeats while paused included.
    pub frames_presented: usize,
    /// Initializers of the plugins that were live at shutdown, in
    /// execution order. The caller persists these for the next run.
    pub plugin_initializers: Vec<PluginInit>,
}

/// Drives one replay session over a capture source and a display.
pub struct SessionRuntime<C: CaptureSource, D: Display> {
    capture: C,
    display: D,
    gaze: GazeIndex,
    scheduler: PluginScheduler,
    clock: PlaybackClock,
    close: CloseHandle,
    play: bool,
    new_seek: bool,
    current: Option<Frame>,
}

impl<C: CaptureSource, D: Display> SessionRuntime<C, D> {
    /// Builds a runtime positioned at the start of the stream, paused.
    pub fn new(capture: C, display: D, gaze: GazeIndex, scheduler: PluginScheduler) -> Self {
        SessionRuntime {
            capture,
            display,
            gaze,
            scheduler,
            clock: PlaybackClock::new(),
            close: CloseHandle::new(),
            play: false,
            // The first iteration must fetch a frame even when paused.
            new_seek: true,
            current: None,
        }
    }

    pub fn set_playing(&mut self, play: bool) {
        self.play = play;
    }

    pub fn is_playing(&self) -> bool {
        self.play
    }

    /// Handle other threads can use to request shutdown.
    pub fn close_handle(&self) -> CloseHandle {
        self.close.clone()
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Runs the replay loop until close is requested or the stream turns
    /// out to be empty, then tears down all plugins.
    ///
    /// Returns the initializers of the plugins still live at shutdown so
    /// the caller can persist them.
    pub fn run(&mut self) -> SessionResult<SessionReport> {
        let mut frames_presented = 0usize;

        loop {
            if self.close.is_closed() {
                break;
            }

            let mut advanced = false;
            if self.play || self.new_seek {
                match self.capture.next_frame() {
                    Ok(frame) => {
                        if self.new_seek {
                            self.clock.reset_to(frame.timestamp);
                        }
                        self.current = Some(frame);
                        advanced = true;
                    }
                    Err(CaptureError::EndOfStream) => {
                        tracing::debug!("reached end of stream, pausing");
                        self.play = false;
                    }
                    Err(e) => return Err(SessionError::Capture(e)),
                }
                self.new_seek = false;
            }

            let Some(source) = self.current.as_ref() else {
                tracing::debug!("stream is empty, nothing to replay");
                break;
            };

            // Plugins get a private copy; the cached frame stays pristine
            // for the next iteration.
            let mut frame = source.clone();
            let gaze = self.gaze.samples_for(frame.index);
            let mut events = Vec::new();
            self.scheduler.update(&mut frame, &gaze, &mut events);

            if advanced {
                let wait = self.clock.tick(frame.timestamp);
                if !wait.is_zero() {
                    thread::sleep(wait);
                }
            } else {
                thread::sleep(IDLE_POLL);
            }

            let mut canvas = Canvas::new();
            self.scheduler.render(&frame, &mut canvas);
            self.display.present(&frame, canvas.commands())?;
            frames_presented += 1;

            self.scheduler.reap();

            for input in self.display.poll() {
                self.handle_input(input);
            }
        }

        let plugin_initializers = self.scheduler.serialize();
        self.scheduler.close_all();
        tracing::debug!("session finished after {} presented frames", frames_presented);
        Ok(SessionReport {
            frames_presented,
            plugin_initializers,
        })
    }

    fn handle_input(&mut self, input: SessionInput) {
        match input {
            SessionInput::Close => {
                tracing::debug!("close requested");
                self.close.request_close();
            }
            SessionInput::TogglePlay => {
                self.play = !self.play;
                tracing::debug!("playback {}", if self.play { "resumed" } else { "paused" });
            }
            SessionInput::StepForward => {
                self.new_seek = true;
            }
            SessionInput::StepBack => {
                // The cursor sits one past the displayed frame.
                let target = self.capture.frame_index().saturating_sub(2);
                match self.capture.seek_to_frame(target) {
                    Ok(()) => self.new_seek = true,
                    Err(e) => tracing::warn!("step back failed: {}", e),
                }
            }
            SessionInput::Seek(index) => {
                let last = self.capture.frame_count().saturating_sub(1);
                match self.capture.seek_to_frame(index.min(last)) {
                    Ok(()) => self.new_seek = true,
                    Err(e) => tracing::warn!("seek to frame {} failed: {}", index, e),
                }
            }
            SessionInput::Click { pos, button, action } => {
                let (win_w, win_h) = self.display.window_size();
                let (img_w, img_h) = self.capture.frame_size();
                let mapped = (
                    pos.0 / win_w as f64 * img_w as f64,
                    pos.1 / win_h as f64 * img_h as f64,
                );
                self.scheduler.click(mapped, button, action);
            }
            SessionInput::OpenPlugin { name, args } => {
                if let Err(e) = self.scheduler.open(&name, &args) {
                    tracing::warn!("could not open plugin '{}': {}", name, e);
                }
            }
        }
    }
}

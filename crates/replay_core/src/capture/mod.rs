//! Capture source boundary.
//!
//! The video decoder is an external collaborator; this module specifies
//! the interface the session consumes and provides a synthetic,
//! timestamp-driven implementation for headless runs and tests.

use image::{Rgba, RgbaImage};
use thiserror::Error;

use crate::models::Frame;

/// Errors raised at the capture boundary.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// The stream has no further frames. Recovered locally by the session
    /// (playback pauses at the last frame); never fatal mid-run.
    #[error("end of video stream reached")]
    EndOfStream,

    /// Seek target outside the stream.
    #[error("seek target {index} out of range (frame count {count})")]
    SeekOutOfRange { index: usize, count: usize },
}

/// Result type for capture operations.
pub type CaptureResult<T> = Result<T, CaptureError>;

/// A seekable, frame-indexed video source.
pub trait CaptureSource {
    /// Decode and return the next frame, advancing the cursor.
    fn next_frame(&mut self) -> CaptureResult<Frame>;

    /// Position the cursor so the next `next_frame` returns `index`.
    fn seek_to_frame(&mut self, index: usize) -> CaptureResult<()>;

    /// Index of the frame the next `next_frame` call will return.
    fn frame_index(&self) -> usize;

    /// Total number of frames in the stream.
    fn frame_count(&self) -> usize;

    /// Nominal frame rate of the recording.
    fn frame_rate(&self) -> f64;

    /// Frame size as (width, height).
    fn frame_size(&self) -> (u32, u32);
}

/// Capture source that synthesizes uniform frames from a timestamp list.
///
/// Stands in for the real decoder when replaying headless or under test;
/// timing and indexing behave exactly like a decoded stream.
pub struct SyntheticCapture {
    timestamps: Vec<f64>,
    size: (u32, u32),
    fill: Rgba<u8>,
    cursor: usize,
}

impl SyntheticCapture {
    /// Create a source over the given frame timestamps.
    pub fn new(timestamps: Vec<f64>, size: (u32, u32)) -> Self {
        Self {
            timestamps,
            size,
            fill: Rgba([32, 32, 32, 255]),
            cursor: 0,
        }
    }

    /// Use a different fill color for generated frames.
    pub fn with_fill(mut self, fill: Rgba<u8>) -> Self {
        self.fill = fill;
        self
    }
}

impl CaptureSource for SyntheticCapture {
    fn next_frame(&mut self) -> CaptureResult<Frame> {
        let ts = *self
            .timestamps
            .get(self.cursor)
            .ok_or(CaptureError::EndOfStream)?;
        let frame = Frame::new(
            self.cursor,
            ts,
            RgbaImage::from_pixel(self.size.0, self.size.1, self.fill),
        );
        self.cursor += 1;
        Ok(frame)
    }

    fn seek_to_frame(&mut self, index: usize) -> CaptureResult<()> {
        if index > self.timestamps.len() {
            return Err(CaptureError::SeekOutOfRange {
                index,
                count: self.timestamps.len(),
            });
        }
        self.cursor = index;
        Ok(())
    }

    fn frame_index(&self) -> usize {
        self.cursor
    }

    fn frame_count(&self) -> usize {
        self.timestamps.len()
    }

    fn frame_rate(&self) -> f64 {
        match (self.timestamps.first(), self.timestamps.last()) {
            (Some(first), Some(last)) if last > first => {
                (self.timestamps.len() - 1) as f64 / (last - first)
            }
            _ => 0.0,
        }
    }

    fn frame_size(&self) -> (u32, u32) {
        self.size
    }
}

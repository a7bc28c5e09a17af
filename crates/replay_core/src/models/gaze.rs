//! Gaze sample type and coordinate conversion.

use serde::{Deserialize, Serialize};

/// One timestamped gaze-position observation.
///
/// Positions are normalized to `[0,1] x [0,1]` with the origin at the
/// bottom-left of the scene image (recording convention). Any trailing
/// columns of the source row (confidence, pupil diameter, ...) are kept
/// in `extras` and passed through unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GazeSample {
    /// Recording-relative timestamp in seconds.
    pub timestamp: f64,
    /// Normalized gaze position (x, y).
    pub norm_pos: (f64, f64),
    /// Opaque per-sample payload, passed through unmodified.
    #[serde(default)]
    pub extras: Vec<f64>,
}

impl GazeSample {
    /// Create a sample without extra payload.
    pub fn new(timestamp: f64, x: f64, y: f64) -> Self {
        Self {
            timestamp,
            norm_pos: (x, y),
            extras: Vec::new(),
        }
    }

    /// Denormalize to image-pixel coordinates for an image of the given
    /// size, flipping the y axis (normalized origin is bottom-left,
    /// image origin is top-left).
    pub fn pixel_pos(&self, size: (u32, u32)) -> (f64, f64) {
        let (w, h) = (size.0 as f64, size.1 as f64);
        (self.norm_pos.0 * w, (1.0 - self.norm_pos.1) * h)
    }
}

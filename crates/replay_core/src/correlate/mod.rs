//! Gaze-to-frame correlation.
//!
//! Maps an independently sampled gaze stream onto video frames. Both
//! inputs are time-sorted, so assignment is a single two-pointer merge:
//! each sample attaches to the frame whose timestamp is nearest, with
//! ties broken toward the earlier frame. Pure functions, no I/O.

use crate::models::GazeSample;

/// Assign every gaze sample to its nearest frame.
///
/// Returns one bucket per frame timestamp; `buckets[i]` holds all samples
/// whose timestamp is closest to `timestamps[i]`. Samples before the first
/// frame attach to frame 0, samples after the last frame attach to the
/// final frame. O(N + M) over frames and samples.
pub fn correlate_gaze(gaze: &[GazeSample], timestamps: &[f64]) -> Vec<Vec<GazeSample>> {
    let mut buckets: Vec<Vec<GazeSample>> = vec![Vec::new(); timestamps.len()];
    if timestamps.is_empty() {
        return buckets;
    }

    let mut frame = 0usize;
    for sample in gaze {
        // Distance to candidate frames is unimodal in frame index, so
        // advance while the next frame is strictly closer. Equal distance
        // keeps the earlier frame.
        while frame + 1 < timestamps.len()
            && (timestamps[frame + 1] - sample.timestamp).abs()
                < (timestamps[frame] - sample.timestamp).abs()
        {
            frame += 1;
        }
        buckets[frame].push(sample.clone());
    }

    buckets
}

/// Immutable per-recording lookup from frame index to gaze samples.
///
/// Built once per loaded recording; queries are O(1) and return a fresh
/// copy so one plugin's view can never leak into another's.
#[derive(Debug, Clone)]
pub struct GazeIndex {
    buckets: Vec<Vec<GazeSample>>,
}

impl GazeIndex {
    /// Correlate the gaze stream against the frame timestamps.
    pub fn build(gaze: &[GazeSample], timestamps: &[f64]) -> Self {
        Self {
            buckets: correlate_gaze(gaze, timestamps),
        }
    }

    /// Number of frames in the index.
    pub fn frame_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of samples across all buckets.
    pub fn sample_count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Samples correlated to the given frame, as a fresh copy.
    ///
    /// Out-of-range indices yield an empty list.
    pub fn samples_for(&self, frame_index: usize) -> Vec<GazeSample> {
        self.buckets.get(frame_index).cloned().unwrap_or_default()
    }
}

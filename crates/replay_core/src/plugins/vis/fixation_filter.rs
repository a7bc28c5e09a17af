//! Dispersion-based fixation/saccade classification.
//!
//! Sliding-window method after Salvucci & Goldberg (ETRA 2000): sample
//! the middle of the recent gaze trail, compare every neighbor within a
//! +-200 ms slice against a pixel-distance threshold, and require at
//! least 100 ms of supporting samples before calling it a fixation.

use serde::{Deserialize, Serialize};

use crate::models::{Canvas, Color, Frame, GazeSample};
use crate::plugins::{Plugin, PluginArgs, PluginEvent, PluginResult};

const SACCADE_COLOR: Color = [255, 150, 0, 100];

/// Half of the maximum saccade duration: the look-behind/look-ahead slice.
const WINDOW_HALF_SECS: f64 = 0.2;
/// Minimum fixation duration.
const MIN_DURATION_SECS: f64 = 0.1;

#[derive(Debug, Serialize, Deserialize)]
struct Args {
    #[serde(default = "default_distance")]
    distance: f64,
    #[serde(default)]
    show_saccades: bool,
}

fn default_distance() -> f64 {
    8.0
}

/// Filters saccades out of the gaze trail and emits the surviving
/// fixation candidates as [`PluginEvent::FilteredGaze`]. Works on the
/// trail emitted by the scan path when present, otherwise on the current
/// frame's samples. Exclusive.
pub struct FixationFilter {
    /// Maximum Manhattan distance in image pixels within one fixation.
    distance: f64,
    show_saccades: bool,
    saccade_points: Vec<(f64, f64)>,
}

impl FixationFilter {
    pub const KIND: &'static str = "fixation_filter";

    pub fn new(distance: f64, show_saccades: bool) -> Self {
        Self {
            distance,
            show_saccades,
            saccade_points: Vec::new(),
        }
    }

    /// Catalog factory.
    pub fn from_args(args: &PluginArgs) -> PluginResult<Box<dyn Plugin>> {
        let args: Args = super::parse_args(Self::KIND, args)?;
        Ok(Box::new(Self::new(args.distance, args.show_saccades)))
    }

    fn manhattan_px(a: &GazeSample, b: &GazeSample, size: (u32, u32)) -> f64 {
        let (ax, ay) = a.pixel_pos(size);
        let (bx, by) = b.pixel_pos(size);
        (ax - bx).abs() + (ay - by).abs()
    }

    /// Classify the trail around its middle sample. Returns
    /// (fixation candidates sorted by timestamp, saccades).
    fn classify(&self, trail: &[GazeSample], size: (u32, u32)) -> (Vec<GazeSample>, Vec<GazeSample>) {
        let mid = trail.len() / 2;
        let current = &trail[mid];
        let now = current.timestamp;

        let mut fixations = Vec::new();
        let mut saccades = Vec::new();

        for (i, sample) in trail.iter().enumerate() {
            if i == mid {
                continue;
            }
            let in_window = if i < mid {
                sample.timestamp >= now - WINDOW_HALF_SECS
            } else {
                sample.timestamp <= now + WINDOW_HALF_SECS
            };
            if !in_window {
                continue;
            }
            if Self::manhattan_px(current, sample, size) < self.distance {
                fixations.push(sample.clone());
            } else {
                saccades.push(sample.clone());
            }
        }

        fixations.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

        // Candidate span shorter than the minimum fixation duration is
        // only reported, matching the recording tool's behavior.
        if let (Some(first), Some(last)) = (fixations.first(), fixations.last()) {
            let span = (now - first.timestamp) + (last.timestamp - now);
            if first.timestamp < now && last.timestamp > now && span < MIN_DURATION_SECS {
                tracing::debug!("fixation candidate below min duration: {:.3}s", span);
            }
        }

        (fixations, saccades)
    }
}

impl Plugin for FixationFilter {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn order(&self) -> f64 {
        0.7
    }

    fn update(
        &mut self,
        frame: &mut Frame,
        gaze: &[GazeSample],
        events: &mut Vec<PluginEvent>,
    ) -> PluginResult<()> {
        let size = frame.size();
        let trail = super::display_gaze(events, gaze).to_vec();
        self.saccade_points.clear();

        if trail.is_empty() {
            events.push(PluginEvent::FilteredGaze(Vec::new()));
            return Ok(());
        }

        let (fixations, saccades) = self.classify(&trail, size);

        if self.show_saccades {
            self.saccade_points = saccades.iter().map(|s| s.pixel_pos(size)).collect();
        }

        events.push(PluginEvent::FilteredGaze(fixations));
        Ok(())
    }

    fn render(&mut self, _frame: &Frame, canvas: &mut Canvas) -> PluginResult<()> {
        for &pos in &self.saccade_points {
            canvas.draw_circle(pos, 20.0, 2.0, SACCADE_COLOR);
        }
        Ok(())
    }

    fn init_args(&self) -> Option<PluginArgs> {
        let mut args = PluginArgs::new();
        args.insert("distance".into(), self.distance.into());
        args.insert("show_saccades".into(), self.show_saccades.into());
        Some(args)
    }
}

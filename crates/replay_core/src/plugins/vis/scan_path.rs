//! Trailing gaze-history window.

use serde::{Deserialize, Serialize};

use crate::models::{Canvas, Frame, GazeSample};
use crate::plugins::{Plugin, PluginArgs, PluginEvent, PluginResult};

#[derive(Debug, Serialize, Deserialize)]
struct Args {
    #[serde(default = "default_timeframe")]
    timeframe: f64,
}

fn default_timeframe() -> f64 {
    1.0
}

/// Keeps the last `timeframe` seconds of gaze history across frames and
/// emits it as a [`PluginEvent::GazeTrail`] for later plugins. Exclusive;
/// runs first (order 0.1) so every other plugin sees the trail.
pub struct ScanPath {
    timeframe: f64,
    history: Vec<GazeSample>,
    /// Frame index the history was last extended on. A paused session
    /// re-runs the update pass with the same frame; its samples must be
    /// appended only once.
    last_frame: Option<usize>,
}

impl ScanPath {
    pub const KIND: &'static str = "scan_path";

    pub fn new(timeframe: f64) -> Self {
        Self {
            timeframe,
            history: Vec::new(),
            last_frame: None,
        }
    }

    /// Catalog factory.
    pub fn from_args(args: &PluginArgs) -> PluginResult<Box<dyn Plugin>> {
        let args: Args = super::parse_args(Self::KIND, args)?;
        Ok(Box::new(Self::new(args.timeframe)))
    }

    /// Samples currently in the window (test hook).
    #[cfg(test)]
    fn len(&self) -> usize {
        self.history.len()
    }
}

impl Plugin for ScanPath {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn order(&self) -> f64 {
        0.1
    }

    fn update(
        &mut self,
        frame: &mut Frame,
        gaze: &[GazeSample],
        events: &mut Vec<PluginEvent>,
    ) -> PluginResult<()> {
        // A backwards time jump means the user seeked; the old trail no
        // longer belongs to this part of the recording.
        if let (Some(last), Some(first)) = (self.history.last(), gaze.first()) {
            if first.timestamp < last.timestamp {
                self.history.clear();
                self.last_frame = None;
            }
        }

        if self.last_frame != Some(frame.index) {
            self.history.extend_from_slice(gaze);
            self.last_frame = Some(frame.index);
        }

        let horizon = self
            .history
            .last()
            .map(|s| s.timestamp)
            .unwrap_or(frame.timestamp)
            - self.timeframe;
        self.history.retain(|s| s.timestamp >= horizon);

        events.push(PluginEvent::GazeTrail(self.history.clone()));
        Ok(())
    }

    fn render(&mut self, _frame: &Frame, _canvas: &mut Canvas) -> PluginResult<()> {
        Ok(())
    }

    fn init_args(&self) -> Option<PluginArgs> {
        let mut args = PluginArgs::new();
        args.insert("timeframe".into(), self.timeframe.into());
        Some(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn frame(index: usize, ts: f64) -> Frame {
        Frame::new(index, ts, RgbaImage::new(10, 10))
    }

    fn step(
        plugin: &mut ScanPath,
        index: usize,
        ts: f64,
        gaze: &[GazeSample],
    ) -> Vec<PluginEvent> {
        let mut events = Vec::new();
        plugin
            .update(&mut frame(index, ts), gaze, &mut events)
            .unwrap();
        events
    }

    fn trail_len(events: &[PluginEvent]) -> usize {
        match &events[0] {
            PluginEvent::GazeTrail(trail) => trail.len(),
            other => panic!("expected trail, got {:?}", other),
        }
    }

    #[test]
    fn history_accumulates_within_the_window() {
        let mut plugin = ScanPath::new(1.0);

        step(&mut plugin, 0, 0.0, &[GazeSample::new(0.0, 0.1, 0.1)]);
        let events = step(&mut plugin, 1, 0.04, &[GazeSample::new(0.04, 0.2, 0.2)]);

        assert_eq!(trail_len(&events), 2);
    }

    #[test]
    fn old_samples_fall_out_of_the_window() {
        let mut plugin = ScanPath::new(0.5);

        step(&mut plugin, 0, 0.0, &[GazeSample::new(0.0, 0.1, 0.1)]);
        step(&mut plugin, 1, 2.0, &[GazeSample::new(2.0, 0.2, 0.2)]);

        assert_eq!(plugin.len(), 1);
    }

    #[test]
    fn seek_back_clears_the_trail() {
        let mut plugin = ScanPath::new(10.0);

        step(&mut plugin, 5, 5.0, &[GazeSample::new(5.0, 0.1, 0.1)]);
        step(&mut plugin, 1, 1.0, &[GazeSample::new(1.0, 0.2, 0.2)]);

        assert_eq!(plugin.len(), 1);
    }

    #[test]
    fn frames_without_gaze_keep_the_trail() {
        let mut plugin = ScanPath::new(1.0);

        step(&mut plugin, 0, 0.0, &[GazeSample::new(0.0, 0.1, 0.1)]);
        let events = step(&mut plugin, 1, 0.04, &[]);

        assert_eq!(trail_len(&events), 1);
    }

    #[test]
    fn held_frame_does_not_duplicate_its_samples() {
        let mut plugin = ScanPath::new(1.0);
        let gaze = [GazeSample::new(0.0, 0.1, 0.1)];

        // A paused session keeps updating with the same frame.
        for _ in 0..6 {
            let events = step(&mut plugin, 0, 0.0, &gaze);
            assert_eq!(trail_len(&events), 1);
        }
    }

    #[test]
    fn stepping_back_onto_an_absorbed_frame_rebuilds_the_trail() {
        let mut plugin = ScanPath::new(10.0);

        step(&mut plugin, 1, 1.0, &[GazeSample::new(1.0, 0.1, 0.1)]);
        step(&mut plugin, 2, 2.0, &[GazeSample::new(2.0, 0.2, 0.2)]);
        let events = step(&mut plugin, 1, 1.0, &[GazeSample::new(1.0, 0.1, 0.1)]);

        assert_eq!(trail_len(&events), 1);
    }
}

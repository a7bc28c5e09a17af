//! Polyline through the frame's gaze points.

use serde::{Deserialize, Serialize};

use crate::models::{Canvas, Color, Frame, GazeSample};
use crate::plugins::{Plugin, PluginArgs, PluginEvent, PluginResult};

const LINE_COLOR: Color = [60, 255, 120, 200];

#[derive(Debug, Serialize, Deserialize)]
struct Args {
    #[serde(default = "default_thickness")]
    thickness: f32,
}

fn default_thickness() -> f32 {
    2.0
}

/// Connects the gaze points of the current frame (or the trail emitted by
/// an earlier plugin) with a polyline. Additive.
pub struct GazePolyline {
    thickness: f32,
    points: Vec<(f64, f64)>,
}

impl GazePolyline {
    pub const KIND: &'static str = "gaze_polyline";

    pub fn new(thickness: f32) -> Self {
        Self {
            thickness,
            points: Vec::new(),
        }
    }

    /// Catalog factory.
    pub fn from_args(args: &PluginArgs) -> PluginResult<Box<dyn Plugin>> {
        let args: Args = super::parse_args(Self::KIND, args)?;
        Ok(Box::new(Self::new(args.thickness)))
    }
}

impl Plugin for GazePolyline {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn order(&self) -> f64 {
        0.8
    }

    fn update(
        &mut self,
        frame: &mut Frame,
        gaze: &[GazeSample],
        events: &mut Vec<PluginEvent>,
    ) -> PluginResult<()> {
        let size = frame.size();
        self.points = super::display_gaze(events, gaze)
            .iter()
            .map(|s| s.pixel_pos(size))
            .collect();
        Ok(())
    }

    fn render(&mut self, _frame: &Frame, canvas: &mut Canvas) -> PluginResult<()> {
        canvas.draw_polyline(self.points.clone(), self.thickness, LINE_COLOR);
        Ok(())
    }

    fn init_args(&self) -> Option<PluginArgs> {
        let mut args = PluginArgs::new();
        args.insert("thickness".into(), f64::from(self.thickness).into());
        Some(args)
    }
}

//! Circle marker at each gaze point.

use serde::{Deserialize, Serialize};

use crate::models::{Canvas, Color, Frame, GazeSample};
use crate::plugins::{Plugin, PluginArgs, PluginEvent, PluginResult};

const CIRCLE_COLOR: Color = [255, 60, 60, 200];

#[derive(Debug, Serialize, Deserialize)]
struct Args {
    #[serde(default = "default_radius")]
    radius: f32,
}

fn default_radius() -> f32 {
    20.0
}

/// Draws a circle outline at every gaze point of the current frame.
/// Additive: several instances with different radii may coexist.
pub struct GazeCircle {
    radius: f32,
    points: Vec<(f64, f64)>,
}

impl GazeCircle {
    pub const KIND: &'static str = "gaze_circle";

    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            points: Vec::new(),
        }
    }

    /// Catalog factory.
    pub fn from_args(args: &PluginArgs) -> PluginResult<Box<dyn Plugin>> {
        let args: Args = super::parse_args(Self::KIND, args)?;
        Ok(Box::new(Self::new(args.radius)))
    }
}

impl Plugin for GazeCircle {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn order(&self) -> f64 {
        0.9
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
        for &center in &self.points {
            canvas.draw_circle(center, self.radius, 2.0, CIRCLE_COLOR);
        }
        Ok(())
    }

    fn init_args(&self) -> Option<PluginArgs> {
        let mut args = PluginArgs::new();
        args.insert("radius".into(), f64::from(self.radius).into());
        Some(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DrawCommand;
    use image::RgbaImage;

    fn frame() -> Frame {
        Frame::new(0, 0.0, RgbaImage::new(100, 100))
    }

    #[test]
    fn draws_one_circle_per_sample() {
        let mut plugin = GazeCircle::new(10.0);
        let gaze = [GazeSample::new(0.0, 0.5, 0.5), GazeSample::new(0.0, 0.1, 0.9)];

        let mut f = frame();
        plugin.update(&mut f, &gaze, &mut Vec::new()).unwrap();

        let mut canvas = Canvas::new();
        plugin.render(&f, &mut canvas).unwrap();

        assert_eq!(canvas.commands().len(), 2);
        assert!(matches!(
            canvas.commands()[0],
            DrawCommand::Circle { radius, .. } if radius == 10.0
        ));
    }

    #[test]
    fn args_round_trip() {
        let mut args = PluginArgs::new();
        args.insert("radius".into(), 35.0.into());
        let plugin = GazeCircle::from_args(&args).unwrap();

        assert_eq!(plugin.init_args().unwrap()["radius"], 35.0);
    }

    #[test]
    fn default_radius_applies() {
        let plugin = GazeCircle::from_args(&PluginArgs::new()).unwrap();
        assert_eq!(plugin.init_args().unwrap()["radius"], 20.0);
    }
}

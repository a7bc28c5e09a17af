//! Draw commands collected during the plugin render pass.
//!
//! Plugins describe their visual output as commands on a [`Canvas`];
//! the display implementation decides how to rasterize them. This keeps
//! the render pass read-only with respect to frame and gaze data.

/// RGBA color.
pub type Color = [u8; 4];

/// One overlay drawing primitive, in image-pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled point.
    Point {
        pos: (f64, f64),
        radius: f32,
        color: Color,
    },
    /// Circle outline.
    Circle {
        center: (f64, f64),
        radius: f32,
        thickness: f32,
        color: Color,
    },
    /// Connected line through two or more points.
    Polyline {
        points: Vec<(f64, f64)>,
        thickness: f32,
        color: Color,
    },
}

/// Per-iteration command collector handed to each plugin's render hook.
#[derive(Debug, Default)]
pub struct Canvas {
    commands: Vec<DrawCommand>,
}

impl Canvas {
    /// Create an empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw a filled point.
    pub fn draw_point(&mut self, pos: (f64, f64), radius: f32, color: Color) {
        self.commands.push(DrawCommand::Point { pos, radius, color });
    }

    /// Draw a circle outline.
    pub fn draw_circle(&mut self, center: (f64, f64), radius: f32, thickness: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            thickness,
            color,
        });
    }

    /// Draw a polyline. Fewer than two points is a no-op.
    pub fn draw_polyline(&mut self, points: Vec<(f64, f64)>, thickness: f32, color: Color) {
        if points.len() < 2 {
            return;
        }
        self.commands.push(DrawCommand::Polyline {
            points,
            thickness,
            color,
        });
    }

    /// Commands collected so far, in draw order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Whether anything has been drawn.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

//! Drawing surface abstraction.
//!
//! The renderer never talks to a concrete canvas. Hosts implement [`Surface`]
//! (a browser 2D context, an SVG writer, a test recorder) and the network
//! issues a handful of primitive calls per frame.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::Color;

/// A point in surface coordinates (origin top-left, y down).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    #[inline]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

pub trait Surface {
    /// Erase the whole surface to transparent.
    fn clear(&mut self, width: f32, height: f32);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    fn stroke_line(&mut self, from: Point, to: Point, color: Color, alpha: f32, line_width: f32);

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color, alpha: f32);

    /// Radial gradient disc: `color` at `inner_alpha` in the center fading to
    /// transparent at `radius`, composited at global `alpha`.
    fn fill_glow(&mut self, center: Point, radius: f32, color: Color, inner_alpha: f32, alpha: f32);
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "op", rename_all = "snake_case"))]
pub enum DrawCommand {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
        alpha: f32,
        width: f32,
    },
    Circle {
        center: Point,
        radius: f32,
        color: Color,
        alpha: f32,
    },
    Glow {
        center: Point,
        radius: f32,
        color: Color,
        inner_alpha: f32,
        alpha: f32,
    },
}

/// Display list of the most recent frame.
///
/// `clear` drops everything recorded so far, so after a tick the list holds
/// exactly that frame's output.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Size passed to the last `clear`.
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Number of `clear` calls seen.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.commands.clear();
        self.frames += 1;
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Color, alpha: f32, line_width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            alpha,
            width: line_width,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color, alpha: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn fill_glow(&mut self, center: Point, radius: f32, color: Color, inner_alpha: f32, alpha: f32) {
        self.commands.push(DrawCommand::Glow {
            center,
            radius,
            color,
            inner_alpha,
            alpha,
        });
    }
}

//! Screen-space drawing backend contract and a recording implementation.
//!
//! Shapes are emitted through [`DrawList`], a path-based API: points are
//! accumulated into the current path, which is then filled and/or stroked
//! and cleared. [`CommandList`] records everything as [`DrawCommand`]s for
//! a renderer to consume later.

use hbdraw_core::math::Vec2;

/// RGBA color, each component in `0.0..=1.0`.
pub type Color = [f32; 4];

/// Fill and optional outline color for one shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub fill: Color,
    pub outline: Option<Color>,
}

impl Paint {
    /// Fill only.
    pub fn fill(color: Color) -> Self {
        Self {
            fill: color,
            outline: None,
        }
    }

    /// Fill plus an outline stroke.
    pub fn outlined(fill: Color, outline: Color) -> Self {
        Self {
            fill,
            outline: Some(outline),
        }
    }
}

/// How a filled path is rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillRule {
    Convex,
    Concave,
}

/// Path-based 2D drawing backend.
///
/// `fill_path` and `stroke_path` read the current path without clearing
/// it; callers clear it explicitly with `path_clear`.
pub trait DrawList {
    fn path_line_to(&mut self, point: Vec2);

    /// Append `point` unless it equals the last path point.
    fn path_line_to_merge_duplicate(&mut self, point: Vec2);

    fn path_clear(&mut self);

    fn fill_path(&mut self, rule: FillRule, color: Color);

    fn stroke_path(&mut self, color: Color, closed: bool, thickness: f32);

    fn add_quad_filled(&mut self, quad: [Vec2; 4], color: Color);

    fn add_line(&mut self, from: Vec2, to: Vec2, color: Color, thickness: f32);

    fn add_circle_filled(&mut self, center: Vec2, radius: f32, color: Color, segments: u32);

    fn add_circle(&mut self, center: Vec2, radius: f32, color: Color, segments: u32, thickness: f32);

    /// Append `segments + 1` points of a circular arc from `a_min` to
    /// `a_max` (radians).
    fn path_arc_to(&mut self, center: Vec2, radius: f32, a_min: f32, a_max: f32, segments: u32) {
        self.path_elliptical_arc_to(center, Vec2::splat(radius), 0.0, a_min, a_max, segments);
    }

    /// Append `segments + 1` points of an elliptical arc with semi-axes
    /// `radii`, rotated by `rotation` radians around `center`.
    fn path_elliptical_arc_to(
        &mut self,
        center: Vec2,
        radii: Vec2,
        rotation: f32,
        a_min: f32,
        a_max: f32,
        segments: u32,
    ) {
        let rot = Vec2::from_angle(rotation);
        let segments = segments.max(1);
        for i in 0..=segments {
            let a = a_min + (i as f32 / segments as f32) * (a_max - a_min);
            let local = Vec2::new(a.cos() * radii.x, a.sin() * radii.y);
            self.path_line_to(center + rot.rotate(local));
        }
    }
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled polygon built from a path.
    Polygon {
        points: Vec<Vec2>,
        rule: FillRule,
        color: Color,
    },
    /// Stroked path.
    Polyline {
        points: Vec<Vec2>,
        color: Color,
        closed: bool,
        thickness: f32,
    },
    QuadFilled {
        quad: [Vec2; 4],
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        thickness: f32,
    },
    CircleFilled {
        center: Vec2,
        radius: f32,
        color: Color,
        segments: u32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        segments: u32,
        thickness: f32,
    },
}

/// [`DrawList`] that records commands.
///
/// Fills of fewer than three points and strokes of fewer than two are
/// dropped, as a rasterizer would draw nothing for them.
#[derive(Debug, Default)]
pub struct CommandList {
    path: Vec<Vec2>,
    commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points of the path currently being built.
    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Take the recorded commands, leaving the list empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        self.path.clear();
        std::mem::take(&mut self.commands)
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl DrawList for CommandList {
    #[inline]
    fn path_line_to(&mut self, point: Vec2) {
        self.path.push(point);
    }

    fn path_line_to_merge_duplicate(&mut self, point: Vec2) {
        if self.path.last() != Some(&point) {
            self.path.push(point);
        }
    }

    fn path_clear(&mut self) {
        self.path.clear();
    }

    fn fill_path(&mut self, rule: FillRule, color: Color) {
        if self.path.len() < 3 {
            return;
        }
        self.commands.push(DrawCommand::Polygon {
            points: self.path.clone(),
            rule,
            color,
        });
    }

    fn stroke_path(&mut self, color: Color, closed: bool, thickness: f32) {
        if self.path.len() < 2 {
            return;
        }
        self.commands.push(DrawCommand::Polyline {
            points: self.path.clone(),
            color,
            closed,
            thickness,
        });
    }

    fn add_quad_filled(&mut self, quad: [Vec2; 4], color: Color) {
        self.commands.push(DrawCommand::QuadFilled { quad, color });
    }

    fn add_line(&mut self, from: Vec2, to: Vec2, color: Color, thickness: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            thickness,
        });
    }

    fn add_circle_filled(&mut self, center: Vec2, radius: f32, color: Color, segments: u32) {
        self.commands.push(DrawCommand::CircleFilled {
            center,
            radius,
            color,
            segments,
        });
    }

    fn add_circle(&mut self, center: Vec2, radius: f32, color: Color, segments: u32, thickness: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            segments,
            thickness,
        });
    }
}

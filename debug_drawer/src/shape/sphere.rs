use hbdraw_core::math::{Vec2, Vec3};

use super::{log_rejected, ProjectionContext, Shape, ShapeError};

/// A sphere projected to a screen-space disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    radius: f32,
    center: Vec2,
    valid: bool,
}

impl Sphere {
    /// Project a world-space sphere. Invalid if the center or its radius
    /// offset cannot be projected.
    pub fn build(ctx: &ProjectionContext<'_>, center: Vec3, radius: f32) -> Self {
        Self::try_build(ctx, center, radius).unwrap_or_else(|err| {
            log_rejected("sphere", err);
            Self::invalid()
        })
    }

    fn try_build(ctx: &ProjectionContext<'_>, center: Vec3, radius: f32) -> Result<Self, ShapeError> {
        let (radius, center) = ctx.project_radius(center, radius)?;
        Ok(Self {
            radius,
            center,
            valid: true,
        })
    }

    fn invalid() -> Self {
        Self {
            radius: 0.0,
            center: Vec2::ZERO,
            valid: false,
        }
    }

    /// Screen-space radius in pixels.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Screen-space center.
    pub fn center(&self) -> Vec2 {
        self.center
    }
}

impl Shape for Sphere {
    fn is_valid(&self) -> bool {
        self.valid
    }
}

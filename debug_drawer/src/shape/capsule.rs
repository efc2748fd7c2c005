use hbdraw_core::math::{Vec2, Vec3};

use super::{check_range, log_rejected, ProjectionContext, Shape, ShapeError};

/// One projected end of a capsule.
///
/// `a_min..a_max` is the visible arc in radians, swept downward from
/// `a_min`; `a_min >= a_max` always holds for a built capsule.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cap {
    pub center: Vec2,
    pub radius: f32,
    pub a_min: f32,
    pub a_max: f32,
}

/// A capsule projected to two cap arcs joined by their outer tangents.
#[derive(Debug, Clone, PartialEq)]
pub struct Capsule {
    top: Cap,
    bottom: Cap,
    distance: f32,
    quad: [Vec2; 4],
    is_sphere: bool,
    valid: bool,
}

impl Capsule {
    pub fn build(ctx: &ProjectionContext<'_>, start: Vec3, end: Vec3, radius: f32) -> Self {
        Self::try_build(ctx, start, end, radius).unwrap_or_else(|err| {
            log_rejected("capsule", err);
            Self::invalid()
        })
    }

    fn try_build(
        ctx: &ProjectionContext<'_>,
        start: Vec3,
        end: Vec3,
        radius: f32,
    ) -> Result<Self, ShapeError> {
        let (top_radius, top_center) = ctx.project_radius(start, radius)?;
        let (bottom_radius, bottom_center) = ctx.project_radius(end, radius)?;

        let mut top = Cap {
            center: top_center,
            radius: top_radius,
            ..Cap::default()
        };
        let mut bottom = Cap {
            center: bottom_center,
            radius: bottom_radius,
            ..Cap::default()
        };

        let axis = top.center - bottom.center;
        let distance = axis.length();

        // One disk swallows the other: draw a single circle.
        if (distance + bottom.radius) * 0.99 <= top.radius
            || (distance + top.radius) * 0.99 <= bottom.radius
        {
            return Ok(Self {
                top,
                bottom,
                distance,
                quad: [Vec2::ZERO; 4],
                is_sphere: true,
                valid: true,
            });
        }

        let r_diff = bottom.radius - top.radius;
        let slope = (r_diff * r_diff) / (distance * distance);
        let tangent = |r: f32| (r * r - slope * r * r).max(0.0).sqrt();
        let t_top = tangent(top.radius);
        let t_bottom = tangent(bottom.radius);

        let dir = axis / distance;
        let perp = Vec2::new(-dir.y, dir.x);
        let h = r_diff / distance;

        let quad = [
            check_range(top.center + dir * (h * top.radius) + perp * t_top)?,
            check_range(top.center + dir * (h * top.radius) - perp * t_top)?,
            check_range(bottom.center + dir * (h * bottom.radius) - perp * t_bottom)?,
            check_range(bottom.center + dir * (h * bottom.radius) + perp * t_bottom)?,
        ];

        (top.a_min, top.a_max) = arc_range(top.center, quad[0], quad[1]);
        (bottom.a_min, bottom.a_max) = arc_range(bottom.center, quad[2], quad[3]);

        Ok(Self {
            top,
            bottom,
            distance,
            quad,
            is_sphere: false,
            valid: true,
        })
    }

    fn invalid() -> Self {
        Self {
            top: Cap::default(),
            bottom: Cap::default(),
            distance: 0.0,
            quad: [Vec2::ZERO; 4],
            is_sphere: false,
            valid: false,
        }
    }

    /// Cap at the axis start.
    pub fn top(&self) -> &Cap {
        &self.top
    }

    /// Cap at the axis end.
    pub fn bottom(&self) -> &Cap {
        &self.bottom
    }

    /// Screen distance between the cap centers.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Tangent points: two on the top cap, then two on the bottom cap.
    pub fn quad(&self) -> &[Vec2; 4] {
        &self.quad
    }

    /// Whether the capsule collapsed into its larger cap.
    pub fn is_sphere(&self) -> bool {
        self.is_sphere
    }

    /// The cap with the larger screen radius, the top one on a tie.
    pub fn larger_cap(&self) -> &Cap {
        if self.bottom.radius > self.top.radius {
            &self.bottom
        } else {
            &self.top
        }
    }
}

impl Shape for Capsule {
    fn is_valid(&self) -> bool {
        self.valid
    }
}

fn arc_range(center: Vec2, from: Vec2, to: Vec2) -> (f32, f32) {
    let angle = |p: Vec2| {
        let delta = (p - center).normalize();
        delta.y.atan2(delta.x)
    };
    let (a_min, a_max) = (angle(from), angle(to));
    if a_min < a_max {
        (a_min + std::f32::consts::TAU, a_max)
    } else {
        (a_min, a_max)
    }
}

use hbdraw_core::math::{segments_intersect, Vec2, Vec3};

use super::{log_rejected, Cylinder, PointId, ProjectionContext, Shape, ShapeError};

/// A thick ring (annular cylinder) projected to screen space.
///
/// Made of an outer cylinder and a hollow inner cylinder sharing the same
/// axis. The inner cylinder's tessellation is rotated by half a turn so its
/// visible wall is scanned from the opposite side.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    outer: Cylinder,
    inner: Cylinder,
    start: Vec2,
    end: Vec2,
    valid: bool,
}

impl Ring {
    /// Project a ring from `start` to `end` with outer radius `radius_a`
    /// and inner radius `radius_b`.
    pub fn build(
        ctx: &ProjectionContext<'_>,
        start: Vec3,
        end: Vec3,
        radius_a: f32,
        radius_b: f32,
    ) -> Self {
        Self::try_build(ctx, start, end, radius_a, radius_b).unwrap_or_else(|err| {
            log_rejected("ring", err);
            Self::invalid()
        })
    }

    fn try_build(
        ctx: &ProjectionContext<'_>,
        start: Vec3,
        end: Vec3,
        radius_a: f32,
        radius_b: f32,
    ) -> Result<Self, ShapeError> {
        let start2d = ctx.project(start)?;
        let end2d = ctx.project(end)?;

        let outer = Cylinder::try_build(ctx, start, end, radius_a, 0.0, false)?;
        let inner = Cylinder::try_build(ctx, start, end, radius_b, std::f32::consts::PI, true)?;

        Ok(Self {
            outer,
            inner,
            start: start2d,
            end: end2d,
            valid: true,
        })
    }

    fn invalid() -> Self {
        Self {
            outer: Cylinder::invalid(),
            inner: Cylinder::invalid(),
            start: Vec2::ZERO,
            end: Vec2::ZERO,
            valid: false,
        }
    }

    pub fn outer(&self) -> &Cylinder {
        &self.outer
    }

    pub fn inner(&self) -> &Cylinder {
        &self.inner
    }

    /// Projected axis start.
    pub fn start_center(&self) -> Vec2 {
        self.start
    }

    /// Projected axis end.
    pub fn end_center(&self) -> Vec2 {
        self.end
    }

    /// Keep the inner-cylinder `candidates` whose segment to `center`
    /// crosses no edge of the closed inner-cylinder polygon `boundary`.
    pub fn remove_intersections(
        &self,
        center: Vec2,
        boundary: &[PointId],
        candidates: &[PointId],
    ) -> Vec<PointId> {
        let boundary = self.inner.resolve(boundary);
        candidates
            .iter()
            .copied()
            .filter(|&id| !crosses_boundary(center, &boundary, self.inner.point(id)))
            .collect()
    }

    /// Index into `boundary` next to the boundary point nearest to `point`:
    /// one step before it when `reverse`, one step after it otherwise,
    /// wrapping around. `None` for an empty boundary.
    pub fn nearest_boundary_index(
        &self,
        point: Vec2,
        boundary: &[PointId],
        reverse: bool,
    ) -> Option<usize> {
        neighbor_of_nearest(point, &self.inner.resolve(boundary), reverse)
    }
}

impl Shape for Ring {
    fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Whether the segment from `point` to `center` crosses an edge of the
/// closed polygon `boundary`.
pub(crate) fn crosses_boundary(center: Vec2, boundary: &[Vec2], point: Vec2) -> bool {
    let n = boundary.len();
    (0..n).any(|j| {
        let k = if j == n - 1 { 0 } else { j + 1 };
        segments_intersect(point, center, boundary[k], boundary[j])
    })
}

/// See [`Ring::nearest_boundary_index`].
pub(crate) fn neighbor_of_nearest(point: Vec2, boundary: &[Vec2], reverse: bool) -> Option<usize> {
    let last = boundary.len().checked_sub(1)?;
    let nearest = boundary
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| point.distance(**a).total_cmp(&point.distance(**b)))
        .map(|(i, _)| i)?;

    Some(if reverse {
        if nearest == 0 {
            last
        } else {
            nearest - 1
        }
    } else if nearest == last {
        0
    } else {
        nearest + 1
    })
}

use hbdraw_core::math::{frontface, Mat4, Vec2, Vec3};

use super::{log_rejected, PointId, ProjectionContext, Shape, ShapeError};

const TOP: [PointId; 3] = [0, 1, 2];
const BOTTOM: [PointId; 3] = [3, 4, 5];

/// Side faces joining the bottom triangle (3..6) to the top one (0..3).
const SIDES: [[PointId; 4]; 3] = [[5, 4, 1, 0], [4, 3, 2, 1], [3, 5, 0, 2]];

/// A triangular prism projected to screen space.
///
/// The top and bottom triangles are culled independently, the side quads
/// the same way as a box's faces.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    points: [Vec2; 6],
    top: Option<[PointId; 3]>,
    bottom: Option<[PointId; 3]>,
    quads: Vec<[PointId; 4]>,
    valid: bool,
}

impl Triangle {
    /// Project the prism centered at `pos` with half-size `extent`.
    ///
    /// The triangles lie in the `+y` and `-y` planes with their apex
    /// towards `-z`.
    pub fn build(ctx: &ProjectionContext<'_>, pos: Vec3, extent: Vec3, rotation: &Mat4) -> Self {
        Self::try_build(ctx, pos, extent, rotation).unwrap_or_else(|err| {
            log_rejected("triangle", err);
            Self::invalid()
        })
    }

    fn try_build(
        ctx: &ProjectionContext<'_>,
        pos: Vec3,
        extent: Vec3,
        rotation: &Mat4,
    ) -> Result<Self, ShapeError> {
        let Vec3 { x, y, z } = extent;
        let top = [
            Vec3::new(x, y, z),
            Vec3::new(-x, y, z),
            Vec3::new(0.0, y, -z),
        ];
        let bottom = [
            Vec3::new(0.0, -y, -z),
            Vec3::new(-x, -y, z),
            Vec3::new(x, -y, z),
        ];

        let top = ctx.project_corners(&top, rotation, pos)?;
        let bottom = ctx.project_corners(&bottom, rotation, pos)?;
        let mut points = [Vec2::ZERO; 6];
        points[..3].copy_from_slice(&top);
        points[3..].copy_from_slice(&bottom);

        let facing = |t: [PointId; 3]| frontface(points[t[2]], points[t[0]], points[t[1]]);
        let top = facing(TOP).then_some(TOP);
        let bottom = facing(BOTTOM).then_some(BOTTOM);
        let quads: Vec<_> = SIDES
            .into_iter()
            .filter(|q| frontface(points[q[0]], points[q[1]], points[q[2]]))
            .collect();

        if top.is_none() && bottom.is_none() && quads.is_empty() {
            return Err(ShapeError::Degenerate("no front-facing prism face"));
        }

        Ok(Self {
            points,
            top,
            bottom,
            quads,
            valid: true,
        })
    }

    fn invalid() -> Self {
        Self {
            points: [Vec2::ZERO; 6],
            top: None,
            bottom: None,
            quads: Vec::new(),
            valid: false,
        }
    }

    pub fn points(&self) -> &[Vec2; 6] {
        &self.points
    }

    /// The `+y` triangle, if it faces the viewer.
    pub fn top_triangle(&self) -> Option<[PointId; 3]> {
        self.top
    }

    /// The `-y` triangle, if it faces the viewer.
    pub fn bottom_triangle(&self) -> Option<[PointId; 3]> {
        self.bottom
    }

    /// Front-facing side quads.
    pub fn quads(&self) -> &[[PointId; 4]] {
        &self.quads
    }

    pub fn resolve<const N: usize>(&self, ids: &[PointId; N]) -> [Vec2; N] {
        ids.map(|i| self.points[i])
    }
}

impl Shape for Triangle {
    fn is_valid(&self) -> bool {
        self.valid
    }
}

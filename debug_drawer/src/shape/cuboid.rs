use hbdraw_core::math::{frontface, Mat4, Vec2, Vec3};

use super::{log_rejected, PointId, ProjectionContext, Shape, ShapeError};

/// Corner indices of the six faces, wound so that a face pointing at the
/// viewer is front-facing on screen.
///
/// Corner `k` is `CORNER_SIGNS[k] * extent`.
const FACES: [[PointId; 4]; 6] = [
    [0, 1, 2, 3], // -Z
    [0, 3, 4, 5], // -X
    [5, 6, 1, 0], // -Y
    [6, 7, 2, 1], // +X
    [7, 4, 3, 2], // +Y
    [7, 6, 5, 4], // +Z
];

const CORNER_SIGNS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
];

/// An oriented box projected to screen space.
///
/// Only the front-facing faces are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Cuboid {
    points: [Vec2; 8],
    quads: Vec<[PointId; 4]>,
    valid: bool,
}

impl Cuboid {
    /// Project the box centered at `pos` with half-size `extent`, rotated by
    /// `rotation`. Invalid if any corner fails to project or no face is
    /// visible.
    pub fn build(ctx: &ProjectionContext<'_>, pos: Vec3, extent: Vec3, rotation: &Mat4) -> Self {
        Self::try_build(ctx, pos, extent, rotation).unwrap_or_else(|err| {
            log_rejected("box", err);
            Self::invalid()
        })
    }

    fn try_build(
        ctx: &ProjectionContext<'_>,
        pos: Vec3,
        extent: Vec3,
        rotation: &Mat4,
    ) -> Result<Self, ShapeError> {
        let corners = CORNER_SIGNS.map(|sign| Vec3::from_array(sign) * extent);
        let points = ctx.project_corners(&corners, rotation, pos)?;

        let quads: Vec<_> = FACES
            .into_iter()
            .filter(|q| frontface(points[q[0]], points[q[1]], points[q[2]]))
            .collect();
        if quads.is_empty() {
            return Err(ShapeError::Degenerate("no front-facing box face"));
        }

        Ok(Self {
            points,
            quads,
            valid: true,
        })
    }

    fn invalid() -> Self {
        Self {
            points: [Vec2::ZERO; 8],
            quads: Vec::new(),
            valid: false,
        }
    }

    /// Projected corners.
    pub fn points(&self) -> &[Vec2; 8] {
        &self.points
    }

    /// Front-facing faces, as corner indices.
    pub fn quads(&self) -> &[[PointId; 4]] {
        &self.quads
    }

    /// Resolve a face to screen positions.
    pub fn quad_points(&self, quad: &[PointId; 4]) -> [Vec2; 4] {
        quad.map(|i| self.points[i])
    }
}

impl Shape for Cuboid {
    fn is_valid(&self) -> bool {
        self.valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::test_support::{camera_at, HoleProjector};
    use hbdraw_core::DrawConfig;

    #[test]
    fn three_faces_toward_camera_are_visible() {
        let camera = camera_at(Vec3::new(4.0, 4.0, 6.0));
        let ctx = ProjectionContext::new(&camera, DrawConfig::default());
        let cuboid = Cuboid::build(&ctx, Vec3::ZERO, Vec3::ONE, &Mat4::IDENTITY);

        assert!(cuboid.is_valid());
        assert_eq!(cuboid.quads(), &[FACES[3], FACES[4], FACES[5]]);
    }

    #[test]
    fn head_on_box_shows_only_front_face() {
        let camera = camera_at(Vec3::new(0.0, 0.0, 10.0));
        let ctx = ProjectionContext::new(&camera, DrawConfig::default());
        let cuboid = Cuboid::build(&ctx, Vec3::ZERO, Vec3::ONE, &Mat4::IDENTITY);

        assert!(cuboid.is_valid());
        assert_eq!(cuboid.quads(), &[FACES[5]]);
    }

    #[test]
    fn rotation_changes_visible_faces() {
        let camera = camera_at(Vec3::new(0.0, 0.0, 10.0));
        let ctx = ProjectionContext::new(&camera, DrawConfig::default());
        // Half turn around Y brings the -Z face to the front.
        let rotation = Mat4::from_rotation_y(std::f32::consts::PI);
        let cuboid = Cuboid::build(&ctx, Vec3::ZERO, Vec3::ONE, &rotation);

        assert_eq!(cuboid.quads(), &[FACES[0]]);
    }

    #[test]
    fn one_unprojectable_corner_invalidates_box() {
        let holed = HoleProjector {
            camera: camera_at(Vec3::new(4.0, 4.0, 6.0)),
            hole: Vec3::new(-1.0, -1.0, -1.0),
            radius: 0.01,
        };
        let ctx = ProjectionContext::new(&holed, DrawConfig::default());
        let cuboid = Cuboid::build(&ctx, Vec3::ZERO, Vec3::ONE, &Mat4::IDENTITY);

        assert!(!cuboid.is_valid());
        assert!(cuboid.quads().is_empty());
    }

    #[test]
    fn building_twice_is_identical() {
        let camera = camera_at(Vec3::new(3.0, -2.0, 7.0));
        let ctx = ProjectionContext::new(&camera, DrawConfig::default());
        let rotation = Mat4::from_rotation_x(0.3);
        let a = Cuboid::build(&ctx, Vec3::new(0.5, 0.0, 0.0), Vec3::new(1.0, 2.0, 0.5), &rotation);
        let b = Cuboid::build(&ctx, Vec3::new(0.5, 0.0, 0.0), Vec3::new(1.0, 2.0, 0.5), &rotation);
        assert_eq!(a, b);
    }
}

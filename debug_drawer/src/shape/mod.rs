//! Screen-space shape builders.
//!
//! Each builder takes world-space parameters plus a [`ProjectionContext`]
//! and produces an immutable, single-frame shape. A shape that failed to
//! build is still returned, but reports `is_valid() == false` and must be
//! skipped by every consumer.
//!
//! Point lists inside shapes are [`PointId`]s into the shape's own point
//! buffer, never references into other storage.

mod capsule;
mod cuboid;
mod cylinder;
mod ring;
mod sphere;
mod triangle;

pub use capsule::{Cap, Capsule};
pub use cuboid::Cuboid;
pub use cylinder::Cylinder;
pub use ring::Ring;
pub use sphere::Sphere;
pub use triangle::Triangle;

pub(crate) use ring::neighbor_of_nearest;

use hbdraw_core::math::{point_in_range, Mat4, Vec2, Vec3};
use hbdraw_core::{DrawConfig, ScreenProjector};
use thiserror::Error;

/// Index of a projected point inside its owning shape's point buffer.
pub type PointId = usize;

/// Reasons a shape could not be built.
///
/// Never surfaced to callers of the drawing API: a failed build only makes
/// the shape invalid.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    #[error("point cannot be projected to the screen")]
    Unprojectable,
    #[error("projected point is out of range")]
    OutOfRange,
    #[error("degenerate geometry: {0}")]
    Degenerate(&'static str),
}

/// Common contract of all built shapes.
pub trait Shape {
    /// Whether the shape may be drawn.
    fn is_valid(&self) -> bool;
}

/// Everything a builder needs from the current frame.
///
/// Borrowed for the duration of one construction; the projector and the
/// config are read-only for that time.
#[derive(Clone, Copy)]
pub struct ProjectionContext<'a> {
    projector: &'a dyn ScreenProjector,
    config: DrawConfig,
}

impl<'a> ProjectionContext<'a> {
    pub fn new(projector: &'a dyn ScreenProjector, config: DrawConfig) -> Self {
        Self { projector, config }
    }

    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    /// Project a single world point.
    #[inline]
    pub fn project(&self, world: Vec3) -> Result<Vec2, ShapeError> {
        self.projector
            .world_to_screen(world)
            .ok_or(ShapeError::Unprojectable)
    }

    /// Project a world-space radius around `center`.
    ///
    /// Returns the screen radius and the projected center. The radius is the
    /// screen distance between the projected center and a point offset by
    /// `radius` along the camera's up vector.
    pub fn project_radius(&self, center: Vec3, radius: f32) -> Result<(f32, Vec2), ShapeError> {
        let center2d = self.project(center)?;
        let top = center + self.projector.camera_up().normalize() * radius;
        let top2d = self.project(top)?;
        Ok((top2d.distance(center2d), center2d))
    }

    /// Transform local offsets by `transform`, translate them by `origin`
    /// and project each one. Fails if any single point fails.
    pub fn project_corners<const N: usize>(
        &self,
        points: &[Vec3; N],
        transform: &Mat4,
        origin: Vec3,
    ) -> Result<[Vec2; N], ShapeError> {
        let mut out = [Vec2::ZERO; N];
        for (dst, local) in out.iter_mut().zip(points) {
            *dst = self.project(transform.transform_vector3(*local) + origin)?;
        }
        Ok(out)
    }
}

/// Reject a projected point whose magnitude is unusable.
#[inline]
pub(crate) fn check_range(p: Vec2) -> Result<Vec2, ShapeError> {
    if point_in_range(p) {
        Ok(p)
    } else {
        Err(ShapeError::OutOfRange)
    }
}

/// Log why a shape was rejected.
pub(crate) fn log_rejected(kind: &str, err: ShapeError) {
    log::trace!("{kind} skipped: {err}");
}

#[cfg(test)]
pub(crate) mod test_support {
    use hbdraw_core::math::{Vec2, Vec3};
    use hbdraw_core::{CameraState, Projection, ScreenProjector};

    /// 800x800 perspective camera at `eye` looking at the origin.
    pub fn camera_at(eye: Vec3) -> CameraState {
        let up = if eye.normalize().dot(Vec3::Y).abs() > 0.99 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        CameraState::look_at(
            eye,
            Vec3::ZERO,
            up,
            Projection::perspective(60.0, 1.0, 0.1, 500.0),
            Vec2::new(800.0, 800.0),
        )
    }

    /// Projector that fails for any point within `radius` of `hole`.
    pub struct HoleProjector {
        pub camera: CameraState,
        pub hole: Vec3,
        pub radius: f32,
    }

    impl ScreenProjector for HoleProjector {
        fn world_to_screen(&self, world: Vec3) -> Option<Vec2> {
            if world.distance(self.hole) <= self.radius {
                return None;
            }
            self.camera.world_to_screen(world)
        }

        fn camera_up(&self) -> Vec3 {
            self.camera.camera_up()
        }
    }
}

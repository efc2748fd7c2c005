//! Camera snapshot and world-to-screen projection.

use crate::math::{Mat4, Vec2, Vec3};

/// Camera projection type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective {
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    Orthographic {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    },
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Perspective {
            fov_y: std::f32::consts::FRAC_PI_4, // 45 degrees
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Projection {
    pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Projection::Perspective {
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near,
            far,
        }
    }

    pub fn orthographic(width: f32, height: f32, near: f32, far: f32) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        Projection::Orthographic {
            left: -half_w,
            right: half_w,
            bottom: -half_h,
            top: half_h,
            near,
            far,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        match self {
            Projection::Perspective {
                fov_y,
                aspect,
                near,
                far,
            } => crate::math::perspective_rh(*fov_y, *aspect, *near, *far),
            Projection::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => Mat4::orthographic_rh(*left, *right, *bottom, *top, *near, *far),
        }
    }
}

/// Projects world positions into screen space.
///
/// Implementations must be deterministic for a given camera state and
/// must return `None` for points behind the camera or when the transform
/// is unusable. Nothing may be cached across frames.
pub trait ScreenProjector {
    /// Project a world position to screen pixels.
    fn world_to_screen(&self, world: Vec3) -> Option<Vec2>;

    /// Camera up direction in world space, used to turn world radii into
    /// screen radii. Need not be normalized.
    fn camera_up(&self) -> Vec3;
}

/// Read-only camera state for one frame.
///
/// Refreshed once per frame by the owner of the camera and copied into
/// every drawing context, so shape construction never observes a
/// half-updated camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Camera position in world space.
    pub origin: Vec3,
    /// Viewing direction (normalized).
    pub forward: Vec3,
    /// Camera up direction (normalized).
    pub up: Vec3,
    /// World-to-camera matrix.
    pub view: Mat4,
    /// Camera-to-clip matrix.
    pub projection: Mat4,
    /// Render target size in pixels.
    pub screen_size: Vec2,
}

impl CameraState {
    /// Camera at `eye` looking at `target`.
    pub fn look_at(
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        projection: Projection,
        screen_size: Vec2,
    ) -> Self {
        let forward = (target - eye).normalize();
        let right = forward.cross(up).normalize();
        Self {
            origin: eye,
            forward,
            up: right.cross(forward),
            view: crate::math::look_at_rh(eye, target, up),
            projection: projection.matrix(),
            screen_size,
        }
    }

    /// Camera from externally supplied matrices.
    ///
    /// `origin`, `forward` and `up` are derived from the inverse view matrix
    /// (right-handed, the camera looks down its local -Z).
    pub fn from_matrices(view: Mat4, projection: Mat4, screen_size: Vec2) -> Self {
        let inv_view = view.inverse();
        Self {
            origin: inv_view.w_axis.truncate(),
            forward: -inv_view.z_axis.truncate().normalize(),
            up: inv_view.y_axis.truncate().normalize(),
            view,
            projection,
            screen_size,
        }
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

impl ScreenProjector for CameraState {
    fn world_to_screen(&self, world: Vec3) -> Option<Vec2> {
        // behind camera
        if (world - self.origin).dot(self.forward) <= 0.0 {
            return None;
        }

        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }

        let ndc = clip.truncate() / clip.w;
        let screen = Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.screen_size.x,
            (1.0 - ndc.y) * 0.5 * self.screen_size.y,
        );
        screen.is_finite().then_some(screen)
    }

    fn camera_up(&self) -> Vec3 {
        self.up
    }
}

//! Math type aliases and screen-space geometry helpers.
//!
//! All shape projection works in `f32`: world positions are [`Vec3`],
//! projected positions are [`Vec2`] pixels with the y axis pointing down.

pub use glam;

// ===== Math types (always f32) =====

/// 2D vector (f32). Screen-space positions and offsets.
pub type Vec2 = glam::Vec2;

/// 3D vector (f32). World-space positions and directions.
pub type Vec3 = glam::Vec3;

/// 4D vector (f32).
pub type Vec4 = glam::Vec4;

/// 4x4 matrix (f32), column-major.
pub type Mat4 = glam::Mat4;

/// Largest absolute screen coordinate accepted by [`point_in_range`].
pub const SCREEN_COORD_LIMIT: f32 = 10_000.0;

// ===== Geometry helpers =====

/// Twice the signed area of the screen-space triangle `(a, b, c)`.
///
/// Computed as the 2D cross product of `c - a` and `c - b`, which has the
/// same sign as the usual `(b - a) x (c - a)` orientation test.
#[inline]
pub fn signed_area(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (c - a).perp_dot(c - b)
}

/// Whether the screen-space triangle `(a, b, c)` faces the viewer.
///
/// True iff [`signed_area`] is strictly positive. Zero-area triangles are
/// never front-facing.
#[inline]
pub fn frontface(a: Vec2, b: Vec2, c: Vec2) -> bool {
    signed_area(a, b, c) > 0.0
}

/// Whether segment `p1-p2` properly crosses segment `q1-q2`.
///
/// Both orientation products must be strictly negative, so touching
/// endpoints and collinear overlap do not count as an intersection.
pub fn segments_intersect(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> bool {
    let p = p2 - p1;
    let q = q2 - q1;
    let q_straddles_p = p.perp_dot(q1 - p1) * p.perp_dot(q2 - p1) < 0.0;
    let p_straddles_q = q.perp_dot(p1 - q1) * q.perp_dot(p2 - q1) < 0.0;
    q_straddles_p && p_straddles_q
}

/// Whether a projected point is small enough to be used as geometry.
///
/// Points close to the camera plane blow up during the perspective divide;
/// those are rejected instead of being fed into later arithmetic.
#[inline]
pub fn point_in_range(p: Vec2) -> bool {
    p.x.abs() < SCREEN_COORD_LIMIT && p.y.abs() < SCREEN_COORD_LIMIT
}

/// Build a right-handed perspective projection with depth range [0, 1].
pub fn perspective_rh(yfov: f32, aspect: f32, znear: f32, zfar: f32) -> Mat4 {
    Mat4::perspective_rh(yfov, aspect, znear, zfar)
}

/// Right-handed look-at view matrix.
pub fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    Mat4::look_at_rh(eye, target, up)
}

/// Build a rotation-only 4x4 matrix from Euler angles in radians (XYZ order).
pub fn mat4_from_euler_xyz(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_euler(glam::EulerRot::XYZ, x, y, z)
}

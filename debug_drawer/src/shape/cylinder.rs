use hbdraw_core::config::MIN_SEGMENTS;
use hbdraw_core::math::{frontface, Vec2, Vec3};

use super::{log_rejected, PointId, ProjectionContext, Shape, ShapeError};

/// A cylinder projected to screen space.
///
/// The cylinder is tessellated into two rings of `segments` points: the top
/// ring around `start` and the bottom ring around `end`. Construction walks
/// the rings two segments at a time and records which parts of the outline
/// are visible:
///
/// - `*_ellipse_face`: ring points bounding the visible side wall. The top
///   and bottom lists always have the same length and pair up index by
///   index.
/// - `*_ellipse_base`: ring points where only the cap is visible.
/// - `*_base`: every visible point of that ring, face and cap alike, in
///   scan order. Used for outlining.
///
/// Only one of the two caps is ever recorded for a single construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    points: Vec<Vec2>,
    top_ellipse_base: Vec<PointId>,
    bottom_ellipse_base: Vec<PointId>,
    top_ellipse_face: Vec<PointId>,
    bottom_ellipse_face: Vec<PointId>,
    top_base: Vec<PointId>,
    bottom_base: Vec<PointId>,
    valid: bool,
}

impl Cylinder {
    /// Project a cylinder from `start` to `end`.
    pub fn build(ctx: &ProjectionContext<'_>, start: Vec3, end: Vec3, radius: f32) -> Self {
        Self::build_with(ctx, start, end, radius, 0.0, false)
    }

    /// Project a cylinder whose ring tessellation starts at angle `rot`.
    ///
    /// A `hollow` cylinder treats the inside of its wall as the visible
    /// side.
    pub fn build_with(
        ctx: &ProjectionContext<'_>,
        start: Vec3,
        end: Vec3,
        radius: f32,
        rot: f32,
        hollow: bool,
    ) -> Self {
        Self::try_build(ctx, start, end, radius, rot, hollow).unwrap_or_else(|err| {
            log_rejected("cylinder", err);
            Self::invalid()
        })
    }

    pub(super) fn try_build(
        ctx: &ProjectionContext<'_>,
        start: Vec3,
        end: Vec3,
        radius: f32,
        rot: f32,
        hollow: bool,
    ) -> Result<Self, ShapeError> {
        let segments = ctx.config().segments() as usize;
        if segments < MIN_SEGMENTS as usize {
            return Err(ShapeError::Degenerate("too few segments"));
        }
        let axis = end - start;
        if axis.length() <= f32::EPSILON {
            return Err(ShapeError::Degenerate("zero-length cylinder axis"));
        }

        let dir = axis.normalize();
        let mut up = dir.cross(Vec3::Y);
        if up.length() < 0.0001 {
            up = dir.cross(Vec3::X);
        }
        let right = up.cross(dir);

        let mut scan = RingScan {
            ctx,
            centers: [start, end],
            up: up.normalize() * radius,
            right: right.normalize() * radius,
            rot,
            step: std::f32::consts::TAU / segments as f32,
            segments,
            hollow,
            cache: [vec![None; segments], vec![None; segments]],
            face_cursor: 0,
            base_cursor: 0,
            shape: Self::invalid(),
        };
        scan.run()?;

        let mut shape = scan.shape;
        shape.valid = true;
        Ok(shape)
    }

    pub(super) fn invalid() -> Self {
        Self {
            points: Vec::new(),
            top_ellipse_base: Vec::new(),
            bottom_ellipse_base: Vec::new(),
            top_ellipse_face: Vec::new(),
            bottom_ellipse_face: Vec::new(),
            top_base: Vec::new(),
            bottom_base: Vec::new(),
            valid: false,
        }
    }

    /// All projected ring points owned by this cylinder.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn point(&self, id: PointId) -> Vec2 {
        self.points[id]
    }

    /// Resolve a point list to screen positions.
    pub fn resolve(&self, ids: &[PointId]) -> Vec<Vec2> {
        ids.iter().map(|&id| self.points[id]).collect()
    }

    pub fn top_ellipse_base(&self) -> &[PointId] {
        &self.top_ellipse_base
    }

    pub fn bottom_ellipse_base(&self) -> &[PointId] {
        &self.bottom_ellipse_base
    }

    pub fn top_ellipse_face(&self) -> &[PointId] {
        &self.top_ellipse_face
    }

    pub fn bottom_ellipse_face(&self) -> &[PointId] {
        &self.bottom_ellipse_face
    }

    pub fn top_base(&self) -> &[PointId] {
        &self.top_base
    }

    pub fn bottom_base(&self) -> &[PointId] {
        &self.bottom_base
    }
}

impl Shape for Cylinder {
    fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Which ring a point belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rim {
    /// Ring around `start`.
    Top = 0,
    /// Ring around `end`.
    Bottom = 1,
}

/// Outcome of one visibility test.
enum Visibility<T> {
    Hit(T),
    Miss,
    Unprojectable,
}

/// Construction state of a [`Cylinder`].
struct RingScan<'a, 'c> {
    ctx: &'a ProjectionContext<'c>,
    centers: [Vec3; 2],
    up: Vec3,
    right: Vec3,
    rot: f32,
    step: f32,
    segments: usize,
    hollow: bool,
    /// Projected point per segment, per ring.
    cache: [Vec<Option<PointId>>; 2],
    face_cursor: usize,
    base_cursor: usize,
    shape: Cylinder,
}

impl RingScan<'_, '_> {
    fn run(&mut self) -> Result<(), ShapeError> {
        let n = self.segments;
        let half = n / 2;

        let mut i = 0;
        while i <= n {
            if i == n {
                i = n - 1;
            }
            let j = if i <= half { i + half } else { i - half };

            // The face test must run before the base test of the same ring.
            let mut top_hit = false;
            if self.shape.bottom_ellipse_base.is_empty() {
                match self.top_face(i) {
                    Visibility::Hit(quad) => {
                        self.insert_face(quad);
                        top_hit = true;
                    }
                    Visibility::Miss => match self.top_base(i, j) {
                        Visibility::Hit(pair) => {
                            self.insert_base(Rim::Top, pair);
                            top_hit = true;
                        }
                        Visibility::Miss => {}
                        Visibility::Unprojectable => return Err(ShapeError::Unprojectable),
                    },
                    Visibility::Unprojectable => return Err(ShapeError::Unprojectable),
                }
            }

            let mut bottom_hit = false;
            if self.shape.top_ellipse_base.is_empty() && !top_hit {
                match self.bottom_face(i) {
                    Visibility::Hit(quad) => {
                        self.insert_face(quad);
                        bottom_hit = true;
                    }
                    Visibility::Miss => match self.bottom_base(i, j) {
                        Visibility::Hit(pair) => {
                            self.insert_base(Rim::Bottom, pair);
                            bottom_hit = true;
                        }
                        Visibility::Miss => {}
                        Visibility::Unprojectable => return Err(ShapeError::Unprojectable),
                    },
                    Visibility::Unprojectable => return Err(ShapeError::Unprojectable),
                }
            }

            // Restart insertion at the front so a visible run crossing
            // segment 0 stays contiguous and clockwise.
            if !top_hit && !bottom_hit {
                self.face_cursor = 0;
                self.base_cursor = 0;
            }

            i += 2;
        }
        Ok(())
    }

    /// Projected point `segment` of `rim`, projecting it on first use.
    fn point(&mut self, rim: Rim, segment: usize) -> Option<PointId> {
        let segment = if segment == self.segments { 0 } else { segment };
        if let Some(id) = self.cache[rim as usize][segment] {
            return Some(id);
        }

        let angle = self.rot + self.step * segment as f32;
        let world = self.centers[rim as usize] + self.right * angle.cos() + self.up * angle.sin();
        let projected = self.ctx.project(world).ok()?;

        let id = self.shape.points.len();
        self.shape.points.push(projected);
        self.cache[rim as usize][segment] = Some(id);
        Some(id)
    }

    #[inline]
    fn wall_faces_viewer(&self, a: PointId, b: PointId, c: PointId) -> bool {
        let p = &self.shape.points;
        if self.hollow {
            frontface(p[c], p[b], p[a])
        } else {
            frontface(p[a], p[b], p[c])
        }
    }

    /// Wall quad of segment `i`, tested through its top-ring triangle.
    fn top_face(&mut self, i: usize) -> Visibility<[PointId; 4]> {
        let Some(b0) = self.point(Rim::Bottom, i) else {
            return Visibility::Unprojectable;
        };
        let Some(t1) = self.point(Rim::Top, i + 1) else {
            return Visibility::Unprojectable;
        };
        let Some(t0) = self.point(Rim::Top, i) else {
            return Visibility::Unprojectable;
        };
        if !self.wall_faces_viewer(b0, t1, t0) {
            return Visibility::Miss;
        }
        let Some(b1) = self.point(Rim::Bottom, i + 1) else {
            return Visibility::Unprojectable;
        };
        Visibility::Hit([t0, t1, b0, b1])
    }

    /// Top cap edge of segment `i`, tested against the opposite point `j`.
    fn top_base(&mut self, i: usize, j: usize) -> Visibility<[PointId; 2]> {
        let Some(t0) = self.point(Rim::Top, i) else {
            return Visibility::Unprojectable;
        };
        let Some(t1) = self.point(Rim::Top, i + 1) else {
            return Visibility::Unprojectable;
        };
        let Some(tj) = self.point(Rim::Top, j) else {
            return Visibility::Unprojectable;
        };
        let p = &self.shape.points;
        if frontface(p[t0], p[t1], p[tj]) {
            Visibility::Hit([t0, t1])
        } else {
            Visibility::Miss
        }
    }

    /// Wall quad of segment `i`, tested through its bottom-ring triangle.
    fn bottom_face(&mut self, i: usize) -> Visibility<[PointId; 4]> {
        let Some(b0) = self.point(Rim::Bottom, i) else {
            return Visibility::Unprojectable;
        };
        let Some(b1) = self.point(Rim::Bottom, i + 1) else {
            return Visibility::Unprojectable;
        };
        let Some(t0) = self.point(Rim::Top, i) else {
            return Visibility::Unprojectable;
        };
        if !self.wall_faces_viewer(b0, b1, t0) {
            return Visibility::Miss;
        }
        let Some(t1) = self.point(Rim::Top, i + 1) else {
            return Visibility::Unprojectable;
        };
        Visibility::Hit([t0, t1, b0, b1])
    }

    /// Bottom cap edge of segment `i`, tested against the opposite point `j`.
    fn bottom_base(&mut self, i: usize, j: usize) -> Visibility<[PointId; 2]> {
        let Some(b0) = self.point(Rim::Bottom, i) else {
            return Visibility::Unprojectable;
        };
        let Some(b1) = self.point(Rim::Bottom, i + 1) else {
            return Visibility::Unprojectable;
        };
        let Some(bj) = self.point(Rim::Bottom, j) else {
            return Visibility::Unprojectable;
        };
        let p = &self.shape.points;
        if frontface(p[bj], p[b1], p[b0]) {
            Visibility::Hit([b0, b1])
        } else {
            Visibility::Miss
        }
    }

    /// Record a visible wall segment `[top i, top i+1, bottom i, bottom i+1]`.
    fn insert_face(&mut self, [t0, t1, b0, b1]: [PointId; 4]) {
        let at = self.face_cursor;
        let shape = &mut self.shape;
        shape.top_ellipse_face.insert(at, t0);
        shape.top_ellipse_face.insert(at + 1, t1);
        shape.bottom_ellipse_face.insert(at, b0);
        shape.bottom_ellipse_face.insert(at + 1, b1);
        shape.top_base.extend([t0, t1]);
        shape.bottom_base.extend([b0, b1]);
        self.face_cursor += 2;
        self.base_cursor = 0;
    }

    /// Record a visible cap edge of `rim`.
    fn insert_base(&mut self, rim: Rim, pair: [PointId; 2]) {
        let at = self.base_cursor;
        let shape = &mut self.shape;
        let (partial, full) = match rim {
            Rim::Top => (&mut shape.top_ellipse_base, &mut shape.top_base),
            Rim::Bottom => (&mut shape.bottom_ellipse_base, &mut shape.bottom_base),
        };
        partial.insert(at, pair[0]);
        partial.insert(at + 1, pair[1]);
        full.extend(pair);
        self.base_cursor += 2;
        self.face_cursor = 0;
    }
}

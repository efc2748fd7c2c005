use hbdraw_core::math::{Mat4, Vec3};

use crate::draw_list::Paint;
use crate::drawer::DebugDrawerContext;
use crate::shape::{Capsule, Cuboid, Cylinder, Ring, Sphere, Triangle};

impl DebugDrawerContext<'_> {
    /// Draw a sphere as a filled disk, with a wire cage when outlined.
    pub fn draw_sphere(&mut self, center: Vec3, radius: f32, paint: Paint) {
        let shape = Sphere::build(&self.projection(), center, radius);
        self.draw_shape(&shape, paint);
    }

    /// Draw an oriented box given its center, half-extents and rotation.
    pub fn draw_box(&mut self, pos: Vec3, extent: Vec3, rotation: Mat4, paint: Paint) {
        let shape = Cuboid::build(&self.projection(), pos, extent, &rotation);
        self.draw_shape(&shape, paint);
    }

    /// Draw a double triangle (two triangles joined by three side quads).
    pub fn draw_triangle(&mut self, pos: Vec3, extent: Vec3, rotation: Mat4, paint: Paint) {
        let shape = Triangle::build(&self.projection(), pos, extent, &rotation);
        self.draw_shape(&shape, paint);
    }

    /// Draw a capped cylinder. A zero-length axis draws a sphere at `start`.
    pub fn draw_cylinder(&mut self, start: Vec3, end: Vec3, radius: f32, paint: Paint) {
        if (end - start).length() <= 0.0 {
            self.draw_sphere(start, radius, paint);
            return;
        }
        let shape = Cylinder::build(&self.projection(), start, end, radius);
        self.draw_shape(&shape, paint);
    }

    /// Draw a thick ring with outer radius `radius_a` and inner radius
    /// `radius_b`.
    pub fn draw_ring(&mut self, start: Vec3, end: Vec3, radius_a: f32, radius_b: f32, paint: Paint) {
        let shape = Ring::build(&self.projection(), start, end, radius_a, radius_b);
        self.draw_shape(&shape, paint);
    }

    /// Draw a capsule. A zero-length axis draws a sphere at `start`.
    pub fn draw_capsule(&mut self, start: Vec3, end: Vec3, radius: f32, paint: Paint) {
        if (end - start).length() <= 0.0 {
            self.draw_sphere(start, radius, paint);
            return;
        }
        let shape = Capsule::build(&self.projection(), start, end, radius);
        self.draw_shape(&shape, paint);
    }
}

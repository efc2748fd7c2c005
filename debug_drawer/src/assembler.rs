//! Turns built shapes into fill and outline calls on a [`DrawList`].

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use hbdraw_core::math::Vec2;
use hbdraw_core::DrawConfig;

use crate::draw_list::{DrawList, FillRule, Paint};
use crate::shape::{
    neighbor_of_nearest, Capsule, Cuboid, Cylinder, Ring, Shape, Sphere, Triangle,
};

/// A shape that knows how to emit itself.
pub trait DrawShape: Shape {
    /// Emit draw calls. Only called for valid shapes.
    fn emit(&self, list: &mut dyn DrawList, paint: &Paint, config: &DrawConfig);

    /// Emit draw calls, or nothing if the shape is invalid.
    fn draw(&self, list: &mut dyn DrawList, paint: &Paint, config: &DrawConfig) {
        if self.is_valid() {
            self.emit(list, paint, config);
        }
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// Fill the current path, stroke it if outlined, then clear it.
fn paint_path(
    list: &mut dyn DrawList,
    paint: &Paint,
    config: &DrawConfig,
    closed: bool,
    rule: FillRule,
) {
    list.fill_path(rule, paint.fill);
    if let Some(outline) = paint.outline {
        list.stroke_path(outline, closed, config.outline_thickness());
    }
    list.path_clear();
}

/// Stroke the current path if outlined, then clear it.
fn stroke_path(list: &mut dyn DrawList, paint: &Paint, config: &DrawConfig, closed: bool) {
    if let Some(outline) = paint.outline {
        list.stroke_path(outline, closed, config.outline_thickness());
    }
    list.path_clear();
}

fn path_points(list: &mut dyn DrawList, points: &[Vec2], reverse: bool) {
    if reverse {
        points
            .iter()
            .rev()
            .for_each(|&p| list.path_line_to_merge_duplicate(p));
    } else {
        points
            .iter()
            .for_each(|&p| list.path_line_to_merge_duplicate(p));
    }
}

/// Push every consecutive pair as two separate points.
fn path_points_duplicate(list: &mut dyn DrawList, points: &[Vec2], reverse: bool) {
    if reverse {
        for pair in points.windows(2).rev() {
            list.path_line_to(pair[1]);
            list.path_line_to(pair[0]);
        }
    } else {
        for pair in points.windows(2) {
            list.path_line_to(pair[0]);
            list.path_line_to(pair[1]);
        }
    }
}

/// Quads between two parallel point strips.
fn fill_band(list: &mut dyn DrawList, a: &[Vec2], b: &[Vec2], paint: &Paint) {
    for (sa, sb) in a.windows(2).zip(b.windows(2)) {
        list.add_quad_filled([sa[0], sa[1], sb[1], sb[0]], paint.fill);
    }
}

/// Quads between two closed loops, wrapping the last pair around.
fn fill_loop(list: &mut dyn DrawList, a: &[Vec2], b: &[Vec2], paint: &Paint) {
    let n = a.len().min(b.len());
    for i in 0..n {
        let j = if i == n - 1 { 0 } else { i + 1 };
        list.add_quad_filled([a[i], a[j], b[j], b[i]], paint.fill);
    }
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

impl DrawShape for Sphere {
    fn emit(&self, list: &mut dyn DrawList, paint: &Paint, config: &DrawConfig) {
        let segments = config.segments();
        list.add_circle_filled(self.center(), self.radius(), paint.fill, segments);

        let Some(outline) = paint.outline else {
            return;
        };
        let thickness = config.outline_thickness();
        list.add_circle(self.center(), self.radius(), outline, segments, thickness);

        // Three half-ellipses suggest the sphere's volume.
        let radii = Vec2::new(self.radius(), self.radius() * FRAC_PI_4.cos());
        for rotation in [0.0, FRAC_PI_2, PI] {
            list.path_elliptical_arc_to(self.center(), radii, rotation, 0.0, PI, segments);
            list.stroke_path(outline, false, thickness);
            list.path_clear();
        }
    }
}

impl DrawShape for Cuboid {
    fn emit(&self, list: &mut dyn DrawList, paint: &Paint, config: &DrawConfig) {
        for quad in self.quads() {
            for p in self.quad_points(quad) {
                list.path_line_to(p);
            }
            paint_path(list, paint, config, true, FillRule::Convex);
        }
    }
}

impl DrawShape for Triangle {
    fn emit(&self, list: &mut dyn DrawList, paint: &Paint, config: &DrawConfig) {
        for tri in [self.top_triangle(), self.bottom_triangle()].into_iter().flatten() {
            for p in self.resolve(&tri) {
                list.path_line_to(p);
            }
            paint_path(list, paint, config, true, FillRule::Convex);
        }
        for quad in self.quads() {
            for p in self.resolve(quad) {
                list.path_line_to(p);
            }
            paint_path(list, paint, config, true, FillRule::Convex);
        }
    }
}

impl DrawShape for Cylinder {
    fn emit(&self, list: &mut dyn DrawList, paint: &Paint, config: &DrawConfig) {
        let base = if self.top_ellipse_base().is_empty() {
            self.resolve(self.bottom_ellipse_base())
        } else {
            self.resolve(self.top_ellipse_base())
        };

        if self.top_ellipse_face().is_empty() {
            path_points(list, &base, false);
            paint_path(list, paint, config, false, FillRule::Convex);
            return;
        }

        // The strip on the visible cap side goes first.
        let (near, far) = if self.top_ellipse_base().is_empty() {
            (self.bottom_ellipse_face(), self.top_ellipse_face())
        } else {
            (self.top_ellipse_face(), self.bottom_ellipse_face())
        };
        let near = self.resolve(near);
        let far = self.resolve(far);

        fill_band(list, &near, &far, paint);

        if paint.outline.is_some() {
            path_points(list, &near, false);
            path_points(list, &far, true);
            stroke_path(list, paint, config, true);
        }

        if !base.is_empty() {
            path_points(list, &near, false);
            path_points(list, &base, false);
            paint_path(list, paint, config, true, FillRule::Convex);
        }
    }
}

impl DrawShape for Ring {
    fn emit(&self, list: &mut dyn DrawList, paint: &Paint, config: &DrawConfig) {
        let outer = self.outer();
        let inner = self.inner();

        // Work from whichever end cap of the outer cylinder is visible.
        let from_end = outer.top_ellipse_base().is_empty();
        let (base_ellipse_outer, base_outer, base_ellipse_inner_ids, base_inner_ids, center) =
            if from_end {
                (
                    outer.bottom_ellipse_base(),
                    outer.bottom_base(),
                    inner.bottom_ellipse_base(),
                    inner.bottom_base(),
                    self.end_center(),
                )
            } else {
                (
                    outer.top_ellipse_base(),
                    outer.top_base(),
                    inner.top_ellipse_base(),
                    inner.top_base(),
                    self.start_center(),
                )
            };
        let (face_outer1, face_outer2, face_inner1, face_inner2_ids) = if from_end {
            (
                outer.bottom_ellipse_face(),
                outer.top_ellipse_face(),
                inner.bottom_ellipse_face(),
                inner.top_ellipse_face(),
            )
        } else {
            (
                outer.top_ellipse_face(),
                outer.bottom_ellipse_face(),
                inner.top_ellipse_face(),
                inner.bottom_ellipse_face(),
            )
        };

        if base_ellipse_outer.is_empty() && base_ellipse_inner_ids.is_empty() {
            outer.emit(list, paint, config);
            return;
        }

        let base_outer = outer.resolve(base_outer);
        let base_inner = inner.resolve(base_inner_ids);
        let base_ellipse_inner = inner.resolve(base_ellipse_inner_ids);
        let face_outer1 = outer.resolve(face_outer1);
        let face_outer2 = outer.resolve(face_outer2);
        let face_inner1 = inner.resolve(face_inner1);
        let face_inner2 = inner.resolve(face_inner2_ids);

        // Annulus between the two caps.
        fill_loop(list, &base_outer, &base_inner, paint);

        if paint.outline.is_some() {
            path_points(list, &base_inner, false);
            stroke_path(list, paint, config, false);
            path_points(list, &base_outer, false);
            stroke_path(list, paint, config, false);
        }

        // Looking straight through the hole.
        if base_inner.len() == face_inner1.len()
            && base_inner.len() == face_inner2.len()
            && face_outer1.is_empty()
        {
            fill_loop(list, &base_inner, &face_inner2, paint);
            if paint.outline.is_some() {
                path_points(list, &face_inner2, false);
                stroke_path(list, paint, config, false);
            }
            return;
        }

        if let (Some(&outer1_first), Some(&outer2_last)) = (face_outer1.first(), face_outer2.last()) {
            fill_band(list, &face_outer1, &face_outer2, paint);
            if paint.outline.is_some() {
                path_points(list, &face_outer1, false);
                list.path_line_to(outer2_last);
                path_points(list, &face_outer2, true);
                list.path_line_to(outer1_first);
                stroke_path(list, paint, config, false);
            }
        }

        // Far inner wall, minus the part hidden behind the near cap edge.
        let trim_ids = self.remove_intersections(center, base_inner_ids, face_inner2_ids);
        let trim = inner.resolve(&trim_ids);
        stitch_inner_wall(
            list,
            paint,
            config,
            &trim,
            &base_inner,
            &base_ellipse_inner,
            &face_inner1,
        );
    }
}

/// Join the trimmed far inner wall of a ring to its visible inner cap.
///
/// An empty `trim` means the whole far wall is hidden and the inner base is
/// filled instead. Without a visible `cap` only the trimmed wall is stroked.
fn stitch_inner_wall(
    list: &mut dyn DrawList,
    paint: &Paint,
    config: &DrawConfig,
    trim: &[Vec2],
    base: &[Vec2],
    cap: &[Vec2],
    near_wall: &[Vec2],
) {
    let (Some(&trim_first), Some(&trim_last)) = (trim.first(), trim.last()) else {
        path_points(list, base, false);
        list.fill_path(FillRule::Convex, paint.fill);
        list.path_clear();
        return;
    };

    let (Some(idx1), Some(idx2), Some(&cap_first), Some(&cap_last)) = (
        neighbor_of_nearest(trim_first, cap, true),
        neighbor_of_nearest(trim_last, cap, false),
        cap.first(),
        cap.last(),
    ) else {
        path_points(list, trim, false);
        stroke_path(list, paint, config, false);
        return;
    };

    path_points_duplicate(list, trim, false);
    list.path_line_to_merge_duplicate(trim_last);
    list.path_line_to(cap_first);
    path_points_duplicate(list, near_wall, true);
    list.path_line_to(cap_last);
    list.fill_path(FillRule::Concave, paint.fill);
    list.path_clear();

    if let Some(outline) = paint.outline {
        let thickness = config.outline_thickness();
        list.add_line(cap[idx1], trim_first, outline, thickness);
        list.add_line(cap[idx2], trim_last, outline, thickness);
    }

    // Wedges between the wall ends and the cap.
    list.path_line_to(trim_first);
    for &p in &cap[idx1..] {
        list.path_line_to(p);
    }
    list.path_line_to(trim_first);
    list.fill_path(FillRule::Convex, paint.fill);
    list.path_clear();

    list.path_line_to_merge_duplicate(trim_last);
    for &p in &cap[..=idx2] {
        list.path_line_to(p);
    }
    list.path_line_to_merge_duplicate(trim_last);
    list.fill_path(FillRule::Convex, paint.fill);
    list.path_clear();

    if paint.outline.is_some() {
        path_points(list, trim, false);
        stroke_path(list, paint, config, false);
    }
}

impl DrawShape for Capsule {
    fn emit(&self, list: &mut dyn DrawList, paint: &Paint, config: &DrawConfig) {
        let segments = config.segments();

        if self.is_sphere() {
            let cap = self.larger_cap();
            list.add_circle_filled(cap.center, cap.radius, paint.fill, segments);
            if let Some(outline) = paint.outline {
                list.add_circle(
                    cap.center,
                    cap.radius,
                    outline,
                    segments,
                    config.outline_thickness(),
                );
            }
            return;
        }

        for cap in [self.top(), self.bottom()] {
            list.path_arc_to(cap.center, cap.radius, cap.a_min, cap.a_max, segments);
        }
        paint_path(list, paint, config, true, FillRule::Convex);
    }
}

use std::sync::Arc;
use std::thread;

use hbdraw_core::math::{Mat4, Vec2, Vec3};
use hbdraw_core::{CameraState, DrawConfig, Projection, ScreenProjector};
use hbdraw_debug_drawer::shape::{Capsule, Cylinder, Ring};
use hbdraw_debug_drawer::{
    CommandList, DebugDrawer, DrawCommand, DrawShape, FillRule, Paint, ProjectionContext, Shape,
};

const FILL: [f32; 4] = [0.9, 0.3, 0.1, 0.4];
const LINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn camera(eye: Vec3) -> CameraState {
    CameraState::look_at(
        eye,
        Vec3::ZERO,
        Vec3::Y,
        Projection::perspective(60.0, 16.0 / 9.0, 0.1, 1000.0),
        Vec2::new(1920.0, 1080.0),
    )
}

fn points_of(command: &DrawCommand) -> Vec<Vec2> {
    match command {
        DrawCommand::Polygon { points, .. } | DrawCommand::Polyline { points, .. } => {
            points.clone()
        }
        DrawCommand::QuadFilled { quad, .. } => quad.to_vec(),
        DrawCommand::Line { from, to, .. } => vec![*from, *to],
        DrawCommand::CircleFilled { center, .. } | DrawCommand::Circle { center, .. } => {
            vec![*center]
        }
    }
}

// ---------------------------------------------------------------------------
// Full pipeline: camera → context → shapes → render data
// ---------------------------------------------------------------------------

#[test]
fn full_frame_pipeline() {
    init_logger();
    let drawer = DebugDrawer::new();
    let cam = camera(Vec3::new(0.0, 5.0, 10.0));
    drawer.update_camera(cam);

    {
        let mut ctx = drawer.context().expect("camera installed");
        let paint = Paint::outlined(FILL, LINE);
        ctx.draw_sphere(Vec3::new(-3.0, 0.0, 0.0), 1.0, paint);
        ctx.draw_box(Vec3::ZERO, Vec3::splat(0.5), Mat4::from_rotation_y(0.4), paint);
        ctx.draw_triangle(Vec3::new(3.0, 0.0, 0.0), Vec3::ONE, Mat4::IDENTITY, paint);
        ctx.draw_cylinder(Vec3::new(0.0, 0.0, -3.0), Vec3::new(0.0, 2.0, -3.0), 0.5, paint);
        ctx.draw_ring(Vec3::new(3.0, 0.0, -3.0), Vec3::new(3.0, 0.5, -3.0), 1.0, 0.6, paint);
        ctx.draw_capsule(Vec3::new(-3.0, 0.0, -3.0), Vec3::new(-3.0, 2.0, -3.0), 0.5, paint);
    }

    drawer.update_camera(cam);
    let data = drawer.take_render_data();
    assert!(!data.is_empty());

    // Everything lands on screen.
    for command in &data {
        for p in points_of(command) {
            assert!(p.is_finite());
            assert!(p.x > -1.0 && p.x < 1921.0, "{p:?}");
            assert!(p.y > -1.0 && p.y < 1081.0, "{p:?}");
        }
    }
}

#[test]
fn contexts_from_many_threads() {
    init_logger();
    let drawer = Arc::new(DebugDrawer::new());
    drawer.update_camera(camera(Vec3::new(0.0, 5.0, 10.0)));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let drawer = Arc::clone(&drawer);
            thread::spawn(move || {
                let mut ctx = drawer.context().expect("camera installed");
                ctx.draw_sphere(Vec3::new(i as f32, 0.0, 0.0), 0.5, Paint::fill(FILL));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    drawer.update_camera(camera(Vec3::new(0.0, 5.0, 10.0)));
    assert_eq!(drawer.take_render_data().len(), 4);
}

#[test]
fn config_changes_reach_new_contexts() {
    init_logger();
    let drawer = DebugDrawer::new();
    drawer.update_camera(camera(Vec3::new(0.0, 0.0, 10.0)));
    drawer.set_segments(12).unwrap();
    drawer.set_outline_thickness(2.5).unwrap();

    {
        let mut ctx = drawer.context().unwrap();
        ctx.draw_capsule(Vec3::new(-2.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0), 0.5, Paint::outlined(FILL, LINE));
    }
    drawer.update_camera(camera(Vec3::new(0.0, 0.0, 10.0)));

    let data = drawer.take_render_data();
    assert_eq!(data.len(), 2);
    match &data[0] {
        DrawCommand::Polygon { points, .. } => assert_eq!(points.len(), 2 * 13),
        other => panic!("unexpected command {other:?}"),
    }
    match &data[1] {
        DrawCommand::Polyline { thickness, .. } => assert_eq!(*thickness, 2.5),
        other => panic!("unexpected command {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Shapes used directly with a custom backend
// ---------------------------------------------------------------------------

#[test]
fn capsule_degeneracy_examples() {
    let cam = camera(Vec3::new(0.0, 0.0, 20.0));
    let ctx = ProjectionContext::new(&cam, DrawConfig::default());

    let short = Capsule::build(&ctx, Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0), 5.0);
    assert!(short.is_valid());
    assert!(short.is_sphere());

    let side = CameraState::look_at(
        Vec3::new(20.0, 0.0, 5.0),
        Vec3::new(0.0, 0.0, 5.0),
        Vec3::Z,
        Projection::perspective(60.0, 1.0, 0.1, 1000.0),
        Vec2::new(800.0, 800.0),
    );
    let ctx = ProjectionContext::new(&side, DrawConfig::default());
    let long = Capsule::build(&ctx, Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), 1.0);
    assert!(long.is_valid());
    assert!(!long.is_sphere());
    assert_ne!(long.top().a_min, long.top().a_max);
    assert_ne!(long.bottom().a_min, long.bottom().a_max);
}

#[test]
fn cylinder_behind_camera_draws_nothing() {
    init_logger();
    let cam = camera(Vec3::new(0.0, 0.0, 10.0));
    let ctx = ProjectionContext::new(&cam, DrawConfig::default());
    let cylinder = Cylinder::build(&ctx, Vec3::new(0.0, 0.0, 11.0), Vec3::new(0.0, 1.0, 11.0), 1.0);
    assert!(!cylinder.is_valid());

    let mut list = CommandList::new();
    cylinder.draw(&mut list, &Paint::outlined(FILL, LINE), ctx.config());
    assert!(list.is_empty());
}

#[test]
fn ring_orbit_stays_finite() {
    init_logger();
    let paint = Paint::outlined(FILL, LINE);
    for step in 0..24 {
        let angle = step as f32 * std::f32::consts::TAU / 24.0;
        let eye = Vec3::new(angle.cos() * 8.0, 3.0 + angle.sin() * 4.0, angle.sin() * 8.0);
        let cam = camera(eye);
        let ctx = ProjectionContext::new(&cam, DrawConfig::default());
        let ring = Ring::build(&ctx, Vec3::new(0.0, 0.3, 0.0), Vec3::new(0.0, -0.3, 0.0), 2.0, 1.2);
        assert!(ring.is_valid(), "eye {eye:?}");

        let mut list = CommandList::new();
        ring.draw(&mut list, &paint, ctx.config());
        assert!(!list.is_empty(), "eye {eye:?}");
        assert!(list.path().is_empty());
        for command in list.commands() {
            assert!(points_of(command).iter().all(|p| p.is_finite()));
        }
    }
}

#[test]
fn ring_orbit_stitches_inner_wall_to_cap() {
    init_logger();
    let paint = Paint::outlined(FILL, LINE);
    let mut stitched = 0;
    for step in 0..24 {
        let angle = step as f32 * std::f32::consts::TAU / 24.0;
        let eye = Vec3::new(angle.cos() * 8.0, 3.0 + angle.sin() * 4.0, angle.sin() * 8.0);
        let cam = camera(eye);
        let ctx = ProjectionContext::new(&cam, DrawConfig::default());
        let ring = Ring::build(&ctx, Vec3::new(0.0, 0.3, 0.0), Vec3::new(0.0, -0.3, 0.0), 2.0, 1.2);

        let mut list = CommandList::new();
        ring.draw(&mut list, &paint, ctx.config());
        let commands = list.commands();

        let concave: Vec<usize> = commands
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c, DrawCommand::Polygon { rule: FillRule::Concave, .. }))
            .map(|(i, _)| i)
            .collect();
        let Some(&k) = concave.first() else {
            continue;
        };
        assert_eq!(concave.len(), 1, "eye {eye:?}");
        stitched += 1;

        // Rebuild the far wall trim the way the assembler sees it.
        let (outer, inner) = (ring.outer(), ring.inner());
        let (center, base, cap, far_wall) = if outer.top_ellipse_base().is_empty() {
            (
                ring.end_center(),
                inner.bottom_base(),
                inner.bottom_ellipse_base(),
                inner.top_ellipse_face(),
            )
        } else {
            (
                ring.start_center(),
                inner.top_base(),
                inner.top_ellipse_base(),
                inner.bottom_ellipse_face(),
            )
        };
        let trim = inner.resolve(&ring.remove_intersections(center, base, far_wall));
        let cap_points = inner.resolve(cap);
        let first = trim[0];
        let last = trim[trim.len() - 1];
        let idx1 = ring.nearest_boundary_index(first, cap, true).unwrap();
        let idx2 = ring.nearest_boundary_index(last, cap, false).unwrap();

        assert_eq!(points_of(&commands[k])[0], first, "eye {eye:?}");
        match (&commands[k + 1], &commands[k + 2]) {
            (
                DrawCommand::Line { from: a, to: b, .. },
                DrawCommand::Line { from: c, to: d, .. },
            ) => {
                assert_eq!((*a, *b), (cap_points[idx1], first), "eye {eye:?}");
                assert_eq!((*c, *d), (cap_points[idx2], last), "eye {eye:?}");
            }
            other => panic!("expected two chords, got {other:?}"),
        }
        for (command, end) in [(&commands[k + 3], first), (&commands[k + 4], last)] {
            match command {
                DrawCommand::Polygon {
                    points,
                    rule: FillRule::Convex,
                    ..
                } => {
                    assert_eq!(points.first(), Some(&end), "eye {eye:?}");
                    assert_eq!(points.last(), Some(&end), "eye {eye:?}");
                }
                other => panic!("expected a convex wedge, got {other:?}"),
            }
        }
    }
    assert!(stitched > 0);
}

/// Projector that mirrors the screen horizontally.
struct Mirrored(CameraState);

impl ScreenProjector for Mirrored {
    fn world_to_screen(&self, world: Vec3) -> Option<Vec2> {
        let p = self.0.world_to_screen(world)?;
        Some(Vec2::new(self.0.screen_size.x - p.x, p.y))
    }

    fn camera_up(&self) -> Vec3 {
        self.0.camera_up()
    }
}

#[test]
fn custom_projector_is_honoured() {
    let cam = camera(Vec3::new(0.0, 0.0, 10.0));
    let mirrored = Mirrored(cam);
    let plain = ProjectionContext::new(&cam, DrawConfig::default());
    let flipped = ProjectionContext::new(&mirrored, DrawConfig::default());

    let a = hbdraw_debug_drawer::shape::Sphere::build(&plain, Vec3::new(2.0, 0.0, 0.0), 1.0);
    let b = hbdraw_debug_drawer::shape::Sphere::build(&flipped, Vec3::new(2.0, 0.0, 0.0), 1.0);
    assert!((a.center().x + b.center().x - 1920.0).abs() < 1e-3);
    assert!((a.radius() - b.radius()).abs() < 1e-3);
}

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use hbdraw_core::math::{Mat4, Vec2, Vec3};
use hbdraw_core::{CameraState, DrawConfig, Projection};
use hbdraw_debug_drawer::shape::{Capsule, Cuboid, Cylinder, Ring, Sphere};
use hbdraw_debug_drawer::{CommandList, DrawShape, Paint, ProjectionContext};

fn camera() -> CameraState {
    CameraState::look_at(
        Vec3::new(4.0, 5.0, 8.0),
        Vec3::ZERO,
        Vec3::Y,
        Projection::perspective(60.0, 16.0 / 9.0, 0.1, 1000.0),
        Vec2::new(1920.0, 1080.0),
    )
}

// ---------------------------------------------------------------------------
// Shape construction
// ---------------------------------------------------------------------------

fn bench_build_sphere(c: &mut Criterion) {
    let cam = camera();
    let ctx = ProjectionContext::new(&cam, DrawConfig::default());
    c.bench_function("build_sphere", |b| {
        b.iter(|| Sphere::build(&ctx, black_box(Vec3::ZERO), black_box(1.0)));
    });
}

fn bench_build_box(c: &mut Criterion) {
    let cam = camera();
    let ctx = ProjectionContext::new(&cam, DrawConfig::default());
    let rotation = Mat4::from_rotation_y(0.3);
    c.bench_function("build_box", |b| {
        b.iter(|| Cuboid::build(&ctx, black_box(Vec3::ZERO), black_box(Vec3::ONE), &rotation));
    });
}

fn bench_build_cylinder_32(c: &mut Criterion) {
    let cam = camera();
    let ctx = ProjectionContext::new(&cam, DrawConfig::default());
    c.bench_function("build_cylinder_32", |b| {
        b.iter(|| Cylinder::build(&ctx, black_box(Vec3::Y), black_box(Vec3::NEG_Y), 1.0));
    });
}

fn bench_build_cylinder_128(c: &mut Criterion) {
    let cam = camera();
    let config = DrawConfig::default().with_segments(128).unwrap();
    let ctx = ProjectionContext::new(&cam, config);
    c.bench_function("build_cylinder_128", |b| {
        b.iter(|| Cylinder::build(&ctx, black_box(Vec3::Y), black_box(Vec3::NEG_Y), 1.0));
    });
}

fn bench_build_ring(c: &mut Criterion) {
    let cam = camera();
    let ctx = ProjectionContext::new(&cam, DrawConfig::default());
    c.bench_function("build_ring", |b| {
        b.iter(|| Ring::build(&ctx, black_box(Vec3::Y * 0.3), black_box(Vec3::NEG_Y * 0.3), 2.0, 1.2));
    });
}

fn bench_build_capsule(c: &mut Criterion) {
    let cam = camera();
    let ctx = ProjectionContext::new(&cam, DrawConfig::default());
    c.bench_function("build_capsule", |b| {
        b.iter(|| Capsule::build(&ctx, black_box(Vec3::Y), black_box(Vec3::NEG_Y), 0.5));
    });
}

// ---------------------------------------------------------------------------
// Path assembly
// ---------------------------------------------------------------------------

fn bench_draw_ring(c: &mut Criterion) {
    let cam = camera();
    let config = DrawConfig::default();
    let ctx = ProjectionContext::new(&cam, config);
    let ring = Ring::build(&ctx, Vec3::Y * 0.3, Vec3::NEG_Y * 0.3, 2.0, 1.2);
    let paint = Paint::outlined([1.0, 0.0, 0.0, 0.5], [1.0; 4]);
    let mut list = CommandList::new();
    c.bench_function("draw_ring", |b| {
        b.iter(|| {
            ring.draw(&mut list, &paint, &config);
            black_box(list.take_commands());
        });
    });
}

criterion_group!(
    benches,
    bench_build_sphere,
    bench_build_box,
    bench_build_cylinder_32,
    bench_build_cylinder_128,
    bench_build_ring,
    bench_build_capsule,
    bench_draw_ring,
);
criterion_main!(benches);

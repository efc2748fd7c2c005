//! Screen-space debug shapes for hbdraw.
//!
//! Projects world-space primitives (sphere, box, triangle, cylinder, ring,
//! capsule) through the current camera and emits camera-facing fills and
//! outlines as 2D draw commands. Thread-safe with one-frame latency.
//!
//! # Architecture
//!
//! - [`shape`]: Per-frame shape builders and their visibility logic
//! - [`DrawShape`]: Path assembly of a built shape onto a [`DrawList`]
//! - [`DebugDrawer`]: Thread-safe accumulator (store as a shared resource)
//! - [`DebugDrawerContext`]: Short-lived drawing context (created per-system)
//!
//! # Usage
//!
//! ```ignore
//! // Setup (once)
//! let drawer = Arc::new(DebugDrawer::new());
//!
//! // Each frame:
//! drawer.update_camera(camera_state);
//!
//! // From any thread:
//! if let Some(mut ctx) = drawer.context() {
//!     ctx.draw_sphere(Vec3::ZERO, 1.0, Paint::fill([1.0, 0.0, 0.0, 0.5]));
//!     ctx.draw_cylinder(Vec3::ZERO, Vec3::Y, 0.5, Paint::outlined(fill, white));
//! } // flushed on drop
//!
//! // At render time:
//! for command in drawer.take_render_data() {
//!     backend.submit(command);
//! }
//! ```

mod assembler;
mod draw_api;
mod draw_list;
mod drawer;
pub mod shape;

pub use assembler::DrawShape;
pub use draw_list::{Color, CommandList, DrawCommand, DrawList, FillRule, Paint};
pub use drawer::{DebugDrawer, DebugDrawerContext};
pub use shape::{ProjectionContext, Shape, ShapeError};

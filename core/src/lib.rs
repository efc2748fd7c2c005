//! # hbdraw core
//!
//! Camera snapshot, screen projection, configuration and the screen-space
//! geometry tests shared by the shape builders.

pub mod camera;
pub mod config;
pub mod math;

pub use camera::{CameraState, Projection, ScreenProjector};
pub use config::{ConfigError, DrawConfig};

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}

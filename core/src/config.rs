//! Tessellation and outline settings shared by every shape.

use thiserror::Error;

/// Smallest segment count the ring tessellation can pair up.
pub const MIN_SEGMENTS: u32 = 3;

/// Largest segment count accepted; every cylinder caches one point per
/// segment on each ring.
pub const MAX_SEGMENTS: u32 = 512;

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("segment count must be at least {}, got {0}", MIN_SEGMENTS)]
    TooFewSegments(u32),
    #[error("segment count must be at most {}, got {0}", MAX_SEGMENTS)]
    TooManySegments(u32),
    #[error("outline thickness must be a positive finite number, got {0}")]
    InvalidThickness(f32),
}

/// Settings read by shape builders and the path assembler.
///
/// Never mutated while shapes are being built; the drawer hands a copy to
/// each drawing context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawConfig {
    segments: u32,
    outline_thickness: f32,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            segments: 32,
            outline_thickness: 1.0,
        }
    }
}

impl DrawConfig {
    /// Create a validated configuration.
    pub fn new(segments: u32, outline_thickness: f32) -> Result<Self, ConfigError> {
        Self::default()
            .with_segments(segments)?
            .with_outline_thickness(outline_thickness)
    }

    /// Number of segments used to tessellate circles and cylinder rings.
    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// Stroke thickness of outlines, in pixels.
    pub fn outline_thickness(&self) -> f32 {
        self.outline_thickness
    }

    pub fn with_segments(mut self, segments: u32) -> Result<Self, ConfigError> {
        if segments < MIN_SEGMENTS {
            return Err(ConfigError::TooFewSegments(segments));
        }
        if segments > MAX_SEGMENTS {
            return Err(ConfigError::TooManySegments(segments));
        }
        self.segments = segments;
        Ok(self)
    }

    pub fn with_outline_thickness(mut self, thickness: f32) -> Result<Self, ConfigError> {
        if !thickness.is_finite() || thickness <= 0.0 {
            return Err(ConfigError::InvalidThickness(thickness));
        }
        self.outline_thickness = thickness;
        Ok(self)
    }
}

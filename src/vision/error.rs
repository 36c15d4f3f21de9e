//! Validation errors raised by the filtering core
//!
//! These signal a contract violation by an upstream collaborator (the OCR
//! provider or the caller supplying image dimensions). They are never
//! recovered internally.

use thiserror::Error;

/// Axis a ratio applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Width => write!(f, "width"),
            Axis::Height => write!(f, "height"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("detection {index}: polygon must have exactly 4 vertices, found {found}")]
    PolygonVertexCount { index: usize, found: usize },
    #[error("image dimensions must be positive, got {width}x{height}")]
    ImageDimensions { width: i32, height: i32 },
    #[error("{axis} ratio {value} is outside [0.0, 1.0]")]
    RatioOutOfRange { axis: Axis, value: f64 },
}

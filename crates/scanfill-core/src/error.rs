//! Error types for scanfill-core
//!
//! Provides a unified error type for the raster surface and geometry
//! helpers. Each variant captures enough context for diagnostics without
//! exposing internal implementation details.

use thiserror::Error;

/// Scanfill core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid surface or rectangle dimensions
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimension { width: i32, height: i32 },

    /// Row data does not match the declared row width
    #[error("row {row} has {actual} pixels, expected {expected}")]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Two devices or rectangles that must agree in size do not
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (i32, i32),
        actual: (i32, i32),
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

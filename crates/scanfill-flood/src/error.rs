//! Error types for scanfill-flood

use thiserror::Error;

/// Errors that can occur during flood fill operations
#[derive(Debug, Error)]
pub enum FloodError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] scanfill_core::Error),

    /// Interval whose start lies past its end
    #[error("invalid interval: [{start}, {end}] at row {row}")]
    InvalidInterval { start: i32, end: i32, row: i32 },
}

/// Result type for flood fill operations
pub type FloodResult<T> = Result<T, FloodError>;

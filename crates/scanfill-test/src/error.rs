//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building fixtures or checking results
#[derive(Debug, Error)]
pub enum TestError {
    /// A fixture row used a character with no palette entry
    #[error("unknown fixture character '{ch}' at row {row}, column {column}")]
    UnknownGlyph { ch: char, row: usize, column: usize },

    /// Building a device from fixture rows failed
    #[error("fixture error: {0}")]
    Fixture(#[from] scanfill_core::Error),

    /// Value comparison failed
    #[error(
        "value comparison failed at index {index}: expected {expected}, got {actual}, delta {delta}"
    )]
    ValueMismatch {
        index: usize,
        expected: f64,
        actual: f64,
        delta: f64,
    },

    /// Device comparison failed
    #[error("device comparison failed at index {index}: first difference at ({x}, {y})")]
    DeviceMismatch { index: usize, x: i32, y: i32 },

    /// String comparison failed
    #[error("string comparison failed at index {index}: sizes {expected_len} vs {actual_len}")]
    StringMismatch {
        index: usize,
        expected_len: usize,
        actual_len: usize,
    },

    /// One or more checks of a regression test failed
    #[error("{test_name}_reg failed {count} check(s)")]
    Failed { test_name: String, count: usize },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;

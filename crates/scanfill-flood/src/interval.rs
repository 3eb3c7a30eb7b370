//! Horizontal fill intervals
//!
//! A [`FillInterval`] is an inclusive span of columns on one row together
//! with the direction the fill front was travelling when it was produced.

use crate::error::{FloodError, FloodResult};
use std::fmt;

/// Vertical direction of a fill front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Towards smaller row numbers
    Up,
    /// Towards larger row numbers
    Down,
}

impl Direction {
    /// Row offset of one step in this direction
    #[inline]
    pub fn row_increment(self) -> i32 {
        match self {
            Self::Up => -1,
            Self::Down => 1,
        }
    }

    /// The other direction
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

/// An inclusive run of columns `[start, end]` on `row`
///
/// `direction` tells which way the front was moving: an interval with
/// direction [`Direction::Down`] is scanned, and its matching pixels
/// produce new intervals on `row + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FillInterval {
    pub start: i32,
    pub end: i32,
    pub row: i32,
    pub direction: Direction,
}

impl FillInterval {
    /// Create a new interval
    ///
    /// # Errors
    ///
    /// Returns [`FloodError::InvalidInterval`] if `start > end`.
    pub fn new(start: i32, end: i32, row: i32, direction: Direction) -> FloodResult<Self> {
        if start > end {
            return Err(FloodError::InvalidInterval { start, end, row });
        }
        Ok(Self::new_unchecked(start, end, row, direction))
    }

    /// Create an interval without validating its bounds
    #[inline]
    pub const fn new_unchecked(start: i32, end: i32, row: i32, direction: Direction) -> Self {
        Self {
            start,
            end,
            row,
            direction,
        }
    }

    /// Shorthand for an upward interval
    #[inline]
    pub const fn up(start: i32, end: i32, row: i32) -> Self {
        Self::new_unchecked(start, end, row, Direction::Up)
    }

    /// Shorthand for a downward interval
    #[inline]
    pub const fn down(start: i32, end: i32, row: i32) -> Self {
        Self::new_unchecked(start, end, row, Direction::Down)
    }

    /// Whether the interval covers at least one column
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Mark the interval as consumed
    #[inline]
    pub fn invalidate(&mut self) {
        self.end = self.start.saturating_sub(1);
        if self.end == self.start {
            // start == i32::MIN
            self.start = i32::MIN + 1;
            self.end = i32::MIN;
        }
    }

    /// Number of columns covered, 0 for an invalid interval
    #[inline]
    pub fn width(&self) -> i64 {
        (self.end as i64 - self.start as i64 + 1).max(0)
    }

    /// Whether `x` lies inside the interval
    #[inline]
    pub fn contains(&self, x: i32) -> bool {
        self.start <= x && x <= self.end
    }

    /// Whether the two intervals share at least one column
    #[inline]
    pub fn overlaps(&self, other: &FillInterval) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for FillInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}]@{} {:?}",
            self.start, self.end, self.row, self.direction
        )
    }
}

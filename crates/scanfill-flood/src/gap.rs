//! Gap closing
//!
//! Strokes drawn by hand often have small breaks. With gap closing the row
//! scan keeps going across a short run of non-matching pixels when a
//! matching pixel follows the run inside the bounding rectangle, so the
//! break behaves like a wall.
//!
//! Bridging only happens along a row, walking away from a pixel the scan
//! has just filled. Rows above and below a bridge are reached through the
//! usual interval scheduling, which scans them with the same rule, so a
//! non-matching pixel is never entered from above or below.

use crate::matcher::PixelMatcher;
use scanfill_core::{Rect, Selection};

/// Finds bridgeable runs of non-matching pixels along a row
#[derive(Debug, Clone, Copy)]
pub(crate) struct GapCloser {
    gap: u32,
    rect: Rect,
}

impl GapCloser {
    /// Bridge runs of at most `gap` pixels inside `rect`, 0 disables bridging
    pub(crate) fn new(gap: u32, rect: Rect) -> Self {
        Self { gap, rect }
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.gap > 0
    }

    /// Last column of the gap that starts at the non-matching pixel `x`
    ///
    /// Walks by `step` along `row`. Returns `None` unless at most `gap`
    /// unvisited, bridgeable pixels lead from `x` to a matching pixel inside
    /// the rectangle.
    pub(crate) fn gap_end<M: PixelMatcher>(
        &self,
        matcher: &mut M,
        visited: &Selection,
        x: i32,
        row: i32,
        step: i32,
    ) -> Option<i32> {
        let mut end = x;
        for _ in 0..self.gap {
            if !self.rect.contains_point(end, row)
                || visited.pixel(end, row) != 0
                || !matcher.bridgeable(end, row)
            {
                return None;
            }
            let next = end.checked_add(step)?;
            if !self.rect.contains_point(next, row) {
                return None;
            }
            if matcher.opacity(next, row) > 0 {
                return Some(end);
            }
            end = next;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{BoundedMatcher, NonZeroMatcher};
    use scanfill_core::{PaintDevice, Rgba};

    const RECT: Rect = Rect::new_unchecked(-20, -5, 41, 10);

    /// Opaque row 0 from -20 to 20 with a transparent hole `[a, b]`
    fn holed_row(a: i32, b: i32) -> PaintDevice {
        let mut dev = PaintDevice::new();
        dev.write_pixel_run(0, -20, 20, Rgba::WHITE);
        dev.write_pixel_run(0, a, b, Rgba::TRANSPARENT);
        dev
    }

    #[test]
    fn test_zero_gap_bridges_nothing() {
        let dev = holed_row(0, 0);
        let closer = GapCloser::new(0, RECT);
        assert!(!closer.is_enabled());
        let mut m = NonZeroMatcher::new(&dev);
        assert_eq!(closer.gap_end(&mut m, &Selection::new(), 0, 0, 1), None);
    }

    #[test]
    fn test_gap_width_limit() {
        let dev = holed_row(0, 2);
        let visited = Selection::new();
        let mut m = NonZeroMatcher::new(&dev);

        let closer = GapCloser::new(3, RECT);
        assert_eq!(closer.gap_end(&mut m, &visited, 0, 0, 1), Some(2));
        assert_eq!(closer.gap_end(&mut m, &visited, 2, 0, -1), Some(0));
        assert_eq!(GapCloser::new(2, RECT).gap_end(&mut m, &visited, 0, 0, 1), None);
        // nothing matches on row 1
        assert_eq!(closer.gap_end(&mut m, &visited, 0, 1, 1), None);
    }

    #[test]
    fn test_gap_needs_match_inside_rect() {
        let dev = holed_row(0, 2);
        let mut m = NonZeroMatcher::new(&dev);
        let closer = GapCloser::new(5, Rect::new_unchecked(-20, -5, 23, 10));
        assert_eq!(closer.gap_end(&mut m, &Selection::new(), 0, 0, 1), None);
    }

    #[test]
    fn test_visited_and_walled_pixels_stop_a_bridge() {
        let dev = holed_row(0, 1);
        let mut m = NonZeroMatcher::new(&dev);
        let closer = GapCloser::new(4, RECT);

        let mut visited = Selection::new();
        visited.set_pixel(1, 0, 255);
        assert_eq!(closer.gap_end(&mut m, &visited, 0, 0, 1), None);

        let mut boundary = Selection::with_default_pixel(255);
        boundary.set_pixel(1, 0, 0);
        let mut bounded = BoundedMatcher::new(NonZeroMatcher::new(&dev), &boundary);
        assert_eq!(closer.gap_end(&mut bounded, &Selection::new(), 0, 0, 1), None);
    }
}

//! Pixel access functions
//!
//! Single-pixel reads and writes plus row-run writes. Runs are split at
//! tile borders so each tile is looked up (and, if shared, copied) once per
//! run instead of once per pixel.

use super::{TILE_SIZE, TiledDevice, locate};
use crate::pixel::Pixel;
use crate::rect::Rect;

impl<P: Pixel> TiledDevice<P> {
    /// Get the pixel at (x, y)
    ///
    /// Pixels in unallocated tiles read as the default pixel.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> P {
        let (key, index) = locate(x, y);
        match self.tile(key) {
            Some(tile) => tile.data[index],
            None => self.default_pixel,
        }
    }

    /// Set the pixel at (x, y)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, value: P) {
        let (key, index) = locate(x, y);
        self.tile_mut(key).data[index] = value;
    }

    /// Number of columns, starting at `x`, that live in the same tile
    #[inline]
    pub fn num_contiguous_columns(&self, x: i32) -> i32 {
        TILE_SIZE - x.rem_euclid(TILE_SIZE)
    }

    /// Length of the run starting at `x` that stays inside one tile and ends at or before `x1`
    #[inline]
    fn tile_span(&self, x: i32, x1: i32) -> i32 {
        (self.num_contiguous_columns(x) as i64).min(x1 as i64 - x as i64 + 1) as i32
    }

    /// Write `value` into every pixel of row `y` from `x0` to `x1` inclusive
    ///
    /// Does nothing if `x0 > x1`.
    pub fn write_pixel_run(&mut self, y: i32, x0: i32, x1: i32, value: P) {
        let mut x = x0;
        while x <= x1 {
            let span = self.tile_span(x, x1);
            let (key, index) = locate(x, y);
            let tile = self.tile_mut(key);
            tile.data[index..index + span as usize].fill(value);
            x = match x.checked_add(span) {
                Some(next) => next,
                None => break,
            };
        }
    }

    /// Write a run of pixels into row `y`, starting at column `x0`
    pub fn write_pixels(&mut self, y: i32, x0: i32, values: &[P]) {
        let mut x = x0;
        let mut rest = values;
        while !rest.is_empty() {
            let span = (self.num_contiguous_columns(x) as usize).min(rest.len());
            let (key, index) = locate(x, y);
            let (head, tail) = rest.split_at(span);
            self.tile_mut(key).data[index..index + span].copy_from_slice(head);
            rest = tail;
            x = match x.checked_add(span as i32) {
                Some(next) => next,
                None => break,
            };
        }
    }

    /// Read row `y` from `x0` to `x1` inclusive
    pub fn read_row(&self, y: i32, x0: i32, x1: i32) -> Vec<P> {
        if x0 > x1 {
            return Vec::new();
        }
        let mut out = Vec::with_capacity((x1 as i64 - x0 as i64 + 1) as usize);
        let mut x = x0;
        while x <= x1 {
            let span = self.tile_span(x, x1);
            let (key, index) = locate(x, y);
            match self.tile(key) {
                Some(tile) => out.extend_from_slice(&tile.data[index..index + span as usize]),
                None => out.extend(std::iter::repeat_n(self.default_pixel, span as usize)),
            }
            x = match x.checked_add(span) {
                Some(next) => next,
                None => break,
            };
        }
        out
    }

    /// Fill a rectangle with `value`
    pub fn fill_rect(&mut self, rect: &Rect, value: P) {
        if rect.is_empty() {
            return;
        }
        for y in rect.y..rect.bottom() {
            self.write_pixel_run(y, rect.x, rect.max_x(), value);
        }
    }

    /// Count the pixels inside `rect` for which `pred` holds
    pub fn count_pixels(&self, rect: &Rect, mut pred: impl FnMut(P) -> bool) -> u64 {
        if rect.is_empty() {
            return 0;
        }
        (rect.y..rect.bottom())
            .map(|y| {
                self.read_row(y, rect.x, rect.max_x())
                    .into_iter()
                    .filter(|p| pred(*p))
                    .count() as u64
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use crate::{PaintDevice, Rect, Rgba, Selection};

    #[test]
    fn test_set_get_pixel() {
        let mut dev = PaintDevice::new();
        dev.set_pixel(0, 0, Rgba::WHITE);
        dev.set_pixel(-1, -1, Rgba::RED);
        assert_eq!(dev.pixel(0, 0), Rgba::WHITE);
        assert_eq!(dev.pixel(-1, -1), Rgba::RED);
        assert_eq!(dev.pixel(1, 0), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_write_pixel_run_crosses_tiles() {
        let mut sel = Selection::new();
        sel.write_pixel_run(3, -70, 130, 9);
        assert_eq!(sel.pixel(-71, 3), 0);
        assert_eq!(sel.pixel(-70, 3), 9);
        assert_eq!(sel.pixel(-1, 3), 9);
        assert_eq!(sel.pixel(0, 3), 9);
        assert_eq!(sel.pixel(130, 3), 9);
        assert_eq!(sel.pixel(131, 3), 0);
        assert_eq!(sel.tile_count(), 5);
    }

    #[test]
    fn test_write_pixel_run_empty() {
        let mut sel = Selection::new();
        sel.write_pixel_run(0, 5, 4, 9);
        assert_eq!(sel.tile_count(), 0);
    }

    #[test]
    fn test_write_and_read_pixels() {
        let mut sel = Selection::new();
        let values: Vec<u8> = (0..150).map(|v| v as u8).collect();
        sel.write_pixels(-2, -10, &values);
        assert_eq!(sel.read_row(-2, -10, 139), values);
        assert_eq!(sel.read_row(-2, 140, 141), vec![0, 0]);
        assert!(sel.read_row(-2, 1, 0).is_empty());
    }

    #[test]
    fn test_fill_rect_and_count() {
        let mut sel = Selection::new();
        let rect = Rect::new(-5, -5, 10, 4).unwrap();
        sel.fill_rect(&rect, 255);
        assert_eq!(sel.count_pixels(&rect.expand(3), |v| v == 255), 40);
        assert_eq!(sel.exact_bounds(), Some(rect));
    }
}

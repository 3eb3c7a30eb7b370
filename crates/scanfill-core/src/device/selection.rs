//! Selection mask combination
//!
//! A [`Selection`] is a tiled device of 8-bit coverage values. Fill
//! results from several seeds are usually produced into scratch selections
//! and merged into one result mask with [`Selection::apply_selection`].

use super::{Selection, TiledDevice};
use crate::pixel::{MAX_OPACITY, mul_u8};
use crate::rect::Rect;
use std::collections::HashSet;

/// How a selection is combined into another one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionAction {
    /// Discard the destination, take the source
    Replace,
    /// Union: the larger coverage wins
    #[default]
    Add,
    /// Remove the source's coverage from the destination
    Subtract,
    /// Keep only what both cover
    Intersect,
}

impl SelectionAction {
    /// Combine a destination value `dst` with a source value `src`
    #[inline]
    pub fn combine(self, dst: u8, src: u8) -> u8 {
        match self {
            Self::Replace => src,
            Self::Add => dst.max(src),
            Self::Subtract => mul_u8(dst, MAX_OPACITY - src),
            Self::Intersect => dst.min(src),
        }
    }
}

impl TiledDevice<u8> {
    /// Combine `other` into this selection
    ///
    /// # Examples
    ///
    /// ```
    /// use scanfill_core::{Rect, Selection, SelectionAction};
    ///
    /// let mut a = Selection::new();
    /// a.fill_rect(&Rect::new_unchecked(0, 0, 4, 4), 255);
    /// let mut b = Selection::new();
    /// b.fill_rect(&Rect::new_unchecked(2, 2, 4, 4), 255);
    ///
    /// a.apply_selection(&b, SelectionAction::Add);
    /// assert_eq!(a.selected_pixel_count(&Rect::new_unchecked(0, 0, 8, 8)), 28);
    /// ```
    pub fn apply_selection(&mut self, other: &Selection, action: SelectionAction) {
        if action == SelectionAction::Replace {
            *self = other.clone();
            return;
        }

        let keys: HashSet<(i32, i32)> = self
            .tiles
            .keys()
            .chain(other.tiles.keys())
            .copied()
            .collect();
        let other_default = other.default_pixel;

        for key in keys {
            let src = other.tile(key);
            let dst = self.tile_mut(key);
            for (i, value) in dst.data.iter_mut().enumerate() {
                let s = src.map_or(other_default, |t| t.data[i]);
                *value = action.combine(*value, s);
            }
        }
        self.default_pixel = action.combine(self.default_pixel, other_default);
    }

    /// Number of pixels inside `rect` with non-zero coverage
    pub fn selected_pixel_count(&self, rect: &Rect) -> u64 {
        self.count_pixels(rect, |v| v > 0)
    }

    /// Invert coverage everywhere
    pub fn invert(&mut self) {
        for tile in self.tiles.values_mut() {
            for value in std::sync::Arc::make_mut(tile).data.iter_mut() {
                *value = MAX_OPACITY - *value;
            }
        }
        self.default_pixel = MAX_OPACITY - self.default_pixel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: i32, y: i32, size: i32, value: u8) -> Selection {
        let mut sel = Selection::new();
        sel.fill_rect(&Rect::new_unchecked(x, y, size, size), value);
        sel
    }

    #[test]
    fn test_combine() {
        assert_eq!(SelectionAction::Add.combine(10, 200), 200);
        assert_eq!(SelectionAction::Intersect.combine(10, 200), 10);
        assert_eq!(SelectionAction::Subtract.combine(255, 255), 0);
        assert_eq!(SelectionAction::Subtract.combine(200, 0), 200);
        assert_eq!(SelectionAction::Replace.combine(10, 20), 20);
    }

    #[test]
    fn test_apply_add_across_tiles() {
        let mut a = square(-70, -70, 4, 255);
        let b = square(100, 100, 4, 128);
        a.apply_selection(&b, SelectionAction::Add);
        assert_eq!(a.pixel(-70, -70), 255);
        assert_eq!(a.pixel(101, 101), 128);
        assert_eq!(a.pixel(0, 0), 0);
    }

    #[test]
    fn test_apply_intersect() {
        let mut a = square(0, 0, 4, 255);
        let b = square(2, 2, 4, 255);
        a.apply_selection(&b, SelectionAction::Intersect);
        let all = Rect::new_unchecked(-1, -1, 10, 10);
        assert_eq!(a.selected_pixel_count(&all), 4);
        assert_eq!(a.exact_bounds(), Some(Rect::new_unchecked(2, 2, 2, 2)));
    }

    #[test]
    fn test_apply_subtract() {
        let mut a = square(0, 0, 4, 255);
        let b = square(0, 0, 2, 255);
        a.apply_selection(&b, SelectionAction::Subtract);
        assert_eq!(a.selected_pixel_count(&Rect::new_unchecked(0, 0, 4, 4)), 12);
    }

    #[test]
    fn test_invert() {
        let mut a = square(0, 0, 2, 255);
        a.invert();
        assert_eq!(a.pixel(0, 0), 0);
        assert_eq!(a.pixel(5, 5), 255);
        assert_eq!(a.default_pixel(), 255);
    }
}

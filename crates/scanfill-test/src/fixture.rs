//! ASCII-art device fixtures
//!
//! Regression tests describe small images as rows of characters. Each
//! character is looked up in a palette to produce a pixel.

use crate::error::{TestError, TestResult};
use scanfill_core::{Pixel, Point, Rect, TiledDevice};

/// Build a device from ASCII rows
///
/// Row `i`, column `j` lands at `(origin.x + j, origin.y + i)`. Rows may
/// have different lengths; missing pixels stay at the default pixel.
///
/// # Errors
///
/// Returns [`TestError::UnknownGlyph`] for a character absent from `palette`.
///
/// # Examples
///
/// ```
/// use scanfill_core::{Point, Rgba};
/// use scanfill_test::device_from_ascii;
///
/// let dev = device_from_ascii(
///     &["#..", ".#."],
///     &[('#', Rgba::WHITE), ('.', Rgba::TRANSPARENT)],
///     Point::new(0, 0),
/// )
/// .unwrap();
/// assert_eq!(dev.pixel(1, 1), Rgba::WHITE);
/// ```
pub fn device_from_ascii<P: Pixel>(
    rows: &[&str],
    palette: &[(char, P)],
    origin: Point,
) -> TestResult<TiledDevice<P>> {
    let mut dev = TiledDevice::new();
    for (row, line) in rows.iter().enumerate() {
        for (column, ch) in line.chars().enumerate() {
            let value = palette
                .iter()
                .find(|(c, _)| *c == ch)
                .map(|(_, p)| *p)
                .ok_or(TestError::UnknownGlyph { ch, row, column })?;
            if value != dev.default_pixel() {
                dev.set_pixel(origin.x + column as i32, origin.y + row as i32, value);
            }
        }
    }
    Ok(dev)
}

/// Render a region of a device as ASCII rows by opacity
///
/// `.` is transparent, `#` is fully opaque, `+` is anything in between.
pub fn render_ascii<P: Pixel>(dev: &TiledDevice<P>, rect: &Rect) -> Vec<String> {
    if rect.is_empty() {
        return Vec::new();
    }
    (rect.y..rect.bottom())
        .map(|y| {
            dev.read_row(y, rect.x, rect.max_x())
                .into_iter()
                .map(|p| match p.opacity() {
                    0 => '.',
                    255 => '#',
                    _ => '+',
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanfill_core::Selection;

    #[test]
    fn test_ascii_roundtrip_by_opacity() {
        let rows = ["#.+", "..#"];
        let dev: Selection =
            device_from_ascii(&rows, &[('#', 255), ('.', 0), ('+', 100)], Point::new(-1, 4))
                .unwrap();
        assert_eq!(dev.pixel(-1, 4), 255);
        assert_eq!(dev.pixel(1, 4), 100);
        assert_eq!(dev.pixel(1, 5), 255);

        let rect = Rect::new_unchecked(-1, 4, 3, 2);
        assert_eq!(render_ascii(&dev, &rect), vec!["#.+", "..#"]);
    }

    #[test]
    fn test_unknown_glyph() {
        let err = device_from_ascii::<u8>(&["#x"], &[('#', 255)], Point::new(0, 0)).unwrap_err();
        assert!(matches!(err, TestError::UnknownGlyph { ch: 'x', row: 0, column: 1 }));
    }
}

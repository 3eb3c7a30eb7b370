//! TiledDevice - the raster surface
//!
//! A `TiledDevice` is an effectively unbounded 2D pixel store addressed by
//! signed coordinates. Storage is split into square tiles that are only
//! allocated once something is written into them; every pixel of an
//! unallocated tile reads as the device's default pixel.
//!
//! # Ownership model
//!
//! Tiles are held in `Arc`s, so cloning a device is cheap and the clone
//! shares all tiles with the original. The first write into a shared tile
//! copies it (copy-on-write). A clone therefore works as an immutable
//! snapshot of the device at the moment it was taken, which is how an
//! in-place fill keeps reading the original pixels while it writes.

mod access;
mod selection;

pub use selection::SelectionAction;

use crate::error::{Error, Result};
use crate::pixel::{Pixel, Rgba};
use crate::rect::{Point, Rect};
use std::collections::HashMap;
use std::sync::Arc;

/// Tile edge length in pixels
pub const TILE_SIZE: i32 = 64;

const TILE_AREA: usize = (TILE_SIZE * TILE_SIZE) as usize;

/// A color device
pub type PaintDevice = TiledDevice<Rgba>;

/// An 8-bit selection mask (0 = unselected, 255 = fully selected)
pub type Selection = TiledDevice<u8>;

#[derive(Debug, Clone)]
struct Tile<P> {
    data: Vec<P>,
}

impl<P: Pixel> Tile<P> {
    fn filled(value: P) -> Self {
        Self {
            data: vec![value; TILE_AREA],
        }
    }
}

/// Tile key and in-tile offset of a pixel
#[inline]
fn locate(x: i32, y: i32) -> ((i32, i32), usize) {
    let tx = x.div_euclid(TILE_SIZE);
    let ty = y.div_euclid(TILE_SIZE);
    let ix = x.rem_euclid(TILE_SIZE);
    let iy = y.rem_euclid(TILE_SIZE);
    ((tx, ty), (iy * TILE_SIZE + ix) as usize)
}

/// Tiled pixel storage with copy-on-write tiles
///
/// # Examples
///
/// ```
/// use scanfill_core::{PaintDevice, Rgba};
///
/// let mut dev = PaintDevice::new();
/// dev.set_pixel(-3, 7, Rgba::WHITE);
/// assert_eq!(dev.pixel(-3, 7), Rgba::WHITE);
/// assert_eq!(dev.pixel(1000, -1000), Rgba::TRANSPARENT);
/// ```
#[derive(Debug, Clone)]
pub struct TiledDevice<P: Pixel> {
    tiles: HashMap<(i32, i32), Arc<Tile<P>>>,
    default_pixel: P,
}

impl<P: Pixel> Default for TiledDevice<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Pixel> TiledDevice<P> {
    /// Create an empty device whose default pixel is transparent
    pub fn new() -> Self {
        Self::with_default_pixel(P::TRANSPARENT)
    }

    /// Create an empty device with the given default pixel
    pub fn with_default_pixel(default_pixel: P) -> Self {
        Self {
            tiles: HashMap::new(),
            default_pixel,
        }
    }

    /// Create a device from rows of pixels placed at `origin`
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowLengthMismatch`] if the rows differ in length.
    pub fn from_rows(origin: Point, rows: &[Vec<P>]) -> Result<Self> {
        let mut dev = Self::new();
        let width = rows.first().map_or(0, Vec::len);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(Error::RowLengthMismatch {
                    row: i,
                    expected: width,
                    actual: row.len(),
                });
            }
            let y = origin.y.saturating_add(i as i32);
            dev.write_pixels(y, origin.x, row);
        }
        Ok(dev)
    }

    /// Get the value returned for pixels that were never written
    #[inline]
    pub fn default_pixel(&self) -> P {
        self.default_pixel
    }

    /// Number of allocated tiles
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Check whether this device shares the tile containing (x, y) with `other`
    ///
    /// Two blank tiles are not considered shared.
    pub fn shares_tile_with(&self, other: &Self, x: i32, y: i32) -> bool {
        let (key, _) = locate(x, y);
        match (self.tiles.get(&key), other.tiles.get(&key)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Drop all tiles; every pixel reads as the default pixel afterwards
    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    /// Bounding rectangle of all allocated tiles
    ///
    /// Returns `None` if nothing has been written.
    pub fn extent(&self) -> Option<Rect> {
        self.tiles
            .keys()
            .map(|&(tx, ty)| {
                Rect::new_unchecked(
                    tx.saturating_mul(TILE_SIZE),
                    ty.saturating_mul(TILE_SIZE),
                    TILE_SIZE,
                    TILE_SIZE,
                )
            })
            .reduce(|a, b| a.union(&b))
    }

    /// Bounding rectangle of all pixels that differ from the default pixel
    ///
    /// Returns `None` if every pixel equals the default pixel.
    pub fn exact_bounds(&self) -> Option<Rect> {
        let mut bounds: Option<Rect> = None;
        for (&(tx, ty), tile) in &self.tiles {
            for (i, p) in tile.data.iter().enumerate() {
                if *p == self.default_pixel {
                    continue;
                }
                let x = tx * TILE_SIZE + (i as i32 % TILE_SIZE);
                let y = ty * TILE_SIZE + (i as i32 / TILE_SIZE);
                let px = Rect::new_unchecked(x, y, 1, 1);
                bounds = Some(bounds.map_or(px, |b| b.union(&px)));
            }
        }
        bounds
    }

    /// Read a rectangle as rows of pixels, top to bottom
    pub fn to_rows(&self, rect: &Rect) -> Vec<Vec<P>> {
        if rect.is_empty() {
            return Vec::new();
        }
        (rect.y..rect.bottom())
            .map(|y| self.read_row(y, rect.x, rect.max_x()))
            .collect()
    }

    fn tile(&self, key: (i32, i32)) -> Option<&Tile<P>> {
        self.tiles.get(&key).map(Arc::as_ref)
    }

    fn tile_mut(&mut self, key: (i32, i32)) -> &mut Tile<P> {
        let default_pixel = self.default_pixel;
        let tile = self
            .tiles
            .entry(key)
            .or_insert_with(|| Arc::new(Tile::filled(default_pixel)));
        Arc::make_mut(tile)
    }
}

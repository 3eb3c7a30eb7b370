//! Scanfill Core - raster data structures for flood filling
//!
//! This crate provides the data structures the fill engine reads from and
//! writes into:
//!
//! - [`TiledDevice`] - unbounded, signed-coordinate, copy-on-write tiled
//!   pixel storage ([`PaintDevice`] for color, [`Selection`] for masks)
//! - [`Pixel`] / [`Rgba`] - pixel values and their distance metric
//! - [`Rect`] / [`Point`] - integer geometry
//! - [`SelectionAction`] - combining selection masks
//!
//! # Examples
//!
//! ```
//! use scanfill_core::{PaintDevice, Pixel, Rect, Rgba};
//!
//! let mut dev = PaintDevice::new();
//! dev.fill_rect(&Rect::new(0, 0, 4, 4).unwrap(), Rgba::WHITE);
//! assert_eq!(dev.pixel(3, 3).difference(&Rgba::WHITE), 0);
//! assert_eq!(dev.exact_bounds(), Some(Rect::new(0, 0, 4, 4).unwrap()));
//! ```

pub mod device;
pub mod error;
pub mod pixel;
pub mod rect;

pub use device::{PaintDevice, Selection, SelectionAction, TILE_SIZE, TiledDevice};
pub use error::{Error, Result};
pub use pixel::{MAX_OPACITY, MIN_OPACITY, Pixel, Rgba, mul_u8};
pub use rect::{Point, Rect};

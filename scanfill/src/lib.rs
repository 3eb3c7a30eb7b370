//! Scanfill - scanline flood fill for tiled raster devices
//!
//! The bucket-fill engine of a raster editor: fills, selects or erases the
//! 4-connected region around a seed pixel, with a similarity threshold,
//! soft edges and gap closing.
//!
//! # Overview
//!
//! - Tiled copy-on-write pixel devices, selections and geometry, re-exported
//!   at the crate root
//! - The fill engine under [`flood`]
//!
//! # Example
//!
//! ```
//! use scanfill::flood::ScanlineFill;
//! use scanfill::{PaintDevice, Point, Rect, Rgba};
//!
//! let mut dev = PaintDevice::new();
//! let bounds = Rect::new(0, 0, 8, 8).unwrap();
//! let stats = ScanlineFill::new(&mut dev, Point::new(4, 4), bounds).fill_color(Rgba::GREEN);
//! assert_eq!(stats.pixels_filled, 64);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use scanfill_core::*;

// Re-export the engine as a module to avoid name conflicts
pub use scanfill_flood as flood;

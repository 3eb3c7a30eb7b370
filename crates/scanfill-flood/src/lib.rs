//! scanfill-flood - Scanline flood fill
//!
//! This crate fills the 4-connected region around a seed pixel of a
//! [`TiledDevice`](scanfill_core::TiledDevice), one horizontal run at a time:
//!
//! - **Similarity fills** - pixels within a threshold of the seed color
//! - **Until-color fills** - everything up to a boundary color
//! - **Component clearing** - erase the opaque blob under the seed
//! - **Opacity spread** - soft confidence ramp near the threshold
//! - **Gap closing** - flow across short breaks in a stroke
//!
//! Results go to a color device, a selection mask, or erase the source,
//! through the [`FillSink`] trait.
//!
//! # Examples
//!
//! ## Selecting a region
//!
//! ```
//! use scanfill_core::{PaintDevice, Point, Rect, Rgba, Selection};
//! use scanfill_flood::ScanlineFill;
//!
//! let mut dev = PaintDevice::new();
//! dev.fill_rect(&Rect::new(0, 0, 6, 6).unwrap(), Rgba::BLUE);
//!
//! let mut selection = Selection::new();
//! let bounds = Rect::new(-10, -10, 30, 30).unwrap();
//! let mut fill = ScanlineFill::new(&mut dev, Point::new(2, 2), bounds);
//! fill.set_threshold(10);
//! fill.fill_selection(&mut selection);
//!
//! assert_eq!(selection.selected_pixel_count(&bounds), 36);
//! ```
//!
//! ## Clearing a component
//!
//! ```
//! use scanfill_core::{PaintDevice, Point, Rect, Rgba};
//! use scanfill_flood::ScanlineFill;
//!
//! let mut dev = PaintDevice::new();
//! dev.fill_rect(&Rect::new(0, 0, 3, 3).unwrap(), Rgba::RED);
//! dev.fill_rect(&Rect::new(5, 0, 3, 3).unwrap(), Rgba::GREEN);
//!
//! let bounds = Rect::new(0, 0, 10, 10).unwrap();
//! ScanlineFill::new(&mut dev, Point::new(1, 1), bounds).clear_non_zero_component();
//!
//! assert_eq!(dev.pixel(1, 1), Rgba::TRANSPARENT);
//! assert_eq!(dev.pixel(6, 1), Rgba::GREEN);
//! ```

pub mod error;
mod gap;
pub mod interval;
pub mod interval_map;
pub mod matcher;
pub mod options;
pub mod sanity;
pub mod scanline;
pub mod sink;
pub mod stats;

// Re-export core types
pub use scanfill_core;

pub use error::{FloodError, FloodResult};
pub use interval::{Direction, FillInterval};
pub use interval_map::FillIntervalMap;
pub use matcher::{
    BoundedMatcher, MAX_OPACITY_SPREAD, NonZeroMatcher, PixelMatcher, SimilarityMatcher,
    UntilColorMatcher, spread_opacity,
};
pub use options::{FillOptions, MAX_CLOSE_GAP};
pub use sanity::SanityChecks;
pub use scanline::{FillPhase, ScanlineFill};
pub use sink::{ColorPaintSink, ComponentClearSink, FillSink, SelectionAccumulateSink};
pub use stats::FillStats;

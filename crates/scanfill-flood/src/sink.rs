//! Output sinks
//!
//! The traversal hands every matched run to a [`FillSink`] together with
//! the per-pixel confidence. Sinks know nothing about traversal order: runs
//! may arrive in any order, and receiving the same run twice leaves the
//! same result as receiving it once.

use scanfill_core::{MAX_OPACITY, Pixel, Selection, TiledDevice};

/// Consumer of matched pixel runs
pub trait FillSink {
    /// Consume columns `x0..=x1` of `row`
    ///
    /// `confidence` holds one value per column, all non-zero.
    fn consume_run(&mut self, row: i32, x0: i32, x1: i32, confidence: &[u8]);
}

impl<S: FillSink + ?Sized> FillSink for &mut S {
    #[inline]
    fn consume_run(&mut self, row: i32, x0: i32, x1: i32, confidence: &[u8]) {
        (**self).consume_run(row, x0, x1, confidence);
    }
}

/// Composites a color over the device, its opacity scaled by the confidence
///
/// Runs are blended onto the device as it was when the sink was created.
pub struct ColorPaintSink<'d, P: Pixel> {
    device: &'d mut TiledDevice<P>,
    backdrop: TiledDevice<P>,
    color: P,
    scratch: Vec<P>,
}

impl<'d, P: Pixel> ColorPaintSink<'d, P> {
    /// Paint `color` source-over onto `device`
    pub fn new(device: &'d mut TiledDevice<P>, color: P) -> Self {
        let backdrop = device.clone();
        Self {
            device,
            backdrop,
            color,
            scratch: Vec::new(),
        }
    }
}

impl<P: Pixel> FillSink for ColorPaintSink<'_, P> {
    fn consume_run(&mut self, row: i32, x0: i32, x1: i32, confidence: &[u8]) {
        if self.color.opacity() == MAX_OPACITY && confidence.iter().all(|&c| c == MAX_OPACITY) {
            self.device.write_pixel_run(row, x0, x1, self.color);
            return;
        }
        let under = self.backdrop.read_row(row, x0, x1);
        self.scratch.clear();
        self.scratch.extend(
            confidence
                .iter()
                .zip(under)
                .map(|(&c, b)| self.color.with_opacity(c).over(b)),
        );
        self.device.write_pixels(row, x0, &self.scratch);
    }
}

/// Writes the confidence into a selection mask
pub struct SelectionAccumulateSink<'d> {
    selection: &'d mut Selection,
}

impl<'d> SelectionAccumulateSink<'d> {
    /// Write confidences into `selection`
    pub fn new(selection: &'d mut Selection) -> Self {
        Self { selection }
    }
}

impl FillSink for SelectionAccumulateSink<'_> {
    #[inline]
    fn consume_run(&mut self, row: i32, x0: i32, _x1: i32, confidence: &[u8]) {
        self.selection.write_pixels(row, x0, confidence);
    }
}

/// Erases every pixel of the run
pub struct ComponentClearSink<'d, P: Pixel> {
    device: &'d mut TiledDevice<P>,
}

impl<'d, P: Pixel> ComponentClearSink<'d, P> {
    /// Erase runs of `device`
    pub fn new(device: &'d mut TiledDevice<P>) -> Self {
        Self { device }
    }
}

impl<P: Pixel> FillSink for ComponentClearSink<'_, P> {
    #[inline]
    fn consume_run(&mut self, row: i32, x0: i32, x1: i32, _confidence: &[u8]) {
        self.device.write_pixel_run(row, x0, x1, P::TRANSPARENT);
    }
}

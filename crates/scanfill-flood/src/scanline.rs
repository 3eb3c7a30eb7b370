//! Scanline flood fill
//!
//! The fill runs in phases. During a phase every interval travels in one
//! direction: scanning row `r` pushes the matching runs onto the stack as
//! intervals for row `r + 1` (or `r - 1`). When a run on row `r` grows past
//! the interval that produced it, the extra columns have an unvisited
//! neighbor on the row the front came from; they are parked in the
//! backward [`FillIntervalMap`]. Once the stack is empty the direction
//! flips and the parked intervals become the new stack. The fill is done
//! when both are empty.
//!
//! Matching is decided by a [`PixelMatcher`] and every matched run goes to
//! a [`FillSink`], so the traversal is shared by all fill operations. With
//! gap closing the row scan also steps over short non-matching runs that
//! lead back to matching pixels; bridged pixels are filled at full
//! confidence.
//!
//! # Examples
//!
//! ```
//! use scanfill_core::{PaintDevice, Point, Rect, Rgba};
//! use scanfill_flood::ScanlineFill;
//!
//! let mut dev = PaintDevice::new();
//! // a vertical wall at x = 5
//! for y in 0..10 {
//!     dev.set_pixel(5, y, Rgba::BLACK);
//! }
//!
//! let bounds = Rect::new(0, 0, 10, 10).unwrap();
//! let stats = ScanlineFill::new(&mut dev, Point::new(1, 1), bounds).fill_color(Rgba::RED);
//!
//! assert_eq!(stats.pixels_filled, 50);
//! assert_eq!(dev.pixel(4, 9), Rgba::RED);
//! assert_eq!(dev.pixel(6, 0), Rgba::TRANSPARENT);
//! ```

use crate::gap::GapCloser;
use crate::interval::{Direction, FillInterval};
use crate::interval_map::FillIntervalMap;
use crate::matcher::{
    BoundedMatcher, MAX_OPACITY_SPREAD, NonZeroMatcher, PixelMatcher, SimilarityMatcher,
    UntilColorMatcher,
};
use crate::options::{FillOptions, MAX_CLOSE_GAP, clamp_setting};
use crate::sanity::SanityChecks;
use crate::sink::{ColorPaintSink, ComponentClearSink, FillSink, SelectionAccumulateSink};
use crate::stats::{CountingSink, FillStats};
use log::{debug, trace};
use scanfill_core::{MAX_OPACITY, Pixel, Point, Rect, Selection, TiledDevice};
use std::sync::atomic::{AtomicBool, Ordering};

/// Progress of a fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillPhase {
    /// Nothing has run yet
    Idle,
    /// Scanning the seed row
    Seeding,
    /// Working through the stack and the backward map
    Processing,
    /// Finished, or stopped by cancellation
    Done,
}

/// Horizontal end of a row an extension walks towards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Consecutive matched columns waiting to be handed to the sink
struct RunBuffer {
    row: i32,
    start: i32,
    confidence: Vec<u8>,
}

impl RunBuffer {
    fn new(row: i32) -> Self {
        Self {
            row,
            start: 0,
            confidence: Vec::new(),
        }
    }

    fn push(&mut self, x: i32, opacity: u8) {
        if self.confidence.is_empty() {
            self.start = x;
        }
        self.confidence.push(opacity);
    }

    fn flush<S: FillSink>(&mut self, sink: &mut S) {
        if self.confidence.is_empty() {
            return;
        }
        let end = self.start + (self.confidence.len() as i32 - 1);
        sink.consume_run(self.row, self.start, end, &self.confidence);
        self.confidence.clear();
    }
}

/// Traversal state shared by all fill operations
#[derive(Debug)]
struct Traversal {
    rect: Rect,
    sanity: SanityChecks,
    forward_stack: Vec<FillInterval>,
    backward_map: FillIntervalMap,
    gaps: GapCloser,
    /// Pixels already handed to the sink during the current run
    visited: Selection,
    phase: FillPhase,
}

impl Traversal {
    fn new(rect: Rect, sanity: SanityChecks) -> Self {
        Self {
            rect,
            sanity,
            forward_stack: Vec::new(),
            backward_map: FillIntervalMap::with_sanity_checks(sanity),
            gaps: GapCloser::new(0, rect),
            visited: Selection::new(),
            phase: FillPhase::Idle,
        }
    }

    fn set_sanity_checks(&mut self, sanity: SanityChecks) {
        self.sanity = sanity;
        self.backward_map.set_sanity_checks(sanity);
    }

    fn set_close_gap(&mut self, gap: u32) {
        self.gaps = GapCloser::new(gap, self.rect);
    }

    fn reset(&mut self) {
        self.forward_stack.clear();
        self.backward_map.clear();
        self.visited.clear();
        self.phase = FillPhase::Idle;
    }

    /// Matcher result for a pixel not scanned before; marks it scanned
    #[inline]
    fn sample<M: PixelMatcher>(&mut self, matcher: &mut M, x: i32, y: i32) -> u8 {
        if self.visited.pixel(x, y) != 0 {
            return 0;
        }
        let opacity = matcher.opacity(x, y);
        if opacity > 0 {
            self.visited.set_pixel(x, y, MAX_OPACITY);
        }
        opacity
    }

    fn push_forward(&mut self, interval: Option<FillInterval>) {
        let Some(mut interval) = interval else {
            return;
        };
        if let Some(row) = interval.row.checked_add(interval.direction.row_increment()) {
            interval.row = row;
            self.forward_stack.push(interval);
        }
    }

    /// Scan one interval and schedule what it uncovers
    fn process_line<M: PixelMatcher, S: FillSink>(
        &mut self,
        mut interval: FillInterval,
        matcher: &mut M,
        sink: &mut S,
    ) {
        if !interval.is_valid() {
            self.sanity
                .violation(format_args!("processing invalid interval {interval}"));
            return;
        }

        self.backward_map.crop_interval(&mut interval);
        if !interval.is_valid() || !self.rect.contains_row(interval.row) {
            return;
        }
        interval.start = interval.start.max(self.rect.x);
        interval.end = interval.end.min(self.rect.max_x());
        if !interval.is_valid() {
            return;
        }

        let row = interval.row;
        let (first, last) = (interval.start, interval.end);
        let mut forward: Option<FillInterval> = None;
        let mut run = RunBuffer::new(row);

        let mut x = first;
        while x <= last {
            let opacity = self.sample(matcher, x, row);
            if opacity > 0 {
                run.push(x, opacity);
                match forward.as_mut() {
                    Some(current) => current.end = x,
                    None => {
                        // only a bridge can reach left of a run that starts inside the interval
                        let start = if x == first || self.gaps.is_enabled() {
                            self.extended_pass(&interval, x, Side::Left, matcher, sink)
                        } else {
                            x
                        };
                        forward = Some(FillInterval::new_unchecked(
                            start,
                            x,
                            row,
                            interval.direction,
                        ));
                    }
                }
                x += 1;
                continue;
            }

            if let Some(current) = forward.as_mut() {
                let bridge = self.gaps.gap_end(matcher, &self.visited, x, row, 1);
                if let Some(end) = bridge {
                    // the part past `last` is bridged by the right extension
                    let end = end.min(last);
                    for bx in x..=end {
                        self.visited.set_pixel(bx, row, MAX_OPACITY);
                        run.push(bx, MAX_OPACITY);
                    }
                    current.end = end;
                    x = end + 1;
                    continue;
                }
            }

            run.flush(sink);
            self.push_forward(forward.take());
            x += 1;
        }

        run.flush(sink);
        if let Some(current) = forward.as_mut() {
            current.end = self.extended_pass(&interval, last, Side::Right, matcher, sink);
        }
        self.push_forward(forward);
    }

    /// Walk from `from` towards the rect edge while pixels match or bridge
    ///
    /// Returns the outermost filled column, or `from` if nothing was filled.
    /// Filled columns outside `scanned` are parked in the backward map.
    fn extended_pass<M: PixelMatcher, S: FillSink>(
        &mut self,
        scanned: &FillInterval,
        from: i32,
        side: Side,
        matcher: &mut M,
        sink: &mut S,
    ) -> i32 {
        let row = scanned.row;
        let (edge, step) = match side {
            Side::Left => (self.rect.x, -1),
            Side::Right => (self.rect.max_x(), 1),
        };

        let mut x = from;
        let mut confidence = Vec::new();
        while x != edge {
            let next = x + step;
            let opacity = self.sample(matcher, next, row);
            if opacity > 0 {
                confidence.push(opacity);
                x = next;
                continue;
            }
            let Some(end) = self.gaps.gap_end(matcher, &self.visited, next, row, step) else {
                break;
            };
            while x != end {
                x += step;
                self.visited.set_pixel(x, row, MAX_OPACITY);
                confidence.push(MAX_OPACITY);
            }
        }
        if confidence.is_empty() {
            return from;
        }

        let (lo, hi) = match side {
            Side::Left => {
                confidence.reverse();
                (x, from - 1)
            }
            Side::Right => (from + 1, x),
        };
        sink.consume_run(row, lo, hi, &confidence);

        let backward = scanned.direction.opposite();
        if lo < scanned.start {
            self.backward_map.insert_interval(FillInterval::new_unchecked(
                lo,
                hi.min(scanned.start - 1),
                row,
                backward,
            ));
        }
        if hi > scanned.end {
            self.backward_map.insert_interval(FillInterval::new_unchecked(
                lo.max(scanned.end + 1),
                hi,
                row,
                backward,
            ));
        }
        x
    }

    /// Fill from `seed` until both the stack and the backward map are empty
    fn run<M: PixelMatcher, S: FillSink>(
        &mut self,
        seed: Point,
        close_gap: u32,
        cancel: Option<&AtomicBool>,
        matcher: &mut M,
        sink: S,
    ) -> FillStats {
        self.reset();
        self.set_close_gap(close_gap);
        self.phase = FillPhase::Seeding;
        let mut stats = FillStats::default();
        let mut sink = CountingSink::new(sink);

        if self.rect.is_empty()
            || !self.rect.contains_point(seed.x, seed.y)
            || matcher.opacity(seed.x, seed.y) == 0
        {
            debug!(
                "fill seed ({}, {}) does not start a fill in {:?}",
                seed.x, seed.y, self.rect
            );
            self.phase = FillPhase::Done;
            return stats;
        }

        debug!("fill from ({}, {}) in {:?}", seed.x, seed.y, self.rect);
        stats.intervals_processed += 1;
        self.process_line(FillInterval::down(seed.x, seed.x, seed.y), matcher, &mut sink);
        self.backward_map
            .insert_interval(FillInterval::up(seed.x, seed.x, seed.y));

        self.phase = FillPhase::Processing;
        let mut direction = Direction::Down;
        'fill: loop {
            while let Some(interval) = self.forward_stack.pop() {
                if !self.rect.contains_row(interval.row) {
                    continue;
                }
                if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                    debug!("fill cancelled after {} intervals", stats.intervals_processed);
                    stats.cancelled = true;
                    self.forward_stack.clear();
                    self.backward_map.clear();
                    break 'fill;
                }
                stats.intervals_processed += 1;
                self.process_line(interval, matcher, &mut sink);
            }

            if self.backward_map.is_empty() {
                break;
            }
            direction = direction.opposite();
            self.forward_stack = self.backward_map.take_all(direction.row_increment());
            trace!(
                "fill turns {:?} with {} intervals",
                direction,
                self.forward_stack.len()
            );
        }

        self.phase = FillPhase::Done;
        sink.record_into(&mut stats);
        debug!("fill done: {:?}", stats);
        stats
    }
}

/// Scanline flood fill over a tiled device
///
/// The fill never reads or writes outside the bounding rectangle. The
/// reference color is the device pixel at the seed when a fill starts.
pub struct ScanlineFill<'a, P: Pixel> {
    device: &'a mut TiledDevice<P>,
    seed: Point,
    options: FillOptions,
    cancel: Option<&'a AtomicBool>,
    traversal: Traversal,
}

impl<'a, P: Pixel> ScanlineFill<'a, P> {
    /// Create a fill of `device` starting at `seed`, limited to `bounds`
    pub fn new(device: &'a mut TiledDevice<P>, seed: Point, bounds: Rect) -> Self {
        let options = FillOptions::default();
        Self {
            device,
            seed,
            options,
            cancel: None,
            traversal: Traversal::new(bounds, options.sanity()),
        }
    }

    /// Replace all options at once
    pub fn with_options(mut self, options: FillOptions) -> Self {
        self.options = options;
        self.traversal.set_sanity_checks(options.sanity());
        self
    }

    /// Current options
    pub fn options(&self) -> &FillOptions {
        &self.options
    }

    /// Set the similarity threshold, clamped to `0..=255`
    pub fn set_threshold(&mut self, threshold: i32) {
        self.options.threshold = clamp_setting("threshold", threshold, MAX_OPACITY as u32) as u8;
    }

    /// Set the opacity spread in percent, clamped to `0..=100`
    pub fn set_opacity_spread(&mut self, spread: i32) {
        self.options.opacity_spread =
            clamp_setting("opacity spread", spread, MAX_OPACITY_SPREAD as u32) as u8;
    }

    /// Set the gap-closing width, clamped to `0..=MAX_CLOSE_GAP`
    pub fn set_close_gap_size(&mut self, gap: i32) {
        self.options.close_gap = clamp_setting("close gap", gap, MAX_CLOSE_GAP);
    }

    /// Enable or disable invariant checks
    pub fn set_sanity_checks(&mut self, enabled: bool) {
        self.options.sanity_checks = enabled;
        self.traversal.set_sanity_checks(self.options.sanity());
    }

    /// Stop the fill between intervals once `flag` is raised
    pub fn set_cancel_flag(&mut self, flag: &'a AtomicBool) {
        self.cancel = Some(flag);
    }

    /// Bounding rectangle
    pub fn bounds(&self) -> Rect {
        self.traversal.rect
    }

    /// Progress of the last fill
    pub fn phase(&self) -> FillPhase {
        self.traversal.phase
    }

    fn reference_pixel(&self) -> P {
        self.device.pixel(self.seed.x, self.seed.y)
    }

    fn similarity_matcher<'r>(
        &self,
        device: &'r TiledDevice<P>,
        reference: P,
    ) -> SimilarityMatcher<'r, P> {
        SimilarityMatcher::new(
            device,
            reference,
            self.options.threshold,
            self.options.opacity_spread,
        )
    }

    fn until_color_matcher<'r>(
        &self,
        device: &'r TiledDevice<P>,
        boundary: P,
        or_transparent: bool,
    ) -> UntilColorMatcher<'r, P> {
        let until = UntilColorMatcher::new(
            device,
            boundary,
            self.options.threshold,
            self.options.opacity_spread,
        );
        if or_transparent {
            until.or_transparent()
        } else {
            until
        }
    }

    /// Paint the matching region with `color`, in place
    ///
    /// Matching is decided against the device as it was when the fill
    /// started, so painted pixels never change what matches.
    pub fn fill_color(&mut self, color: P) -> FillStats {
        let snapshot = self.device.clone();
        let mut matcher = self.similarity_matcher(&snapshot, self.reference_pixel());
        let sink = ColorPaintSink::new(&mut *self.device, color);
        self.traversal.run(self.seed, self.options.close_gap, self.cancel, &mut matcher, sink)
    }

    /// Paint the matching region of this device with `color` into `external`
    pub fn fill_color_external(&mut self, color: P, external: &mut TiledDevice<P>) -> FillStats {
        let mut matcher = self.similarity_matcher(&*self.device, self.reference_pixel());
        let sink = ColorPaintSink::new(external, color);
        self.traversal.run(self.seed, self.options.close_gap, self.cancel, &mut matcher, sink)
    }

    /// Write the confidence of the matching region into `selection`
    ///
    /// The device is left untouched.
    pub fn fill_selection(&mut self, selection: &mut Selection) -> FillStats {
        let mut matcher = self.similarity_matcher(&*self.device, self.reference_pixel());
        let sink = SelectionAccumulateSink::new(selection);
        self.traversal.run(self.seed, self.options.close_gap, self.cancel, &mut matcher, sink)
    }

    /// Like [`fill_selection`](Self::fill_selection), with zero pixels of
    /// `boundary` acting as walls
    pub fn fill_selection_with_boundary(
        &mut self,
        selection: &mut Selection,
        boundary: &Selection,
    ) -> FillStats {
        let similar = self.similarity_matcher(&*self.device, self.reference_pixel());
        let mut matcher = BoundedMatcher::new(similar, boundary);
        let sink = SelectionAccumulateSink::new(selection);
        self.traversal.run(self.seed, self.options.close_gap, self.cancel, &mut matcher, sink)
    }

    /// Select everything reachable before a pixel close to `boundary_color`
    pub fn fill_selection_until_color(
        &mut self,
        selection: &mut Selection,
        boundary_color: P,
    ) -> FillStats {
        let mut matcher = self.until_color_matcher(&*self.device, boundary_color, false);
        let sink = SelectionAccumulateSink::new(selection);
        self.traversal.run(self.seed, self.options.close_gap, self.cancel, &mut matcher, sink)
    }

    /// Like [`fill_selection_until_color`](Self::fill_selection_until_color),
    /// also stopping at fully transparent pixels
    pub fn fill_selection_until_color_or_transparent(
        &mut self,
        selection: &mut Selection,
        boundary_color: P,
    ) -> FillStats {
        let mut matcher = self.until_color_matcher(&*self.device, boundary_color, true);
        let sink = SelectionAccumulateSink::new(selection);
        self.traversal.run(self.seed, self.options.close_gap, self.cancel, &mut matcher, sink)
    }

    /// [`fill_selection_until_color`](Self::fill_selection_until_color)
    /// limited by a boundary mask
    pub fn fill_selection_until_color_with_boundary(
        &mut self,
        selection: &mut Selection,
        boundary_color: P,
        boundary: &Selection,
    ) -> FillStats {
        let until = self.until_color_matcher(&*self.device, boundary_color, false);
        let mut matcher = BoundedMatcher::new(until, boundary);
        let sink = SelectionAccumulateSink::new(selection);
        self.traversal.run(self.seed, self.options.close_gap, self.cancel, &mut matcher, sink)
    }

    /// [`fill_selection_until_color_or_transparent`](Self::fill_selection_until_color_or_transparent)
    /// limited by a boundary mask
    pub fn fill_selection_until_color_or_transparent_with_boundary(
        &mut self,
        selection: &mut Selection,
        boundary_color: P,
        boundary: &Selection,
    ) -> FillStats {
        let until = self.until_color_matcher(&*self.device, boundary_color, true);
        let mut matcher = BoundedMatcher::new(until, boundary);
        let sink = SelectionAccumulateSink::new(selection);
        self.traversal.run(self.seed, self.options.close_gap, self.cancel, &mut matcher, sink)
    }

    /// Erase the 4-connected region of non-transparent pixels around the seed
    ///
    /// Threshold, spread and gap settings are ignored.
    pub fn clear_non_zero_component(&mut self) -> FillStats {
        let snapshot = self.device.clone();
        let mut matcher = NonZeroMatcher::new(&snapshot);
        let sink = ComponentClearSink::new(&mut *self.device);
        self.traversal.run(self.seed, 0, self.cancel, &mut matcher, sink)
    }

    /// Pending backward intervals
    pub fn backward_map(&self) -> &FillIntervalMap {
        &self.traversal.backward_map
    }

    /// Pending backward intervals, for preparing a single-step test
    pub fn backward_map_mut(&mut self) -> &mut FillIntervalMap {
        &mut self.traversal.backward_map
    }

    /// Intervals waiting on the stack, bottom first
    pub fn forward_stack(&self) -> &[FillInterval] {
        &self.traversal.forward_stack
    }

    /// Scan exactly one interval, painting matches with `fill_color`
    ///
    /// Leaves the stack and the backward map as the scan left them.
    pub fn testing_process_line(&mut self, interval: FillInterval, fill_color: P) -> FillStats {
        let snapshot = self.device.clone();
        let mut matcher = self.similarity_matcher(&snapshot, self.reference_pixel());
        let mut sink = CountingSink::new(ColorPaintSink::new(&mut *self.device, fill_color));
        self.traversal.set_close_gap(self.options.close_gap);
        self.traversal.process_line(interval, &mut matcher, &mut sink);

        let mut stats = FillStats {
            intervals_processed: 1,
            ..FillStats::default()
        };
        sink.record_into(&mut stats);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanfill_core::{PaintDevice, Rgba};

    fn rect(x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect::new_unchecked(x, y, w, h)
    }

    #[test]
    fn test_phases() {
        let mut dev = PaintDevice::new();
        let mut fill = ScanlineFill::new(&mut dev, Point::new(0, 0), rect(0, 0, 4, 4));
        assert_eq!(fill.phase(), FillPhase::Idle);
        fill.fill_color(Rgba::RED);
        assert_eq!(fill.phase(), FillPhase::Done);
        assert!(fill.forward_stack().is_empty());
        assert!(fill.backward_map().is_empty());
    }

    #[test]
    fn test_uniform_fill_counts() {
        let mut dev = PaintDevice::new();
        let stats =
            ScanlineFill::new(&mut dev, Point::new(3, 2), rect(-5, -5, 17, 9)).fill_color(Rgba::RED);
        assert_eq!(stats.pixels_filled, 17 * 9);
        assert!(!stats.cancelled);
        assert_eq!(
            dev.count_pixels(&rect(-10, -10, 40, 40), |p| p == Rgba::RED),
            17 * 9
        );
    }

    #[test]
    fn test_setters_clamp() {
        let mut dev = PaintDevice::new();
        let mut fill = ScanlineFill::new(&mut dev, Point::new(0, 0), rect(0, 0, 1, 1));
        fill.set_threshold(300);
        fill.set_opacity_spread(-4);
        fill.set_close_gap_size(1000);
        assert_eq!(fill.options().threshold, 255);
        assert_eq!(fill.options().opacity_spread, 0);
        assert_eq!(fill.options().close_gap, MAX_CLOSE_GAP);
    }

    #[test]
    fn test_seed_outside_is_noop() {
        let mut dev = PaintDevice::new();
        let stats =
            ScanlineFill::new(&mut dev, Point::new(10, 0), rect(0, 0, 5, 5)).fill_color(Rgba::RED);
        assert_eq!(stats, FillStats::default());
        assert_eq!(dev.tile_count(), 0);
    }

    #[test]
    fn test_run_buffer_flush() {
        struct Collect(Vec<(i32, i32, i32, Vec<u8>)>);
        impl FillSink for Collect {
            fn consume_run(&mut self, row: i32, x0: i32, x1: i32, confidence: &[u8]) {
                self.0.push((row, x0, x1, confidence.to_vec()));
            }
        }

        let mut sink = Collect(Vec::new());
        let mut run = RunBuffer::new(7);
        run.flush(&mut sink);
        run.push(-2, 5);
        run.push(-1, 6);
        run.flush(&mut sink);
        run.flush(&mut sink);
        assert_eq!(sink.0, vec![(7, -2, -1, vec![5, 6])]);
    }
}

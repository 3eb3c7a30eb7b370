//! Per-pixel fill predicates
//!
//! A [`PixelMatcher`] answers, for one pixel, how strongly it belongs to
//! the fill: 0 means it does not match and stops the fill, anything else
//! is the confidence written by the output sink.

use scanfill_core::{MAX_OPACITY, Pixel, Selection, TiledDevice};

/// Largest accepted opacity spread, in percent of the threshold
pub const MAX_OPACITY_SPREAD: u8 = 100;

/// Decides which pixels a fill may cover
pub trait PixelMatcher {
    /// Confidence that `(x, y)` belongs to the fill, 0 = no match
    ///
    /// Must return the same value for the same pixel during one fill.
    fn opacity(&mut self, x: i32, y: i32) -> u8;

    /// Whether gap closing may bridge across `(x, y)` when it does not match
    fn bridgeable(&mut self, _x: i32, _y: i32) -> bool {
        true
    }
}

impl<M: PixelMatcher + ?Sized> PixelMatcher for &mut M {
    #[inline]
    fn opacity(&mut self, x: i32, y: i32) -> u8 {
        (**self).opacity(x, y)
    }

    #[inline]
    fn bridgeable(&mut self, x: i32, y: i32) -> bool {
        (**self).bridgeable(x, y)
    }
}

/// Map a distance to a fill confidence
///
/// Distances above `threshold` give 0. The lowest `100 - spread` percent of
/// the threshold range give full confidence; the rest ramps down linearly
/// and never reaches 0 for a matching pixel. A spread of 0 gives a binary
/// result.
///
/// # Examples
///
/// ```
/// use scanfill_flood::spread_opacity;
///
/// assert_eq!(spread_opacity(10, 10, 0), 255);
/// assert_eq!(spread_opacity(11, 10, 0), 0);
/// assert_eq!(spread_opacity(0, 100, 50), 255);
/// assert!(spread_opacity(75, 100, 50) < 255);
/// ```
pub fn spread_opacity(distance: u8, threshold: u8, spread: u8) -> u8 {
    if distance > threshold {
        return 0;
    }
    let spread = spread.min(MAX_OPACITY_SPREAD) as u32;
    let t = threshold as u32;
    let d = distance as u32;
    let full = t * (100 - spread) / 100;
    if d <= full {
        return MAX_OPACITY;
    }
    (MAX_OPACITY as u32 * (t - d + 1) / (t - full + 1)) as u8
}

/// Matches pixels close to a reference color
pub struct SimilarityMatcher<'d, P: Pixel> {
    device: &'d TiledDevice<P>,
    reference: P,
    threshold: u8,
    spread: u8,
}

impl<'d, P: Pixel> SimilarityMatcher<'d, P> {
    /// Match pixels of `device` within `threshold` of `reference`
    pub fn new(device: &'d TiledDevice<P>, reference: P, threshold: u8, spread: u8) -> Self {
        Self {
            device,
            reference,
            threshold,
            spread: spread.min(MAX_OPACITY_SPREAD),
        }
    }
}

impl<P: Pixel> PixelMatcher for SimilarityMatcher<'_, P> {
    #[inline]
    fn opacity(&mut self, x: i32, y: i32) -> u8 {
        let distance = self.device.pixel(x, y).difference(&self.reference);
        spread_opacity(distance, self.threshold, self.spread)
    }
}

/// Matches pixels until a boundary color is reached
///
/// A pixel matches when its distance to the boundary color is greater than
/// the threshold. The spread ramp sits next to the boundary color.
pub struct UntilColorMatcher<'d, P: Pixel> {
    device: &'d TiledDevice<P>,
    boundary: P,
    threshold: u8,
    spread: u8,
    stop_at_transparent: bool,
}

impl<'d, P: Pixel> UntilColorMatcher<'d, P> {
    /// Match pixels of `device` that differ from `boundary` by more than `threshold`
    pub fn new(device: &'d TiledDevice<P>, boundary: P, threshold: u8, spread: u8) -> Self {
        Self {
            device,
            boundary,
            threshold,
            spread: spread.min(MAX_OPACITY_SPREAD),
            stop_at_transparent: false,
        }
    }

    /// Also stop at fully transparent pixels
    pub fn or_transparent(mut self) -> Self {
        self.stop_at_transparent = true;
        self
    }
}

impl<P: Pixel> PixelMatcher for UntilColorMatcher<'_, P> {
    fn opacity(&mut self, x: i32, y: i32) -> u8 {
        let pixel = self.device.pixel(x, y);
        if self.stop_at_transparent && pixel.opacity() == 0 {
            return 0;
        }
        let distance = pixel.difference(&self.boundary);
        if distance <= self.threshold {
            return 0;
        }
        // threshold < 255 here
        spread_opacity(
            MAX_OPACITY - distance,
            MAX_OPACITY - 1 - self.threshold,
            self.spread,
        )
    }
}

/// Matches every pixel with non-zero opacity
pub struct NonZeroMatcher<'d, P: Pixel> {
    device: &'d TiledDevice<P>,
}

impl<'d, P: Pixel> NonZeroMatcher<'d, P> {
    /// Match the non-transparent pixels of `device`
    pub fn new(device: &'d TiledDevice<P>) -> Self {
        Self { device }
    }
}

impl<P: Pixel> PixelMatcher for NonZeroMatcher<'_, P> {
    #[inline]
    fn opacity(&mut self, x: i32, y: i32) -> u8 {
        if self.device.pixel(x, y).opacity() != 0 {
            MAX_OPACITY
        } else {
            0
        }
    }
}

/// Restricts another matcher to the non-zero area of a boundary mask
///
/// Zero mask pixels are hard walls: gap closing never bridges them.
pub struct BoundedMatcher<'b, M> {
    inner: M,
    boundary: &'b Selection,
}

impl<'b, M: PixelMatcher> BoundedMatcher<'b, M> {
    /// Match where both `boundary` is non-zero and `inner` matches
    pub fn new(inner: M, boundary: &'b Selection) -> Self {
        Self { inner, boundary }
    }
}

impl<M: PixelMatcher> PixelMatcher for BoundedMatcher<'_, M> {
    #[inline]
    fn opacity(&mut self, x: i32, y: i32) -> u8 {
        if self.boundary.pixel(x, y) == 0 {
            return 0;
        }
        self.inner.opacity(x, y)
    }

    #[inline]
    fn bridgeable(&mut self, x: i32, y: i32) -> bool {
        self.boundary.pixel(x, y) != 0 && self.inner.bridgeable(x, y)
    }
}

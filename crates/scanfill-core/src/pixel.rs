//! Pixel types stored in a tiled device
//!
//! A device is generic over its pixel type. The fill engine needs a few
//! things from a pixel: how opaque it is, how far it is from another pixel,
//! a copy of itself with its opacity scaled by a confidence, and how it
//! looks when laid over another pixel.
//!
//! [`Rgba`] is 8 bits per channel with straight (non-premultiplied) alpha.

use std::fmt::Debug;

/// Fully opaque / fully selected
pub const MAX_OPACITY: u8 = 255;
/// Fully transparent / unselected
pub const MIN_OPACITY: u8 = 0;

/// A value stored per pixel in a [`TiledDevice`](crate::TiledDevice).
pub trait Pixel: Copy + PartialEq + Default + Debug + Send + Sync + 'static {
    /// The fully transparent (erased) value
    const TRANSPARENT: Self;

    /// Opacity of this pixel, 0 = transparent
    fn opacity(&self) -> u8;

    /// Distance to another pixel: 0 = identical, 255 = maximally different
    fn difference(&self, other: &Self) -> u8;

    /// This pixel with its opacity multiplied by `confidence / 255`
    fn with_opacity(self, confidence: u8) -> Self;

    /// This pixel composited source-over onto `backdrop`
    fn over(self, backdrop: Self) -> Self;
}

/// Multiply two 8-bit fractions with rounding
#[inline]
pub fn mul_u8(a: u8, b: u8) -> u8 {
    let t = a as u32 * b as u32 + 128;
    (((t >> 8) + t) >> 8) as u8
}

/// An 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with all four channels set to `v`
    pub const fn splat(v: u8) -> Self {
        Self {
            r: v,
            g: v,
            b: v,
            a: v,
        }
    }

    /// Transparent black
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    /// Opaque black
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    /// Opaque white
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    /// Opaque red
    pub const RED: Rgba = Rgba::rgb(255, 0, 0);
    /// Opaque green
    pub const GREEN: Rgba = Rgba::rgb(0, 255, 0);
    /// Opaque blue
    pub const BLUE: Rgba = Rgba::rgb(0, 0, 255);
}

impl Pixel for Rgba {
    const TRANSPARENT: Self = Rgba::TRANSPARENT;

    #[inline]
    fn opacity(&self) -> u8 {
        self.a
    }

    fn difference(&self, other: &Self) -> u8 {
        // Color channels of invisible pixels carry no information
        if self.a == 0 && other.a == 0 {
            return 0;
        }
        self.r
            .abs_diff(other.r)
            .max(self.g.abs_diff(other.g))
            .max(self.b.abs_diff(other.b))
            .max(self.a.abs_diff(other.a))
    }

    #[inline]
    fn with_opacity(self, confidence: u8) -> Self {
        Self {
            a: mul_u8(self.a, confidence),
            ..self
        }
    }

    fn over(self, backdrop: Self) -> Self {
        if self.a == MAX_OPACITY || backdrop.a == MIN_OPACITY {
            return self;
        }
        // backdrop weight left after the source
        let w = mul_u8(backdrop.a, MAX_OPACITY - self.a) as u32;
        let a = self.a as u32 + w;
        if a == 0 {
            return Rgba::TRANSPARENT;
        }
        let sa = self.a as u32;
        let blend = |s: u8, d: u8| ((s as u32 * sa + d as u32 * w + a / 2) / a) as u8;
        Self {
            r: blend(self.r, backdrop.r),
            g: blend(self.g, backdrop.g),
            b: blend(self.b, backdrop.b),
            a: a as u8,
        }
    }
}

impl Pixel for u8 {
    const TRANSPARENT: Self = 0;

    #[inline]
    fn opacity(&self) -> u8 {
        *self
    }

    #[inline]
    fn difference(&self, other: &Self) -> u8 {
        self.abs_diff(*other)
    }

    #[inline]
    fn with_opacity(self, confidence: u8) -> Self {
        mul_u8(self, confidence)
    }

    #[inline]
    fn over(self, backdrop: Self) -> Self {
        self + mul_u8(backdrop, MAX_OPACITY - self)
    }
}

//! Fill configuration

use crate::matcher::MAX_OPACITY_SPREAD;
use crate::sanity::SanityChecks;
use log::warn;

/// Largest accepted gap-closing width, in pixels
pub const MAX_CLOSE_GAP: u32 = 32;

/// Options controlling a scanline fill
///
/// Out-of-range values are clamped, never rejected.
///
/// # Examples
///
/// ```
/// use scanfill_flood::{FillOptions, MAX_CLOSE_GAP};
///
/// let opts = FillOptions::default()
///     .with_threshold(20)
///     .with_opacity_spread(150)
///     .with_close_gap(1000);
/// assert_eq!(opts.opacity_spread, 100);
/// assert_eq!(opts.close_gap, MAX_CLOSE_GAP);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillOptions {
    /// Largest distance from the reference color that still matches
    pub threshold: u8,
    /// Percentage of the threshold range with a soft confidence ramp
    pub opacity_spread: u8,
    /// Longest non-matching run that is bridged, 0 disables gap closing
    pub close_gap: u32,
    /// Abort on internal invariant violations
    pub sanity_checks: bool,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            threshold: 0,
            opacity_spread: 0,
            close_gap: 0,
            sanity_checks: cfg!(debug_assertions),
        }
    }
}

impl FillOptions {
    /// Set the similarity threshold
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the opacity spread, clamped to 100
    pub fn with_opacity_spread(mut self, spread: u8) -> Self {
        if spread > MAX_OPACITY_SPREAD {
            warn!("opacity spread {spread} clamped to {MAX_OPACITY_SPREAD}");
        }
        self.opacity_spread = spread.min(MAX_OPACITY_SPREAD);
        self
    }

    /// Set the gap-closing width, clamped to [`MAX_CLOSE_GAP`]
    pub fn with_close_gap(mut self, gap: u32) -> Self {
        if gap > MAX_CLOSE_GAP {
            warn!("close gap {gap} clamped to {MAX_CLOSE_GAP}");
        }
        self.close_gap = gap.min(MAX_CLOSE_GAP);
        self
    }

    /// Enable or disable invariant checks
    pub fn with_sanity_checks(mut self, enabled: bool) -> Self {
        self.sanity_checks = enabled;
        self
    }

    pub(crate) fn sanity(&self) -> SanityChecks {
        SanityChecks::new(self.sanity_checks)
    }
}

/// Clamp a signed setting into `0..=max`, warning when it was out of range
pub(crate) fn clamp_setting(name: &str, value: i32, max: u32) -> u32 {
    let clamped = value.clamp(0, max.min(i32::MAX as u32) as i32) as u32;
    if clamped as i64 != value as i64 {
        warn!("{name} {value} clamped to {clamped}");
    }
    clamped
}

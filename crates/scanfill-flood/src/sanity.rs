//! Runtime invariant checks for the fill engine
//!
//! A violated invariant is a bug in the engine, never a user error. With
//! checks enabled the fill aborts; with checks disabled the violation is
//! logged and the engine carries on with a safe fallback.

use log::warn;
use std::fmt;

/// Invariant check mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanityChecks {
    enabled: bool,
}

impl Default for SanityChecks {
    fn default() -> Self {
        Self::new(cfg!(debug_assertions))
    }
}

impl SanityChecks {
    /// Create a check mode
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether violations abort
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Report a violated invariant
    ///
    /// # Panics
    ///
    /// Panics when checks are enabled.
    #[track_caller]
    pub fn violation(&self, args: fmt::Arguments<'_>) {
        if self.enabled {
            panic!("fill sanity check failed: {args}");
        }
        warn!("fill sanity check failed: {args}");
    }
}

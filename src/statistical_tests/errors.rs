//! statistical_tests::errors — shared error types and Python bridges.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used by the statistical test
//! routines in this crate (Brown goodness-of-fit test, Shapiro-Wilk
//! normality test), together with a conversion layer to Python exceptions
//! for PyO3-based bindings. This keeps test-specific validation and runtime
//! failures localized while exposing a clean error surface to both Rust and
//! Python.
//!
//! Key behaviors
//! -------------
//! - Define [`TestResult`] and [`TestError`] as the canonical result and
//!   error types for the test engines and their validation helpers.
//! - Attach human-readable `Display` messages to each error variant so that
//!   diagnostics and logs are meaningful without additional context.
//! - Implement `From<TestError> for PyErr` to map Rust-side validation and
//!   runtime errors into `PyValueError` values visible to Python callers.
//!
//! Invariants & assumptions
//! ------------------------
//! - Test modules which use this error type validate their inputs (lengths,
//!   finiteness, supported sample-size ranges) and return [`TestResult<T>`]
//!   instead of panicking.
//! - `TestError` values are small, cheap to clone, and suitable for use in
//!   both unit tests and higher-level orchestration code.
//!
//! Conventions
//! -----------
//! - This module is focused on statistical-test errors; adapter-level data
//!   errors live in `model::errors` and comparison-level errors in
//!   `comparison::errors`, mirroring the per-subtree error layout.
//! - Error messages are phrased in terms of domain constraints (e.g.,
//!   "MSE columns must not sum to zero", "3 ≤ n ≤ 5000") rather than
//!   low-level details.
//!
//! Downstream usage
//! ----------------
//! - The Brown and Shapiro-Wilk engines return [`TestResult<T>`] to
//!   propagate failures cleanly to callers.
//! - The summary assembler maps Shapiro-Wilk failures into "not available"
//!   results with an advisory note instead of aborting; the comparison
//!   reporter propagates Brown failures via its own error type.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that each [`TestError`] variant's `Display` message
//!   embeds its payload (offending index, value, or length).

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type TestResult<T> = Result<T, TestError>;

/// TestError — error conditions for the statistical test engines.
///
/// Purpose
/// -------
/// Represent all validation and computation failures that can occur when
/// running the Brown goodness-of-fit test or the Shapiro-Wilk normality
/// test, including malformed inputs and degenerate samples.
///
/// Variants
/// --------
/// - `InsufficientData`
///   The named series has fewer observations than the engine requires.
/// - `NonFiniteValue`
///   A series element is non-finite (NaN or ±∞) and cannot enter the
///   statistic.
/// - `LengthMismatch`
///   Two series that must be aligned per domain have different lengths.
/// - `SampleSizeOutOfRange`
///   The Shapiro-Wilk engine supports 3 ≤ n ≤ 5000 only.
/// - `ConstantSeries`
///   All observations are identical, so the Shapiro-Wilk denominator (sum
///   of squares about the mean) is zero.
/// - `IllConditioned`
///   The Royston coefficient construction degenerated numerically.
/// - `ZeroCombinedMse`
///   A Brown-test weight `mse_direct + mse_model` is exactly zero at some
///   domain, making the inverse-variance ratio undefined.
///
/// Invariants
/// ----------
/// - Each variant carries just enough information (offending series name,
///   index, value, or length) for downstream logging without dragging
///   large data structures along.
#[derive(Debug, Clone, PartialEq)]
pub enum TestError {
    //------ Input validation errors ------
    InsufficientData { series: &'static str, len: usize, min: usize },
    NonFiniteValue { series: &'static str, index: usize, value: f64 },
    LengthMismatch { series: &'static str, expected: usize, actual: usize },
    //------ Shapiro-Wilk specific ------
    SampleSizeOutOfRange { len: usize },
    ConstantSeries { len: usize },
    IllConditioned { reason: &'static str },
    //------ Brown test specific ------
    ZeroCombinedMse { index: usize },
}

impl std::error::Error for TestError {}

impl std::fmt::Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestError::InsufficientData { series, len, min } => {
                write!(f, "Series '{series}' needs at least {min} observations; got {len}.")
            }
            TestError::NonFiniteValue { series, index, value } => {
                write!(f, "Series '{series}' has a non-finite value at index {index}: {value}")
            }
            TestError::LengthMismatch { series, expected, actual } => {
                write!(
                    f,
                    "Series '{series}' must be aligned per domain: expected length {expected}, got {actual}."
                )
            }
            TestError::SampleSizeOutOfRange { len } => {
                write!(f, "Shapiro-Wilk test supports 3 ≤ n ≤ 5000; got n = {len}.")
            }
            TestError::ConstantSeries { len } => {
                write!(f, "All {len} observations are identical; normality test is undefined.")
            }
            TestError::IllConditioned { reason } => {
                write!(f, "Shapiro-Wilk coefficient construction degenerated: {reason}")
            }
            TestError::ZeroCombinedMse { index } => {
                write!(f, "Combined MSE weight at domain index {index} is zero.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<TestError> for PyErr {
    fn from(err: TestError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Basic `Display` formatting for TestError variants.
    // - Embedding of payload values (series name, index, length) into error
    //   messages.
    //
    // They intentionally DO NOT cover:
    // - The `From<TestError> for PyErr` conversion, since exercising it
    //   requires linking against the Python C API and is better handled by
    //   Python-level tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `TestError::InsufficientData` embeds the series name and
    // both lengths in its `Display` representation.
    //
    // Given
    // -----
    // - An `InsufficientData` error for series "direct" with len 1, min 3.
    //
    // Expect
    // ------
    // - The message contains "direct", "1", and "3".
    fn test_error_insufficient_data_includes_payload_in_display() {
        // Arrange
        let err = TestError::InsufficientData { series: "direct", len: 1, min: 3 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("direct"), "message should name the series.\nGot: {msg}");
        assert!(msg.contains('1') && msg.contains('3'), "message should embed lengths.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `TestError::NonFiniteValue` embeds the offending index in
    // its `Display` representation.
    //
    // Given
    // -----
    // - A `NonFiniteValue` error at index 4 with a NaN payload.
    //
    // Expect
    // ------
    // - The message contains "4" and "NaN".
    fn test_error_non_finite_value_includes_index_in_display() {
        // Arrange
        let err = TestError::NonFiniteValue { series: "mse_model", index: 4, value: f64::NAN };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('4'), "message should embed the offending index.\nGot: {msg}");
        assert!(msg.contains("NaN"), "message should embed the offending value.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `TestError::SampleSizeOutOfRange` embeds the offending
    // length in its `Display` representation.
    //
    // Given
    // -----
    // - A `SampleSizeOutOfRange` error with len 5001.
    //
    // Expect
    // ------
    // - The message contains "5001".
    fn test_error_sample_size_out_of_range_includes_len_in_display() {
        // Arrange
        let err = TestError::SampleSizeOutOfRange { len: 5001 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("5001"), "message should embed the offending length.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `TestError::ZeroCombinedMse` embeds the domain index in
    // its `Display` representation.
    //
    // Given
    // -----
    // - A `ZeroCombinedMse` error at index 2.
    //
    // Expect
    // ------
    // - The message contains "2".
    fn test_error_zero_combined_mse_includes_index_in_display() {
        // Arrange
        let err = TestError::ZeroCombinedMse { index: 2 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('2'), "message should embed the domain index.\nGot: {msg}");
    }
}

//! model::errors — validation errors for the fitted-model adapter.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used when constructing the
//! read-only adapter over an externally fitted small-area model
//! (estimate tables, MSE tables, model internals, sampling framework).
//! Construction is the single place where cross-table invariants are
//! enforced, so downstream diagnostics can rely on aligned, well-formed
//! data without re-checking.
//!
//! Key behaviors
//! -------------
//! - Define [`ModelResult`] and [`ModelDataError`] as the canonical result
//!   and error types for adapter constructors.
//! - Attach human-readable `Display` messages phrased in terms of the
//!   domain contract (aligned tables, shared in-sample flags, shrinkage
//!   weights in [0, 1]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Errors are raised at construction time only; once a `FitResult`
//!   exists, its invariants hold for its lifetime (all containers are
//!   read-only).
//! - Variants carry the offending table/series name plus index and value
//!   payloads, mirroring the crate's other error enums.
//!
//! Conventions
//! -----------
//! - Statistical-test errors live in `statistical_tests::errors`;
//!   comparison-level errors in `comparison::errors`. This module covers
//!   data-shape violations only.
//!
//! Testing notes
//! -------------
//! - Unit tests verify `Display` payload embedding; constructor tests in
//!   `model::fit` exercise each variant end-to-end.

pub type ModelResult<T> = Result<T, ModelDataError>;

/// ModelDataError — data-shape violations in fitted-model inputs.
///
/// Purpose
/// -------
/// Represent all invariant violations that can occur when assembling a
/// `FitResult` from externally produced estimates, MSEs, model internals,
/// and the sampling framework.
///
/// Variants
/// --------
/// - `EmptyTable`
///   An estimate table has no rows.
/// - `LengthMismatch`
///   Two per-domain containers that must align (estimate columns, MSE
///   table, gamma weights, random effects) have different lengths.
/// - `FlagMismatch`
///   The MSE table's out-of-sample flags disagree with the indicator
///   table's at some row.
/// - `NonFiniteInSample`
///   An in-sample estimate or MSE entry is NaN or ±∞ (out-of-sample rows
///   are allowed to carry non-finite placeholders).
/// - `GammaOutOfRange`
///   A shrinkage weight lies outside the closed interval [0, 1].
/// - `NonFiniteValue`
///   A residual or random-effect entry is non-finite.
/// - `InvalidVariance`
///   A variance component is negative or non-finite.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelDataError {
    //------ Table shape ------
    EmptyTable { table: &'static str },
    LengthMismatch { table: &'static str, expected: usize, actual: usize },
    FlagMismatch { index: usize },
    NonFiniteInSample { table: &'static str, column: &'static str, index: usize, value: f64 },
    //------ Internals ------
    GammaOutOfRange { index: usize, value: f64 },
    NonFiniteValue { series: &'static str, index: usize, value: f64 },
    InvalidVariance { name: &'static str, value: f64 },
}

impl std::error::Error for ModelDataError {}

impl std::fmt::Display for ModelDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelDataError::EmptyTable { table } => {
                write!(f, "Table '{table}' must have at least one domain row.")
            }
            ModelDataError::LengthMismatch { table, expected, actual } => {
                write!(
                    f,
                    "Container '{table}' must align per domain: expected length {expected}, got {actual}."
                )
            }
            ModelDataError::FlagMismatch { index } => {
                write!(
                    f,
                    "MSE table out-of-sample flag disagrees with the indicator table at row {index}."
                )
            }
            ModelDataError::NonFiniteInSample { table, column, index, value } => {
                write!(
                    f,
                    "Table '{table}', column '{column}': in-sample row {index} is non-finite: {value}"
                )
            }
            ModelDataError::GammaOutOfRange { index, value } => {
                write!(f, "Shrinkage weight at index {index} must lie in [0, 1]; got {value}.")
            }
            ModelDataError::NonFiniteValue { series, index, value } => {
                write!(f, "Series '{series}' has a non-finite value at index {index}: {value}")
            }
            ModelDataError::InvalidVariance { name, value } => {
                write!(f, "Variance component '{name}' must be finite and ≥ 0; got {value}.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Payload embedding in `Display` messages for representative
    //   variants.
    //
    // They intentionally DO NOT cover:
    // - The constructors that raise these errors; those are tested in
    //   `model::fit` and `model::internals`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `GammaOutOfRange` embeds index and value in its message.
    //
    // Given
    // -----
    // - A `GammaOutOfRange` error at index 3 with value 1.5.
    //
    // Expect
    // ------
    // - The message contains "3" and "1.5".
    fn model_data_error_gamma_out_of_range_includes_payload_in_display() {
        // Arrange
        let err = ModelDataError::GammaOutOfRange { index: 3, value: 1.5 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('3'), "message should embed the index.\nGot: {msg}");
        assert!(msg.contains("1.5"), "message should embed the value.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `FlagMismatch` embeds the row index in its message.
    //
    // Given
    // -----
    // - A `FlagMismatch` error at row 7.
    //
    // Expect
    // ------
    // - The message contains "7".
    fn model_data_error_flag_mismatch_includes_row_in_display() {
        // Arrange
        let err = ModelDataError::FlagMismatch { index: 7 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('7'), "message should embed the row index.\nGot: {msg}");
    }
}

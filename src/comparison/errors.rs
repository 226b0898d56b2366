//! comparison::errors — error types for the comparison reporter.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for the model-vs-direct
//! comparison. The only fatal condition at this level is calling the
//! comparison with a model class it does not support; statistical-test
//! failures bubble up wrapped, and missing MSE data is *not* an error
//! (the reporter degrades gracefully with an advisory note).
//!
//! Conventions
//! -----------
//! - Hand-rolled enum with `Display` and a `From` impl for the wrapped
//!   test errors, mirroring the crate's other error modules.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the wrong-class message wording relied on by callers.

use crate::model::ModelVariant;
use crate::statistical_tests::TestError;

pub type CompareResult<T> = Result<T, CompareError>;

/// CompareError — failures of the comparison reporter.
///
/// Variants
/// --------
/// - `NotFhModel`
///   The result object is not a Fay-Herriot fit. This is a programming
///   error at the call site; callers must not retry.
/// - `Test`
///   A statistical-test engine rejected its inputs (e.g. a zero combined
///   MSE weight slipped through an otherwise valid result object).
#[derive(Debug, Clone, PartialEq)]
pub enum CompareError {
    NotFhModel { variant: ModelVariant },
    Test(TestError),
}

impl std::error::Error for CompareError {}

impl std::fmt::Display for CompareError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompareError::NotFhModel { variant } => {
                write!(f, "Object needs to be of FH class; got '{variant}'.")
            }
            CompareError::Test(err) => write!(f, "Goodness-of-fit test failed: {err}"),
        }
    }
}

impl From<TestError> for CompareError {
    fn from(err: TestError) -> Self {
        CompareError::Test(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The wrong-class message wording and variant embedding.
    // - Wrapping of test errors.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Pin the wrong-class message: it must state the FH-class requirement
    // and name the offending variant.
    //
    // Given
    // -----
    // - A `NotFhModel` error for an EBP object.
    //
    // Expect
    // ------
    // - The message contains "FH class" and "ebp".
    fn compare_error_not_fh_model_names_requirement_and_variant() {
        // Arrange
        let err = CompareError::NotFhModel { variant: ModelVariant::Ebp };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("FH class"), "message should state the requirement.\nGot: {msg}");
        assert!(msg.contains("ebp"), "message should name the variant.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that test errors wrap with their original message preserved.
    //
    // Given
    // -----
    // - A `ZeroCombinedMse` test error at index 0.
    //
    // Expect
    // ------
    // - The wrapped Display contains the original message.
    fn compare_error_wraps_test_error_message() {
        // Arrange
        let err: CompareError = TestError::ZeroCombinedMse { index: 0 }.into();

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("index 0"), "wrapped message should survive.\nGot: {msg}");
    }
}

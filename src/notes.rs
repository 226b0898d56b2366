//! notes — structured advisory channel for the diagnostics.
//!
//! Purpose
//! -------
//! Carry the informational notices the diagnostics emit (MSE unavailable,
//! in-sample-only caveat, Shapiro-Wilk inapplicable) as structured values
//! instead of console output. Computation returns these; rendering them is
//! a separate, read-only Display pass. This keeps the core testable
//! without capturing stdout.
//!
//! Key behaviors
//! -------------
//! - [`DiagnosticNote`] enumerates every advisory condition with enough
//!   payload to render a meaningful message.
//! - [`SeriesKind`] names the residual-like series a note refers to.
//! - Notes are advisory only: they never change control flow and are
//!   never errors.
//!
//! Conventions
//! -----------
//! - Messages are phrased for end users of the diagnostics, not
//!   implementers; they state what is unavailable or restricted, not why
//!   internally.
//!
//! Downstream usage
//! ----------------
//! - `comparison::compare` and `summary::summarize` append notes to their
//!   outcome values; display layers iterate and print them verbatim.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the payload embedding of each rendered message.

/// SeriesKind — which residual-like series a note refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    PearsonResiduals,
    StdResiduals,
    RandomEffects,
}

impl std::fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesKind::PearsonResiduals => write!(f, "Pearson residuals"),
            SeriesKind::StdResiduals => write!(f, "standardized residuals"),
            SeriesKind::RandomEffects => write!(f, "random effects"),
        }
    }
}

/// DiagnosticNote — one advisory notice attached to an outcome.
///
/// Variants
/// --------
/// - `MseUnavailable`
///   The result object carries no MSE estimates; the goodness-of-fit test
///   is skipped.
/// - `InSampleOnly`
///   Out-of-sample domains exist; both comparison statistics cover
///   in-sample domains only.
/// - `ShapiroWilkSkipped`
///   The normality test is not available for the named series at the
///   given length (applicability guard or degenerate sample).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiagnosticNote {
    MseUnavailable,
    InSampleOnly { n_out: usize },
    ShapiroWilkSkipped { series: SeriesKind, n: usize },
}

impl std::fmt::Display for DiagnosticNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticNote::MseUnavailable => {
                write!(
                    f,
                    "MSE estimates are not available; the goodness-of-fit test is skipped."
                )
            }
            DiagnosticNote::InSampleOnly { n_out } => {
                write!(
                    f,
                    "Both statistics are computed on in-sample domains only ({n_out} out-of-sample domains excluded)."
                )
            }
            DiagnosticNote::ShapiroWilkSkipped { series, n } => {
                write!(
                    f,
                    "Shapiro-Wilk normality test is not available for {series} of length {n}."
                )
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
    // - Payload embedding in the rendered messages.
    //
    // They intentionally DO NOT cover:
    // - The conditions under which notes are emitted (tested with
    //   `comparison` and `summary`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that the in-sample-only note embeds the out-of-sample count.
    //
    // Given
    // -----
    // - An `InSampleOnly` note with 4 excluded domains.
    //
    // Expect
    // ------
    // - The message contains "4".
    fn diagnostic_note_in_sample_only_embeds_count() {
        // Arrange
        let note = DiagnosticNote::InSampleOnly { n_out: 4 };

        // Act
        let msg = note.to_string();

        // Assert
        assert!(msg.contains('4'), "message should embed the count.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that the Shapiro-Wilk note names the series and its length.
    //
    // Given
    // -----
    // - A `ShapiroWilkSkipped` note for random effects of length 3.
    //
    // Expect
    // ------
    // - The message contains "random effects" and "3".
    fn diagnostic_note_shapiro_wilk_skipped_names_series_and_length() {
        // Arrange
        let note = DiagnosticNote::ShapiroWilkSkipped { series: SeriesKind::RandomEffects, n: 3 };

        // Act
        let msg = note.to_string();

        // Assert
        assert!(msg.contains("random effects"), "message should name the series.\nGot: {msg}");
        assert!(msg.contains('3'), "message should embed the length.\nGot: {msg}");
    }
}

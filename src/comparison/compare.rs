//! comparison::compare — model-based vs. direct estimate comparison.
//!
//! Purpose
//! -------
//! Orchestrate the Brown goodness-of-fit test and the synthetic-part
//! extraction into a single comparison result for a fitted Fay-Herriot
//! model: how far the model estimates move away from the direct
//! estimates, and how strongly the purely regression-based part alone
//! tracks them.
//!
//! Key behaviors
//! -------------
//! - Reject non-FH result objects with a typed error; the comparison is
//!   defined for Fay-Herriot fits only.
//! - Degrade gracefully when MSE estimates are absent: the Brown outcome
//!   becomes `None` and an advisory note is attached (no error).
//! - Extract the synthetic part over in-sample domains and compute its
//!   Pearson correlation with the in-sample direct estimates.
//! - Attach an in-sample-only note whenever out-of-sample domains exist.
//!
//! Invariants & assumptions
//! ------------------------
//! - Both statistics cover in-sample domains only; out-of-sample rows
//!   never enter the computation.
//! - No side effects: the reporter returns structured notes rather than
//!   printing, and never mutates the result object.
//!
//! Downstream usage
//! ----------------
//! - Display layers read [`ComparisonOutcome`] fields and render them;
//!   nothing downstream recomputes a statistic.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the class guard, the MSE-absent degradation, note
//!   emission, and the correlation value on a hand-checked fixture; the
//!   integration tests run the full pipeline.

use crate::comparison::errors::{CompareError, CompareResult};
use crate::comparison::synthetic::synthetic_part;
use crate::model::{FitResult, ModelInternals};
use crate::notes::DiagnosticNote;
use crate::statistical_tests::BrownOutcome;
use ndarray::Array1;

/// ComparisonOutcome — result of comparing FH estimates to direct ones.
///
/// Purpose
/// -------
/// Hold the Brown test outcome (when MSE data allowed computing it), the
/// correlation between the synthetic part and the direct estimates, and
/// the advisory notes collected along the way. Immutable once built.
///
/// Fields
/// ------
/// - `brown`: `Option<BrownOutcome>`
///   `None` exactly when the result object carries no MSE estimates.
/// - `synthetic_correlation`: `Option<f64>`
///   Pearson correlation between the synthetic part and the in-sample
///   direct estimates; `None` when fewer than two in-sample domains make
///   a correlation undefined. Non-finite values (degenerate gamma
///   domains, zero variance) propagate as-is inside `Some`.
/// - `notes`: `Vec<DiagnosticNote>`
///   Structured advisory channel (MSE unavailable, in-sample-only).
///
/// Invariants
/// ----------
/// - Built only by [`compare`]; no mutation after construction.
#[derive(Debug, Clone)]
pub struct ComparisonOutcome {
    brown: Option<BrownOutcome>,
    synthetic_correlation: Option<f64>,
    notes: Vec<DiagnosticNote>,
}

impl ComparisonOutcome {
    /// Brown test outcome, when MSE estimates were available.
    pub fn brown(&self) -> Option<&BrownOutcome> {
        self.brown.as_ref()
    }

    /// Pearson correlation between the synthetic part and the in-sample
    /// direct estimates.
    pub fn synthetic_correlation(&self) -> Option<f64> {
        self.synthetic_correlation
    }

    /// Advisory notes attached while building the outcome.
    pub fn notes(&self) -> &[DiagnosticNote] {
        &self.notes
    }
}

impl std::fmt::Display for ComparisonOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Brown goodness-of-fit test")?;
        writeln!(
            f,
            "  Null hypothesis: model estimates do not differ significantly from direct estimates"
        )?;
        match &self.brown {
            Some(outcome) => writeln!(f, "  {outcome}")?,
            None => writeln!(f, "  not available")?,
        }
        writeln!(f)?;
        match self.synthetic_correlation {
            Some(r) => {
                writeln!(f, "Correlation between synthetic part and direct estimator: {r:.4}")?
            }
            None => writeln!(f, "Correlation between synthetic part and direct estimator: not available")?,
        }
        for note in &self.notes {
            writeln!(f, "Note: {note}")?;
        }
        Ok(())
    }
}

/// Compare the model-based estimates of a Fay-Herriot fit against the
/// direct estimates.
///
/// Parameters
/// ----------
/// - `fit`: `&FitResult`
///   A fitted result object of FH class. Other classes are a contract
///   violation at the call site.
///
/// Returns
/// -------
/// `CompareResult<ComparisonOutcome>`
///   - `Ok(ComparisonOutcome)` with:
///     - the Brown test over in-sample domains (`None` plus an advisory
///       note when no MSE estimates are present),
///     - the Pearson correlation between the synthetic part and the
///       in-sample direct estimates, and
///     - an in-sample-only note when out-of-sample domains exist.
///
/// Errors
/// ------
/// - `CompareError::NotFhModel`
///   Returned when the result object is not of FH class. Fatal; callers
///   must not retry.
/// - `CompareError::Test`
///   Returned when the Brown engine rejects its inputs (e.g. a zero
///   combined MSE weight).
///
/// Panics
/// ------
/// - Never panics on adapter-constructed inputs; alignment is upheld by
///   `FitResult`.
///
/// Examples
/// --------
/// - See the crate-level documentation and the integration tests for a
///   full fixture; the shape is
///   `compare(&fit)?.brown().map(|b| b.p_value())`.
pub fn compare(fit: &FitResult) -> CompareResult<ComparisonOutcome> {
    let internals = match fit.internals() {
        ModelInternals::Fh(internals) => internals,
        _ => return Err(CompareError::NotFhModel { variant: fit.variant() }),
    };

    let mut notes = Vec::new();
    let direct = fit.indicators().in_sample_direct();
    let model = fit.indicators().in_sample_model();

    let brown = match fit.mse() {
        Some(mse) => {
            let mse_direct = mse.in_sample_direct();
            let mse_model = mse.in_sample_model();
            Some(BrownOutcome::brown(
                &direct.to_vec(),
                &model.to_vec(),
                &mse_direct.to_vec(),
                &mse_model.to_vec(),
            )?)
        }
        None => {
            notes.push(DiagnosticNote::MseUnavailable);
            None
        }
    };

    let xb = synthetic_part(&model, &direct, internals);
    let synthetic_correlation =
        if direct.len() >= 2 { Some(pearson_correlation(&xb, &direct)) } else { None };

    let n_out = fit.indicators().n_out_of_sample();
    if n_out > 0 {
        notes.push(DiagnosticNote::InSampleOnly { n_out });
    }

    Ok(ComparisonOutcome { brown, synthetic_correlation, notes })
}

/// Pearson product-moment correlation of two aligned vectors.
///
/// Returns NaN when either vector has zero variance or carries non-finite
/// entries; such values propagate into the outcome unchanged.
fn pearson_correlation(x: &Array1<f64>, y: &Array1<f64>) -> f64 {
    let n = x.len() as f64;
    let mean_x = x.sum() / n;
    let mean_y = y.sum() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    cov / (var_x * var_y).sqrt()
}

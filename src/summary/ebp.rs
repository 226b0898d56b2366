//! summary::ebp — summary of an EBP (unit-level) result.
//!
//! Purpose
//! -------
//! Assemble the diagnostic summary of an empirical best prediction run:
//! sample/population bookkeeping, the transformation block, normality of
//! the population-level Pearson residuals and the random-intercept
//! estimates, the mixed-model R² decomposition, and the intraclass
//! correlation.
//!
//! Key behaviors
//! -------------
//! - Shapiro-Wilk applicability follows the unit-level policy
//!   [`SwGuard::AboveThree`]: vectors of length exactly 3 (or ≥ 5000) get
//!   "not available" entries plus an advisory note.
//! - The transformation block resolves by tag: `None` → no block, `Log` →
//!   shift parameter only, `BoxCox` → lambda and shift.
//!
//! Invariants & assumptions
//! ------------------------
//! - The internals vectors are validated at adapter construction; this
//!   module only reads them.
//!
//! Downstream usage
//! ----------------
//! - Built by `summary::summarize` for the `Ebp` variant; rendered by the
//!   Display impl without recomputation.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the transformation resolution per tag and the R²/ICC
//!   wiring; guard behavior is pinned in `summary::normality` and the
//!   integration tests.

use crate::model::{EbpInternals, FitResult, Transformation};
use crate::notes::{DiagnosticNote, SeriesKind};
use crate::summary::normality::{NormalitySummary, SwGuard};
use crate::summary::r_squared::{RSquared, icc, mixed_model_r_squared};

/// TransformationSummary — resolved transformation block of a unit-level
/// model.
///
/// `lambda` is present for Box-Cox only; `shift` is present for both
/// shifted transformations.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformationSummary {
    pub transformation: String,
    pub lambda: Option<f64>,
    pub shift: Option<f64>,
}

/// EbpSummary — diagnostic summary of an EBP result.
///
/// Fields
/// ------
/// - Sample/population bookkeeping from the framework.
/// - `transformation`: resolved block, `None` when no transformation was
///   applied.
/// - `residual_normality`, `random_effect_normality`: per-series blocks
///   (moment ratios always; Shapiro-Wilk under the unit-level guard).
/// - `r_squared`: marginal and conditional R².
/// - `icc`: intraclass correlation of the random intercept.
/// - `notes`: advisory channel collected while assembling the summary.
#[derive(Debug, Clone)]
pub struct EbpSummary {
    pub n_domains_sampled: usize,
    pub n_domains_unobserved: usize,
    pub n_units_sampled: usize,
    pub n_units_population: Option<usize>,
    pub transformation: Option<TransformationSummary>,
    pub residual_normality: NormalitySummary,
    pub random_effect_normality: NormalitySummary,
    pub r_squared: RSquared,
    pub icc: f64,
    pub notes: Vec<DiagnosticNote>,
}

impl std::fmt::Display for EbpSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "EBP model over {} sampled domains ({} unobserved), {} sampled units",
            self.n_domains_sampled, self.n_domains_unobserved, self.n_units_sampled
        )?;
        if let Some(n_pop) = self.n_units_population {
            writeln!(f, "Population units: {n_pop}")?;
        }
        match &self.transformation {
            Some(t) => {
                write!(f, "Transformation: {}", t.transformation)?;
                if let Some(lambda) = t.lambda {
                    write!(f, ", lambda = {lambda:.4}")?;
                }
                if let Some(shift) = t.shift {
                    write!(f, ", shift = {shift:.4}")?;
                }
                writeln!(f)?;
            }
            None => writeln!(f, "Transformation: none")?,
        }
        write_normality(f, "Pearson residuals", &self.residual_normality)?;
        write_normality(f, "Random effects", &self.random_effect_normality)?;
        writeln!(
            f,
            "Marginal R2: {:.4}, conditional R2: {:.4}, ICC: {:.4}",
            self.r_squared.marginal, self.r_squared.conditional, self.icc
        )?;
        for note in &self.notes {
            writeln!(f, "Note: {note}")?;
        }
        Ok(())
    }
}

/// Render one normality block row; shared with the FH summary.
pub(crate) fn write_normality(
    f: &mut std::fmt::Formatter<'_>, label: &str, block: &NormalitySummary,
) -> std::fmt::Result {
    write!(f, "{label}: skewness {:.4}, kurtosis {:.4}", block.skewness, block.kurtosis)?;
    match (block.sw_statistic, block.sw_p_value) {
        (Some(w), Some(p)) => writeln!(f, ", Shapiro-Wilk W = {w:.4} (p = {p:.4})"),
        _ => writeln!(f, ", Shapiro-Wilk not available"),
    }
}

/// Resolve the transformation block of a unit-level model by tag.
pub(crate) fn resolve_transformation(
    transformation: &Transformation,
) -> Option<TransformationSummary> {
    match *transformation {
        Transformation::None => None,
        Transformation::Log { shift } => Some(TransformationSummary {
            transformation: "log".to_string(),
            lambda: None,
            shift: Some(shift),
        }),
        Transformation::BoxCox { lambda, shift } => Some(TransformationSummary {
            transformation: "box-cox".to_string(),
            lambda: Some(lambda),
            shift: Some(shift),
        }),
    }
}

/// Assemble the EBP summary from a result object and its internals.
pub(crate) fn summarize_ebp(fit: &FitResult, internals: &EbpInternals) -> EbpSummary {
    let framework = fit.framework();
    let mut notes = Vec::new();

    let residual_normality = NormalitySummary::build(
        internals.pearson_residuals.as_slice().expect("owned arrays are contiguous"),
        SeriesKind::PearsonResiduals,
        SwGuard::AboveThree,
        &mut notes,
    );
    let random_effect_normality = NormalitySummary::build(
        internals.random_effects.as_slice().expect("owned arrays are contiguous"),
        SeriesKind::RandomEffects,
        SwGuard::AboveThree,
        &mut notes,
    );

    EbpSummary {
        n_domains_sampled: framework.n_domains_sampled(),
        n_domains_unobserved: framework.n_domains_unobserved(),
        n_units_sampled: framework.n_units_sampled(),
        n_units_population: framework.n_units_population(),
        transformation: resolve_transformation(&internals.transformation),
        residual_normality,
        random_effect_normality,
        r_squared: mixed_model_r_squared(
            internals.fixed_effects_variance,
            internals.random_intercept_variance,
            internals.residual_variance,
        ),
        icc: icc(internals.random_intercept_variance, internals.residual_variance),
        notes,
    }
}

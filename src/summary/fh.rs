//! summary::fh — summary of a Fay-Herriot (area-level) result.
//!
//! Purpose
//! -------
//! Assemble the diagnostic summary of a Fay-Herriot fit: domain
//! bookkeeping, normality of the standardized realized residuals and of
//! the random effects, the transformation/back-transformation labels, and
//! the raw model internals surfaced for downstream display (coefficient
//! table, variance component, correlation structure, robust tuning
//! constants, optional selection criteria).
//!
//! Key behaviors
//! -------------
//! - Shapiro-Wilk applicability follows the area-level policy
//!   [`SwGuard::FromThree`]: a vector of length exactly 3 IS tested. This
//!   is deliberately different from the unit-level policy and preserved
//!   as such.
//! - The back-transformation label translates the internal short code
//!   `"sm"` to the display label `"slud-maiti"`; other codes pass
//!   through.
//! - Internals are surfaced, never recomputed.
//!
//! Downstream usage
//! ----------------
//! - Built by `summary::summarize` for the `Fh` variant; rendered by the
//!   Display impl without recomputation.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the back-transformation translation and the
//!   transformation resolution; normality-guard behavior is pinned in
//!   `summary::normality` and the integration tests.

use crate::model::{
    Coefficient, FhInternals, FhTransformation, FitResult, SelectionCriteria,
};
use crate::notes::{DiagnosticNote, SeriesKind};
use crate::summary::ebp::write_normality;
use crate::summary::normality::{NormalitySummary, SwGuard};

/// FhTransformationSummary — resolved transformation block of an FH
/// model, with display-ready labels.
#[derive(Debug, Clone, PartialEq)]
pub struct FhTransformationSummary {
    pub transformation: String,
    pub backtransformation: String,
}

/// FhSummary — diagnostic summary of a Fay-Herriot result.
///
/// Fields
/// ------
/// - Domain bookkeeping from the framework.
/// - `residual_normality`, `random_effect_normality`: per-series blocks
///   (moment ratios always; Shapiro-Wilk under the area-level guard).
/// - `transformation`: resolved labels, `None` when the model was fitted
///   on the original scale.
/// - `coefficients`, `variance`, `correlation_structure`, `k_tuning`,
///   `c_tuning`, `selection_criteria`: raw internals surfaced for
///   display.
/// - `notes`: advisory channel collected while assembling the summary.
#[derive(Debug, Clone)]
pub struct FhSummary {
    pub n_domains_sampled: usize,
    pub n_domains_unobserved: usize,
    pub residual_normality: NormalitySummary,
    pub random_effect_normality: NormalitySummary,
    pub transformation: Option<FhTransformationSummary>,
    pub coefficients: Vec<Coefficient>,
    pub variance: f64,
    pub correlation_structure: String,
    pub k_tuning: Option<f64>,
    pub c_tuning: Option<f64>,
    pub selection_criteria: Option<SelectionCriteria>,
    pub notes: Vec<DiagnosticNote>,
}

impl std::fmt::Display for FhSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Fay-Herriot model over {} in-sample domains ({} out-of-sample)",
            self.n_domains_sampled, self.n_domains_unobserved
        )?;
        write_normality(f, "Standardized residuals", &self.residual_normality)?;
        write_normality(f, "Random effects", &self.random_effect_normality)?;
        match &self.transformation {
            Some(t) => writeln!(
                f,
                "Transformation: {} (back-transformation: {})",
                t.transformation, t.backtransformation
            )?,
            None => writeln!(f, "Transformation: none")?,
        }
        writeln!(
            f,
            "Random-effect variance: {:.4} (correlation: {})",
            self.variance, self.correlation_structure
        )?;
        if let (Some(k), Some(c)) = (self.k_tuning, self.c_tuning) {
            writeln!(f, "Robust tuning constants: k = {k:.2}, c = {c:.2}")?;
        }
        if !self.coefficients.is_empty() {
            writeln!(f, "Coefficients:")?;
            for coef in &self.coefficients {
                writeln!(
                    f,
                    "  {}: {:.4} (se {:.4}, t {:.3}, p {:.4})",
                    coef.name, coef.estimate, coef.std_error, coef.t_value, coef.p_value
                )?;
            }
        }
        if let Some(criteria) = &self.selection_criteria {
            writeln!(
                f,
                "Selection criteria: loglike {:.2}, AIC {:.2}, BIC {:.2}, KIC {:.2}",
                criteria.log_likelihood, criteria.aic, criteria.bic, criteria.kic
            )?;
        }
        for note in &self.notes {
            writeln!(f, "Note: {note}")?;
        }
        Ok(())
    }
}

/// Resolve the FH transformation metadata into display-ready labels,
/// translating the internal short code `"sm"` to `"slud-maiti"`.
pub(crate) fn resolve_fh_transformation(
    transformation: &FhTransformation,
) -> Option<FhTransformationSummary> {
    match transformation {
        FhTransformation::None => None,
        FhTransformation::Applied { transformation, backtransformation } => {
            let backtransformation = match backtransformation.as_str() {
                "sm" => "slud-maiti".to_string(),
                other => other.to_string(),
            };
            Some(FhTransformationSummary {
                transformation: transformation.clone(),
                backtransformation,
            })
        }
    }
}

/// Assemble the FH summary from a result object and its internals.
pub(crate) fn summarize_fh(fit: &FitResult, internals: &FhInternals) -> FhSummary {
    let framework = fit.framework();
    let mut notes = Vec::new();

    let residual_normality = NormalitySummary::build(
        internals.std_residuals.as_slice().expect("owned arrays are contiguous"),
        SeriesKind::StdResiduals,
        SwGuard::FromThree,
        &mut notes,
    );
    let random_effect_normality = NormalitySummary::build(
        internals.random_effects.as_slice().expect("owned arrays are contiguous"),
        SeriesKind::RandomEffects,
        SwGuard::FromThree,
        &mut notes,
    );

    FhSummary {
        n_domains_sampled: fit.indicators().n_in_sample(),
        n_domains_unobserved: fit.indicators().n_out_of_sample(),
        residual_normality,
        random_effect_normality,
        transformation: resolve_fh_transformation(&internals.transformation),
        coefficients: internals.coefficients.clone(),
        variance: internals.variance,
        correlation_structure: internals.correlation_structure.clone(),
        k_tuning: internals.k_tuning,
        c_tuning: internals.c_tuning,
        selection_criteria: internals.selection_criteria,
        notes,
    }
}

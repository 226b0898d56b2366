//! model::internals — variant-specific internals of a fitted model.
//!
//! Purpose
//! -------
//! Carry the model internals a fitted small-area model exposes for
//! diagnostics: shrinkage weights, random effects, residual vectors,
//! coefficient tables, variance components, and transformation metadata.
//! Each model class has its own payload; a closed enum ties them together
//! so dispatch is an exhaustive `match` rather than dynamic inspection.
//!
//! Key behaviors
//! -------------
//! - [`FhInternals`] holds the Fay-Herriot internals: optional per-domain
//!   gamma weights (their presence is fixed at fit time and selects the
//!   synthetic-part formula), random effects, standardized realized
//!   residuals, coefficients, the random-effect variance component, the
//!   correlation structure, robust tuning constants, optional
//!   model-selection criteria, and transformation metadata.
//! - [`EbpInternals`] holds the unit-level mixed-model internals:
//!   population-level Pearson residuals, random-intercept estimates, the
//!   three variance components of the R² decomposition, and the
//!   transformation tag with its parameters.
//! - Validating constructors reject non-finite residuals, out-of-range
//!   shrinkage weights, and negative variance components once, up front.
//!
//! Invariants & assumptions
//! ------------------------
//! - `gamma` entries lie in the closed interval [0, 1]. A weight of
//!   exactly 1 is a degenerate domain: it is accepted here and produces a
//!   non-finite synthetic-part entry downstream by design.
//! - Residual and random-effect vectors are finite and non-empty.
//! - Whether `gamma` is present never changes after construction; it is a
//!   model-configuration fact, not a per-call decision.
//!
//! Conventions
//! -----------
//! - These are read-only data carriers with public fields; alignment with
//!   the estimate tables is enforced by the `FitResult` constructors.
//!
//! Testing notes
//! -------------
//! - Unit tests cover constructor validation (gamma range, non-finite
//!   residuals, negative variances) and transformation tag accessors.

use crate::model::errors::{ModelDataError, ModelResult};
use ndarray::Array1;

/// Transformation applied to the dependent variable of a unit-level model.
///
/// `Log` carries the shift parameter only; `BoxCox` additionally carries
/// the estimated optimal lambda.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transformation {
    None,
    Log { shift: f64 },
    BoxCox { lambda: f64, shift: f64 },
}

/// Transformation metadata of an area-level (FH) model: the transformation
/// name and the back-transformation code as reported by the fitter
/// (e.g. `"log"` with back-transformation `"bc"` or `"sm"`).
#[derive(Debug, Clone, PartialEq)]
pub enum FhTransformation {
    None,
    Applied { transformation: String, backtransformation: String },
}

/// One row of the fixed-effects coefficient table.
#[derive(Debug, Clone, PartialEq)]
pub struct Coefficient {
    pub name: String,
    pub estimate: f64,
    pub std_error: f64,
    pub t_value: f64,
    pub p_value: f64,
}

/// Information criteria of the variance/model selection step, surfaced for
/// display only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionCriteria {
    pub log_likelihood: f64,
    pub aic: f64,
    pub bic: f64,
    pub kic: f64,
}

/// FhInternals — internals of a fitted Fay-Herriot model.
///
/// Purpose
/// -------
/// Expose the pieces of an area-level FH fit that the diagnostics read:
/// the shrinkage weights (when the model has a multiplicative variance
/// factor), the random-effect and residual vectors, and the display-bound
/// model internals.
///
/// Fields
/// ------
/// - `gamma`: `Option<Array1<f64>>`
///   Per-in-sample-domain shrinkage weights in [0, 1]; `None` for models
///   with additive random effects only. Fixed at fit time.
/// - `random_effects`: `Array1<f64>`
///   Estimated random effects, one per in-sample domain.
/// - `std_residuals`: `Array1<f64>`
///   Standardized realized residuals, one per in-sample domain.
/// - `coefficients`: `Vec<Coefficient>`
///   Fixed-effects coefficient table.
/// - `variance`: `f64`
///   Estimated random-effect variance component.
/// - `correlation_structure`: `String`
///   Correlation structure label of the random effects (e.g.
///   "independent", "spatial").
/// - `k_tuning`, `c_tuning`: `Option<f64>`
///   Tuning constants of robust fitting variants; `None` otherwise.
/// - `selection_criteria`: `Option<SelectionCriteria>`
///   Information criteria when the fitter reported them.
/// - `transformation`: `FhTransformation`
///   Transformation/back-transformation metadata.
///
/// Invariants
/// ----------
/// - `gamma` (when present) aligns with `random_effects` and
///   `std_residuals` in length; all three are per-in-sample-domain.
/// - All vector entries are finite; gamma entries lie in [0, 1].
/// - `variance` is finite and non-negative.
#[derive(Debug, Clone)]
pub struct FhInternals {
    pub gamma: Option<Array1<f64>>,
    pub random_effects: Array1<f64>,
    pub std_residuals: Array1<f64>,
    pub coefficients: Vec<Coefficient>,
    pub variance: f64,
    pub correlation_structure: String,
    pub k_tuning: Option<f64>,
    pub c_tuning: Option<f64>,
    pub selection_criteria: Option<SelectionCriteria>,
    pub transformation: FhTransformation,
}

impl FhInternals {
    /// Validate and assemble FH internals.
    ///
    /// Parameters
    /// ----------
    /// See the field documentation on [`FhInternals`]; alignment with the
    /// estimate tables is checked later by the `FitResult` constructor.
    ///
    /// Returns
    /// -------
    /// `ModelResult<FhInternals>`
    ///   - `Ok` when all vectors are finite, gamma weights lie in [0, 1],
    ///     gamma aligns with the random effects, and the variance
    ///     component is finite and non-negative.
    ///
    /// Errors
    /// ------
    /// - `ModelDataError::NonFiniteValue` for NaN/±∞ in any vector.
    /// - `ModelDataError::GammaOutOfRange` for weights outside [0, 1]
    ///   (exactly 1 is allowed: the degenerate-domain case).
    /// - `ModelDataError::LengthMismatch` when gamma and the random
    ///   effects disagree in length.
    /// - `ModelDataError::InvalidVariance` for a negative or non-finite
    ///   variance component.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        gamma: Option<Array1<f64>>, random_effects: Array1<f64>, std_residuals: Array1<f64>,
        coefficients: Vec<Coefficient>, variance: f64, correlation_structure: String,
        k_tuning: Option<f64>, c_tuning: Option<f64>,
        selection_criteria: Option<SelectionCriteria>, transformation: FhTransformation,
    ) -> ModelResult<Self> {
        validate_finite("random effects", &random_effects)?;
        validate_finite("standardized residuals", &std_residuals)?;

        if let Some(gamma) = &gamma {
            if gamma.len() != random_effects.len() {
                return Err(ModelDataError::LengthMismatch {
                    table: "gamma",
                    expected: random_effects.len(),
                    actual: gamma.len(),
                });
            }
            for (index, &value) in gamma.iter().enumerate() {
                if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                    return Err(ModelDataError::GammaOutOfRange { index, value });
                }
            }
        }

        if !variance.is_finite() || variance < 0.0 {
            return Err(ModelDataError::InvalidVariance { name: "random-effect variance", value: variance });
        }

        Ok(FhInternals {
            gamma,
            random_effects,
            std_residuals,
            coefficients,
            variance,
            correlation_structure,
            k_tuning,
            c_tuning,
            selection_criteria,
            transformation,
        })
    }
}

/// EbpInternals — internals of a fitted unit-level EBP model.
///
/// Purpose
/// -------
/// Expose the pieces of the underlying linear mixed model that the
/// diagnostics read: population-level Pearson residuals, random-intercept
/// estimates, the variance components of the R² decomposition, and the
/// transformation metadata.
///
/// Fields
/// ------
/// - `pearson_residuals`: `Array1<f64>`
///   Pearson-type residuals at population level.
/// - `random_effects`: `Array1<f64>`
///   Random-intercept estimates, one per in-sample domain.
/// - `fixed_effects_variance`: `f64`
///   Variance of the fixed-part linear predictor (Xβ̂).
/// - `random_intercept_variance`: `f64`
///   Variance component of the random intercept.
/// - `residual_variance`: `f64`
///   Residual variance component.
/// - `transformation`: `Transformation`
///   Transformation tag with its parameters.
///
/// Invariants
/// ----------
/// - Residual and random-effect vectors are finite and non-empty.
/// - All three variance components are finite and non-negative.
#[derive(Debug, Clone)]
pub struct EbpInternals {
    pub pearson_residuals: Array1<f64>,
    pub random_effects: Array1<f64>,
    pub fixed_effects_variance: f64,
    pub random_intercept_variance: f64,
    pub residual_variance: f64,
    pub transformation: Transformation,
}

impl EbpInternals {
    /// Validate and assemble EBP internals.
    ///
    /// Returns
    /// -------
    /// `ModelResult<EbpInternals>`
    ///   - `Ok` when both vectors are finite and all variance components
    ///     are finite and non-negative.
    ///
    /// Errors
    /// ------
    /// - `ModelDataError::NonFiniteValue` for NaN/±∞ in either vector.
    /// - `ModelDataError::InvalidVariance` for a negative or non-finite
    ///   variance component.
    pub fn new(
        pearson_residuals: Array1<f64>, random_effects: Array1<f64>, fixed_effects_variance: f64,
        random_intercept_variance: f64, residual_variance: f64, transformation: Transformation,
    ) -> ModelResult<Self> {
        validate_finite("pearson residuals", &pearson_residuals)?;
        validate_finite("random effects", &random_effects)?;
        for (name, value) in [
            ("fixed-effects variance", fixed_effects_variance),
            ("random-intercept variance", random_intercept_variance),
            ("residual variance", residual_variance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ModelDataError::InvalidVariance { name, value });
            }
        }

        Ok(EbpInternals {
            pearson_residuals,
            random_effects,
            fixed_effects_variance,
            random_intercept_variance,
            residual_variance,
            transformation,
        })
    }
}

/// ModelInternals — closed union of per-model-class internals.
///
/// The diagnostics dispatch on this enum with exhaustive `match` arms;
/// there is no open-ended class inspection anywhere downstream.
#[derive(Debug, Clone)]
pub enum ModelInternals {
    Direct,
    Ebp(EbpInternals),
    Fh(FhInternals),
}

/// Reject NaN/±∞ entries in a residual-like vector.
fn validate_finite(series: &'static str, data: &Array1<f64>) -> ModelResult<()> {
    for (index, &value) in data.iter().enumerate() {
        if !value.is_finite() {
            return Err(ModelDataError::NonFiniteValue { series, index, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn plain_fh(gamma: Option<Array1<f64>>) -> ModelResult<FhInternals> {
        FhInternals::new(
            gamma,
            array![0.1, -0.2],
            array![0.5, -0.5],
            Vec::new(),
            1.0,
            "independent".to_string(),
            None,
            None,
            None,
            FhTransformation::None,
        )
    }

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Constructor validation of FH internals: gamma range (including the
    //   accepted degenerate weight 1.0), gamma alignment, and variance
    //   positivity.
    // - Constructor validation of EBP internals: finiteness and variance
    //   positivity.
    //
    // They intentionally DO NOT cover:
    // - Alignment with estimate tables (enforced and tested in
    //   `model::fit`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that gamma weights inside [0, 1] — including exactly 1 —
    // are accepted, while weights outside the interval are rejected.
    //
    // Given
    // -----
    // - Gamma vectors [0.0, 1.0] (boundary values) and [0.5, 1.5].
    //
    // Expect
    // ------
    // - The boundary vector constructs; 1.5 yields `GammaOutOfRange` with
    //   index 1.
    fn fh_internals_gamma_boundaries_accepted_outside_rejected() {
        // Act & Assert: boundary values accepted (1.0 is the degenerate
        // domain that later propagates a non-finite synthetic part).
        assert!(plain_fh(Some(array![0.0, 1.0])).is_ok());

        // Act & Assert: out-of-range value rejected
        match plain_fh(Some(array![0.5, 1.5])) {
            Err(ModelDataError::GammaOutOfRange { index, value }) => {
                assert_eq!(index, 1);
                assert_eq!(value, 1.5);
            }
            other => panic!("expected GammaOutOfRange, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure gamma must align with the random-effect vector.
    //
    // Given
    // -----
    // - A gamma vector of length 3 against random effects of length 2.
    //
    // Expect
    // ------
    // - `LengthMismatch` naming the gamma container.
    fn fh_internals_misaligned_gamma_returns_length_mismatch() {
        // Act
        let result = plain_fh(Some(array![0.1, 0.2, 0.3]));

        // Assert
        match result {
            Err(ModelDataError::LengthMismatch { table, expected, actual }) => {
                assert_eq!(table, "gamma");
                assert_eq!(expected, 2);
                assert_eq!(actual, 3);
            }
            other => panic!("expected LengthMismatch, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure a negative variance component is rejected for both model
    // classes.
    //
    // Given
    // -----
    // - FH internals with variance −1; EBP internals with a negative
    //   residual variance.
    //
    // Expect
    // ------
    // - `InvalidVariance` in both cases.
    fn internals_negative_variance_returns_invalid_variance() {
        // Act & Assert: FH
        let fh = FhInternals::new(
            None,
            array![0.1],
            array![0.2],
            Vec::new(),
            -1.0,
            "independent".to_string(),
            None,
            None,
            None,
            FhTransformation::None,
        );
        assert!(matches!(fh, Err(ModelDataError::InvalidVariance { .. })));

        // Act & Assert: EBP
        let ebp = EbpInternals::new(
            array![0.1, 0.2],
            array![0.3],
            1.0,
            0.5,
            -0.1,
            Transformation::None,
        );
        match ebp {
            Err(ModelDataError::InvalidVariance { name, .. }) => {
                assert_eq!(name, "residual variance");
            }
            other => panic!("expected InvalidVariance, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure non-finite residuals are rejected with the offending index.
    //
    // Given
    // -----
    // - EBP Pearson residuals containing NaN at index 1.
    //
    // Expect
    // ------
    // - `NonFiniteValue` naming the series and index.
    fn ebp_internals_non_finite_residual_returns_non_finite_value() {
        // Act
        let result = EbpInternals::new(
            array![0.1, f64::NAN],
            array![0.3],
            1.0,
            0.5,
            0.1,
            Transformation::None,
        );

        // Assert
        match result {
            Err(ModelDataError::NonFiniteValue { series, index, .. }) => {
                assert_eq!(series, "pearson residuals");
                assert_eq!(index, 1);
            }
            other => panic!("expected NonFiniteValue, got {other:?}"),
        }
    }
}

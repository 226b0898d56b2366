//! summary::r_squared — mixed-model R² decomposition and ICC.
//!
//! Purpose
//! -------
//! Provide the coefficient-of-determination decomposition for linear
//! mixed models and the intraclass correlation as pure functions of
//! explicit variance components. Nothing here reads a model object;
//! callers pass the three variances and receive scalars back.
//!
//! Key behaviors
//! -------------
//! - Marginal R²: share of total variance explained by the fixed effects,
//!   `varF / (varF + varU + varE)`.
//! - Conditional R²: share explained by fixed and random effects
//!   together, `(varF + varU) / (varF + varU + varE)`.
//! - ICC: share of the random-plus-residual variance attributable to the
//!   random intercept, `varU / (varU + varE)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite and non-negative (enforced upstream by the
//!   internals constructors); all-zero components yield NaN (0/0), which
//!   propagates unchanged.
//! - `marginal ≤ conditional` always holds for valid inputs.
//!
//! Downstream usage
//! ----------------
//! - `summary::ebp` computes both statistics from the EBP internals'
//!   variance components.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the identities on hand-picked components and the
//!   ordering `marginal ≤ conditional`.

/// RSquared — marginal and conditional coefficients of determination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RSquared {
    pub marginal: f64,
    pub conditional: f64,
}

/// Compute the marginal and conditional R² of a linear mixed model from
/// its variance components.
///
/// Parameters
/// ----------
/// - `fixed_effects_variance`: `f64`
///   Variance of the fixed-part linear predictor (Xβ̂).
/// - `random_intercept_variance`: `f64`
///   Variance component of the random intercept.
/// - `residual_variance`: `f64`
///   Residual variance component.
///
/// Returns
/// -------
/// `RSquared`
///   - `marginal = varF / (varF + varU + varE)`.
///   - `conditional = (varF + varU) / (varF + varU + varE)`.
///
/// Examples
/// --------
/// ```rust
/// use sae_diagnostics::summary::mixed_model_r_squared;
///
/// let r2 = mixed_model_r_squared(3.0, 1.0, 1.0);
/// assert!((r2.marginal - 0.6).abs() < 1e-12);
/// assert!((r2.conditional - 0.8).abs() < 1e-12);
/// ```
pub fn mixed_model_r_squared(
    fixed_effects_variance: f64, random_intercept_variance: f64, residual_variance: f64,
) -> RSquared {
    let total = fixed_effects_variance + random_intercept_variance + residual_variance;
    RSquared {
        marginal: fixed_effects_variance / total,
        conditional: (fixed_effects_variance + random_intercept_variance) / total,
    }
}

/// Compute the intraclass correlation from explicit variance components.
///
/// Parameters
/// ----------
/// - `random_intercept_variance`: `f64`
///   Variance component of the random intercept.
/// - `residual_variance`: `f64`
///   Residual variance component.
///
/// Returns
/// -------
/// `f64`
///   `varU / (varU + varE)`: the share of (random + residual) variance
///   attributable to the random intercept.
///
/// Examples
/// --------
/// ```rust
/// use sae_diagnostics::summary::icc;
///
/// assert!((icc(1.0, 3.0) - 0.25).abs() < 1e-12);
/// ```
pub fn icc(random_intercept_variance: f64, residual_variance: f64) -> f64 {
    random_intercept_variance / (random_intercept_variance + residual_variance)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The decomposition identities on fixed component values.
    // - The ordering marginal ≤ conditional.
    // - Degenerate all-zero components (NaN propagation).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Pin both R² values and the ICC on hand-picked components.
    //
    // Given
    // -----
    // - varF = 6, varU = 2, varE = 2 (total 10).
    //
    // Expect
    // ------
    // - marginal = 0.6, conditional = 0.8, icc = 0.5.
    fn r_squared_and_icc_match_hand_computation() {
        // Act
        let r2 = mixed_model_r_squared(6.0, 2.0, 2.0);

        // Assert
        assert!((r2.marginal - 0.6).abs() < 1e-12);
        assert!((r2.conditional - 0.8).abs() < 1e-12);
        assert!((icc(2.0, 2.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify the ordering marginal ≤ conditional across a small grid of
    // component values.
    //
    // Given
    // -----
    // - Components from a 3×3×3 positive grid.
    //
    // Expect
    // ------
    // - conditional − marginal ≥ 0 everywhere.
    fn r_squared_marginal_never_exceeds_conditional() {
        for &var_f in &[0.1, 1.0, 10.0] {
            for &var_u in &[0.1, 1.0, 10.0] {
                for &var_e in &[0.1, 1.0, 10.0] {
                    let r2 = mixed_model_r_squared(var_f, var_u, var_e);
                    assert!(
                        r2.conditional >= r2.marginal,
                        "ordering violated at ({var_f}, {var_u}, {var_e})"
                    );
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Pin NaN propagation for all-zero variance components.
    //
    // Given
    // -----
    // - All components zero.
    //
    // Expect
    // ------
    // - Both R² values and the ICC are NaN (0/0), not an error.
    fn r_squared_all_zero_components_propagate_nan() {
        // Act
        let r2 = mixed_model_r_squared(0.0, 0.0, 0.0);

        // Assert
        assert!(r2.marginal.is_nan());
        assert!(r2.conditional.is_nan());
        assert!(icc(0.0, 0.0).is_nan());
    }
}

//! comparison::synthetic — synthetic-part extraction for FH predictors.
//!
//! Purpose
//! -------
//! Back-calculate the purely regression-based (synthetic) component of the
//! Fay-Herriot predictor from the weighted point estimates. The FH
//! predictor blends the direct estimate and the regression prediction via
//! the shrinkage identity `m = γ·d + (1 − γ)·Xβ̂`; inverting it recovers
//! `Xβ̂` for models that carry gamma weights. Models with additive random
//! effects only recover the synthetic part by subtracting the estimated
//! random effect instead.
//!
//! Key behaviors
//! -------------
//! - Weighted branch (gamma present): `xbᵢ = (mᵢ − γᵢ·dᵢ) / (1 − γᵢ)`.
//! - Additive branch (gamma absent): `xbᵢ = mᵢ − uᵢ` elementwise.
//! - Exactly one branch executes; selection is by presence of the gamma
//!   weights on the model, a configuration fixed at fit time.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are the in-sample slices, aligned per domain (upheld by
//!   `FitResult` construction).
//! - A gamma weight of exactly 1 makes the weighted branch divide by
//!   zero and produce a non-finite entry. This degenerate-domain case is
//!   deliberately propagated unchanged, not patched over.
//!
//! Downstream usage
//! ----------------
//! - `comparison::compare` correlates the returned vector with the
//!   in-sample direct estimates.
//!
//! Testing notes
//! -------------
//! - Unit tests pin both branches on hand-computed values, the shrinkage
//!   round trip, and the non-finite propagation at γ = 1.

use crate::model::FhInternals;
use ndarray::Array1;

/// Back-calculate the synthetic (regression-only) part of the FH
/// predictor over in-sample domains.
///
/// Parameters
/// ----------
/// - `model`: `&Array1<f64>`
///   In-sample FH point estimates {mᵢ}.
/// - `direct`: `&Array1<f64>`
///   In-sample direct estimates {dᵢ}, aligned with `model`.
/// - `internals`: `&FhInternals`
///   The fitted model's internals; the presence of `gamma` selects the
///   branch, and the additive branch reads the random-effect estimates.
///
/// Returns
/// -------
/// `Array1<f64>`
///   The synthetic part {xbᵢ}, aligned with the in-sample domains. An
///   entry is non-finite exactly when its gamma weight is 1 (degenerate
///   domain); such values propagate into downstream statistics unchanged.
///
/// Panics
/// ------
/// - Panics if the input lengths disagree. `FitResult` construction
///   guarantees alignment, so this indicates a caller bypassing the
///   adapter.
///
/// Examples
/// --------
/// ```rust
/// use ndarray::array;
/// use sae_diagnostics::comparison::synthetic_part;
/// use sae_diagnostics::model::{FhInternals, FhTransformation};
///
/// let internals = FhInternals::new(
///     Some(array![0.5, 0.5]),
///     array![0.0, 0.0],
///     array![0.0, 0.0],
///     Vec::new(),
///     1.0,
///     "independent".to_string(),
///     None,
///     None,
///     None,
///     FhTransformation::None,
/// )
/// .unwrap();
///
/// let xb = synthetic_part(&array![11.0, 19.0], &array![10.0, 20.0], &internals);
/// assert_eq!(xb, array![12.0, 18.0]);
/// ```
pub fn synthetic_part(
    model: &Array1<f64>, direct: &Array1<f64>, internals: &FhInternals,
) -> Array1<f64> {
    assert_eq!(model.len(), direct.len(), "estimate columns must align per domain");

    match &internals.gamma {
        Some(gamma) => {
            assert_eq!(gamma.len(), model.len(), "gamma must align per domain");
            Array1::from_iter(
                model
                    .iter()
                    .zip(direct)
                    .zip(gamma)
                    .map(|((&m, &d), &g)| (m - g * d) / (1.0 - g)),
            )
        }
        None => model - &internals.random_effects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FhTransformation;
    use ndarray::array;

    fn internals(gamma: Option<Array1<f64>>, random_effects: Array1<f64>) -> FhInternals {
        let n = random_effects.len();
        FhInternals::new(
            gamma,
            random_effects,
            Array1::zeros(n),
            Vec::new(),
            1.0,
            "independent".to_string(),
            None,
            None,
            None,
            FhTransformation::None,
        )
        .expect("well-formed FH internals")
    }

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The weighted branch on hand-computed values and its round trip
    //   through the shrinkage identity.
    // - The additive branch.
    // - Non-finite propagation at γ = 1.
    //
    // They intentionally DO NOT cover:
    // - Correlation with the direct estimates (comparison reporter).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Pin the weighted branch on the canonical two-domain scenario.
    //
    // Given
    // -----
    // - gamma = [0.5, 0.5], direct = [10, 20], model = [11, 19].
    //
    // Expect
    // ------
    // - xb = [(11 − 5)/0.5, (19 − 10)/0.5] = [12, 18].
    fn synthetic_part_weighted_branch_matches_hand_computation() {
        // Arrange
        let internals = internals(Some(array![0.5, 0.5]), array![0.0, 0.0]);

        // Act
        let xb = synthetic_part(&array![11.0, 19.0], &array![10.0, 20.0], &internals);

        // Assert
        assert_eq!(xb, array![12.0, 18.0]);
    }

    #[test]
    // Purpose
    // -------
    // Verify the shrinkage round trip: re-blending the synthetic part
    // with the direct estimates recovers the model estimates.
    //
    // Given
    // -----
    // - Gamma weights strictly inside (0, 1) with uneven values.
    //
    // Expect
    // ------
    // - γᵢ·dᵢ + (1 − γᵢ)·xbᵢ equals mᵢ within 1e-9 relative tolerance.
    fn synthetic_part_round_trip_recovers_model_estimates() {
        // Arrange
        let gamma = array![0.1, 0.42, 0.9, 0.63];
        let direct = array![10.0, -3.0, 250.0, 7.5];
        let model = array![11.5, -2.2, 248.0, 7.9];
        let internals = internals(Some(gamma.clone()), Array1::zeros(4));

        // Act
        let xb = synthetic_part(&model, &direct, &internals);

        // Assert
        for i in 0..model.len() {
            let rebuilt = gamma[i] * direct[i] + (1.0 - gamma[i]) * xb[i];
            let rel = (rebuilt - model[i]).abs() / model[i].abs();
            assert!(rel < 1e-9, "round trip off at {i}: rebuilt {rebuilt}, expected {}", model[i]);
        }
    }

    #[test]
    // Purpose
    // -------
    // Pin the additive branch: subtracting the random effects from the
    // model estimates.
    //
    // Given
    // -----
    // - model = [5, 7], random effects = [1, −2], no gamma.
    //
    // Expect
    // ------
    // - xb = [4, 9].
    fn synthetic_part_additive_branch_subtracts_random_effects() {
        // Arrange
        let internals = internals(None, array![1.0, -2.0]);

        // Act
        let xb = synthetic_part(&array![5.0, 7.0], &array![4.8, 7.3], &internals);

        // Assert
        assert_eq!(xb, array![4.0, 9.0]);
    }

    #[test]
    // Purpose
    // -------
    // Verify the degenerate-domain behavior: γ = 1 divides by zero and
    // the non-finite entry propagates unchanged.
    //
    // Given
    // -----
    // - gamma = [1.0, 0.5] with distinct model/direct values at index 0.
    //
    // Expect
    // ------
    // - xb[0] is non-finite; xb[1] is the usual weighted value.
    fn synthetic_part_gamma_of_one_propagates_non_finite() {
        // Arrange
        let internals = internals(Some(array![1.0, 0.5]), array![0.0, 0.0]);

        // Act
        let xb = synthetic_part(&array![11.0, 19.0], &array![10.0, 20.0], &internals);

        // Assert
        assert!(!xb[0].is_finite(), "γ = 1 should produce a non-finite entry, got {}", xb[0]);
        assert_eq!(xb[1], 18.0);
    }
}

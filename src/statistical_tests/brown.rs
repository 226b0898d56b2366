//! statistical_tests::brown — Brown goodness-of-fit test for FH estimates.
//!
//! Purpose
//! -------
//! Implement the Brown et al. (2001) goodness-of-fit test comparing
//! model-based Fay-Herriot point estimates against direct estimates under
//! heteroskedastic variance. Produces a weighted chi-square statistic, its
//! degrees of freedom, and a p-value.
//!
//! Key behaviors
//! -------------
//! - Compute `W = Σ (dᵢ − mᵢ)² / (mseDᵢ + mseMᵢ)` over in-sample domains,
//!   with the inverse-variance weight as the only weighting.
//! - Set the degrees of freedom to the number of in-sample domains and
//!   evaluate `p = 1 − CDF_chisq(W; df)`.
//! - Expose a compact [`BrownOutcome`] value with the statistic, degrees of
//!   freedom, and p-value, suitable for both Rust and Python bindings.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are the in-sample slices only; the caller (the comparison
//!   reporter) is responsible for filtering out-of-sample domains and for
//!   degrading gracefully when MSE estimates are absent altogether.
//! - All four input series must share one common length n ≥ 1 and be
//!   finite; the combined weight `mseDᵢ + mseMᵢ` must be nonzero at every
//!   domain.
//!
//! Conventions
//! -----------
//! - Error handling uses the subtree's [`TestError`] type and the result
//!   alias [`TestResult<T>`].
//! - The chi-square CDF comes from `statrs`; the upper tail is evaluated
//!   as `1 − cdf(W)`. For very large W this difference cancels
//!   catastrophically and the p-value flushes to exactly 0 earlier than a
//!   dedicated survival-function evaluation would. This matches the
//!   long-standing reference behavior of the test and is kept as-is so
//!   that reported digits stay comparable across implementations.
//!
//! Downstream usage
//! ----------------
//! - `comparison::compare` runs this engine when MSE estimates are present
//!   and stores the outcome next to the synthetic-part correlation.
//! - The outcome's accessors feed the display layer; nothing downstream
//!   recomputes the statistic.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the statistic and p-value on a hand-computed scenario,
//!   check the degrees-of-freedom contract, and exercise all validation
//!   branches (length mismatches, non-finite values, zero weights).

use crate::statistical_tests::errors::{TestError, TestResult};
use crate::statistical_tests::validation::{validate_aligned, validate_series};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// BrownOutcome — outcome of the Brown goodness-of-fit test.
///
/// Purpose
/// -------
/// Represent the outcome of a single Brown test: the weighted chi-square
/// statistic, its degrees of freedom, and the upper-tail p-value under the
/// null hypothesis that the model-based estimates do not differ
/// significantly from the direct estimates.
///
/// Key behaviors
/// -------------
/// - Holds `W = Σ (dᵢ − mᵢ)² / (mseDᵢ + mseMᵢ)` over the supplied
///   in-sample domains.
/// - Stores `df = n`, the number of in-sample domains.
/// - Stores the asymptotic χ²(df) upper-tail probability of W.
/// - Provides lightweight accessor methods for each field so downstream
///   code (including Python bindings) does not depend on the layout.
///
/// Parameters
/// ----------
/// Constructed via [`BrownOutcome::brown`]:
/// - `direct`, `model`: `&[f64]`
///   In-sample direct and model point estimates, aligned per domain.
/// - `mse_direct`, `mse_model`: `&[f64]`
///   Their estimated MSEs, aligned with the point estimates.
///
/// Fields
/// ------
/// - `statistic`: `f64`
///   The weighted chi-square statistic W.
/// - `df`: `usize`
///   Degrees of freedom, equal to the number of in-sample domains.
/// - `p_value`: `f64`
///   Upper-tail χ²(df) probability of W, in [0, 1].
///
/// Invariants
/// ----------
/// - `df` equals the common input length exactly.
/// - `statistic` is finite and non-negative whenever construction
///   succeeds.
/// - `p_value` lies in the closed interval [0, 1].
///
/// Performance
/// -----------
/// - Stores three scalars and derives `Copy`; construction performs a
///   single pass over the four input slices with no allocation.
#[derive(Debug, Copy, Clone)]
pub struct BrownOutcome {
    statistic: f64,
    df: usize,
    p_value: f64,
}

impl BrownOutcome {
    /// Run the Brown goodness-of-fit test on in-sample estimate pairs.
    ///
    /// Parameters
    /// ----------
    /// - `direct`: `&[f64]`
    ///   In-sample direct estimates {dᵢ}; the reference series whose length
    ///   n defines the degrees of freedom. Must satisfy n ≥ 1.
    /// - `model`: `&[f64]`
    ///   In-sample model-based (FH) point estimates {mᵢ}, aligned with
    ///   `direct`.
    /// - `mse_direct`: `&[f64]`
    ///   Estimated MSEs of the direct estimator, aligned with `direct`.
    /// - `mse_model`: `&[f64]`
    ///   Estimated MSEs of the model-based estimator, aligned with
    ///   `direct`.
    ///
    /// Returns
    /// -------
    /// `TestResult<BrownOutcome>`
    ///   - `Ok(BrownOutcome)` on success, containing:
    ///     - `statistic`: `W = Σ (dᵢ − mᵢ)² / (mseDᵢ + mseMᵢ)`,
    ///     - `df`: the number of in-sample domains n, and
    ///     - `p_value`: `1 − CDF_chisq(W; n)`.
    ///   - `Err(TestError)` when validation fails or a combined MSE weight
    ///     is exactly zero.
    ///
    /// Errors
    /// ------
    /// - `TestError::InsufficientData`
    ///   Returned when `direct` is empty.
    /// - `TestError::NonFiniteValue`
    ///   Returned when any series carries NaN or ±∞.
    /// - `TestError::LengthMismatch`
    ///   Returned when `model`, `mse_direct`, or `mse_model` disagree with
    ///   `direct` in length.
    /// - `TestError::ZeroCombinedMse`
    ///   Returned when `mseDᵢ + mseMᵢ == 0` for some domain i, making the
    ///   inverse-variance ratio undefined.
    ///
    /// Panics
    /// ------
    /// - Never panics under normal operation; the χ² constructor is
    ///   infallible here because `df ≥ 1` is guaranteed by validation.
    ///
    /// Notes
    /// -----
    /// - The upper tail is evaluated as `1 − cdf(W)`, which flushes to 0
    ///   once `cdf(W)` rounds to 1 (catastrophic cancellation for large W).
    ///   This precision ceiling is the documented reference behavior; it is
    ///   reproduced rather than silently replaced with a survival-function
    ///   evaluation.
    /// - No continuity correction and no domain weighting beyond the
    ///   inverse-variance term are applied.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use sae_diagnostics::statistical_tests::brown::BrownOutcome;
    ///
    /// let direct = vec![10.0, 20.0, 30.0];
    /// let model = vec![12.0, 18.0, 29.0];
    /// let mse_direct = vec![1.0, 1.0, 1.0];
    /// let mse_model = vec![0.5, 0.5, 0.5];
    ///
    /// let outcome = BrownOutcome::brown(&direct, &model, &mse_direct, &mse_model).unwrap();
    ///
    /// assert_eq!(outcome.df(), 3);
    /// assert!((outcome.statistic() - 6.0).abs() < 1e-12);
    /// assert!((0.0..=1.0).contains(&outcome.p_value()));
    /// ```
    pub fn brown(
        direct: &[f64], model: &[f64], mse_direct: &[f64], mse_model: &[f64],
    ) -> TestResult<Self> {
        validate_series("direct", direct, 1)?;
        let n = direct.len();
        validate_aligned("model", model, n)?;
        validate_aligned("mse_direct", mse_direct, n)?;
        validate_aligned("mse_model", mse_model, n)?;

        let mut statistic = 0.0;
        for i in 0..n {
            let weight = mse_direct[i] + mse_model[i];
            if weight == 0.0 {
                return Err(TestError::ZeroCombinedMse { index: i });
            }
            let diff = direct[i] - model[i];
            statistic += diff * diff / weight;
        }

        let chi = ChiSquared::new(n as f64).expect("degrees of freedom ≥ 1");
        Ok(BrownOutcome { statistic, df: n, p_value: 1.0 - chi.cdf(statistic) })
    }

    /// The weighted chi-square statistic W.
    pub fn statistic(&self) -> f64 {
        self.statistic
    }

    /// Degrees of freedom: the number of in-sample domains.
    pub fn df(&self) -> usize {
        self.df
    }

    /// Upper-tail χ²(df) p-value of [`statistic`](Self::statistic).
    pub fn p_value(&self) -> f64 {
        self.p_value
    }
}

impl std::fmt::Display for BrownOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "W = {:.4}, df = {}, p-value = {:.4}",
            self.statistic, self.df, self.p_value
        )
    }
}

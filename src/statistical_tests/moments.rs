//! statistical_tests::moments — sample skewness and kurtosis.
//!
//! Purpose
//! -------
//! Provide the third- and fourth-moment shape statistics used by the
//! model-fit summaries: Pearson moment-ratio skewness and kurtosis of
//! residual-like vectors (standardized realized residuals, Pearson
//! residuals, random-effect estimates).
//!
//! Key behaviors
//! -------------
//! - Compute skewness as `m₃ / m₂^{3/2}` and kurtosis as `m₄ / m₂²`, where
//!   `m_k` is the k-th central sample moment with a `1/n` denominator.
//! - Propagate the reference numerics on degenerate input: an empty or
//!   constant series yields `NaN` (0/0), not an error.
//!
//! Invariants & assumptions
//! ------------------------
//! - Callers pass finite values; the summary layer validates residual
//!   vectors at adapter-construction time, so no per-call finiteness scan
//!   is repeated here.
//! - Kurtosis is the raw moment ratio (a normal sample is near 3.0), not
//!   excess kurtosis.
//!
//! Conventions
//! -----------
//! - Both statistics are plain functions over `&[f64]`; they never fail and
//!   never allocate.
//! - Degenerate inputs are a documented numeric edge case, intentionally
//!   not "fixed" into an error path: downstream summaries carry whatever
//!   value the moment ratio takes.
//!
//! Downstream usage
//! ----------------
//! - `summary::normality` pairs these with the Shapiro-Wilk test to build
//!   the per-series normality block of EBP and FH summaries.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the moment ratios on small hand-computed series, the
//!   symmetry of skewness under sign flips, and the NaN behavior on
//!   constant input.

/// Compute the sample mean of a series.
///
/// Returns `NaN` for an empty series (0/0), matching the behavior of the
/// moment ratios built on top of it.
#[inline]
fn calc_mean(data: &[f64]) -> f64 {
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Compute the k-th central sample moment `m_k = (1/n) Σ (x_i − x̄)^k`.
#[inline]
fn calc_central_moment(data: &[f64], mean: f64, k: i32) -> f64 {
    let sum: f64 = data.iter().map(|&x| (x - mean).powi(k)).sum();
    sum / data.len() as f64
}

/// Compute the Pearson moment-ratio skewness `m₃ / m₂^{3/2}`.
///
/// Parameters
/// ----------
/// - `data`: `&[f64]`
///   Residual-like observations. Expected finite; an empty or constant
///   series yields `NaN`.
///
/// Returns
/// -------
/// `f64`
///   The sample skewness. Symmetric samples are near 0; right-skewed
///   samples are positive.
///
/// Notes
/// -----
/// - Uses `1/n` moment denominators throughout (no small-sample bias
///   correction), matching the moment-ratio convention of the reference
///   diagnostics.
///
/// Examples
/// --------
/// ```rust
/// use sae_diagnostics::statistical_tests::moments::skewness;
///
/// let symmetric = vec![-2.0, -1.0, 0.0, 1.0, 2.0];
/// assert!(skewness(&symmetric).abs() < 1e-12);
/// ```
pub fn skewness(data: &[f64]) -> f64 {
    let mean = calc_mean(data);
    let m2 = calc_central_moment(data, mean, 2);
    let m3 = calc_central_moment(data, mean, 3);
    m3 / m2.powf(1.5)
}

/// Compute the Pearson moment-ratio kurtosis `m₄ / m₂²`.
///
/// Parameters
/// ----------
/// - `data`: `&[f64]`
///   Residual-like observations. Expected finite; an empty or constant
///   series yields `NaN`.
///
/// Returns
/// -------
/// `f64`
///   The raw (non-excess) kurtosis; a large normal sample is near 3.0.
///
/// Notes
/// -----
/// - Uses `1/n` moment denominators throughout, matching the moment-ratio
///   convention of the reference diagnostics.
///
/// Examples
/// --------
/// ```rust
/// use sae_diagnostics::statistical_tests::moments::kurtosis;
///
/// // Two-point symmetric sample: kurtosis of ±1 is exactly 1.0.
/// let data = vec![-1.0, 1.0];
/// assert!((kurtosis(&data) - 1.0).abs() < 1e-12);
/// ```
pub fn kurtosis(data: &[f64]) -> f64 {
    let mean = calc_mean(data);
    let m2 = calc_central_moment(data, mean, 2);
    let m4 = calc_central_moment(data, mean, 4);
    m4 / (m2 * m2)
}

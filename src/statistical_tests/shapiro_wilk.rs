//! statistical_tests::shapiro_wilk — Shapiro-Wilk normality test (AS R94).
//!
//! Purpose
//! -------
//! Implement the Shapiro-Wilk test of composite normality via the Royston
//! (1992, 1995) approximation, for residual diagnostics in small-area
//! models. Produces the W statistic and its p-value for sample sizes
//! 3 ≤ n ≤ 5000.
//!
//! Key behaviors
//! -------------
//! - Compute the coefficient vector from expected normal order statistics
//!   (Blom approximation) with Royston's polynomial corrections.
//! - Calculate `W = (Σ aᵢ (x₍ₙ₊₁₋ᵢ₎ − x₍ᵢ₎))² / Σ (xᵢ − x̄)²` on the sorted
//!   sample.
//! - Transform W to a z-score via Royston's small-sample (n ≤ 11) and
//!   log-normal (n > 11) approximations and read the p-value off the
//!   standard normal upper tail; n = 3 uses the exact arccos formula.
//! - Expose a compact [`SwOutcome`] value with the statistic and p-value,
//!   suitable for both Rust and Python bindings.
//!
//! Invariants & assumptions
//! ------------------------
//! - The supported sample-size range is 3 ≤ n ≤ 5000; anything outside is a
//!   validation error, not a panic. Model-class-specific applicability
//!   guards (which are narrower) live in the summary layer, not here.
//! - Input must be finite; a constant sample has an undefined W and is
//!   rejected with a typed error.
//!
//! Conventions
//! -----------
//! - Error handling uses the subtree's [`TestError`] type and the result
//!   alias [`TestResult<T>`].
//! - The normal CDF and quantile function come from `statrs`; the Royston
//!   polynomial constants are transcribed from AS R94.
//!
//! Downstream usage
//! ----------------
//! - Call [`SwOutcome::shapiro_wilk`] on residual or random-effect vectors
//!   to obtain `(W, p)` for diagnostic reporting.
//! - The summary assembler wraps this engine with per-model-class
//!   applicability guards and degrades failures into "not available"
//!   entries with an advisory note.
//!
//! Testing notes
//! -------------
//! - Unit tests verify the n = 3 exact branch, near-normal vs. strongly
//!   skewed samples, boundedness of W and p, and rejection of unsupported
//!   sample sizes and constant data.

use crate::statistical_tests::errors::{TestError, TestResult};
use crate::statistical_tests::validation::validate_series;
use statrs::distribution::{ContinuousCDF, Normal};

// Royston (1995) AS R94 polynomial coefficients.
const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const G: [f64; 2] = [-2.273, 0.459];

/// SwOutcome — outcome of the Shapiro-Wilk normality test.
///
/// Purpose
/// -------
/// Represent the outcome of a single Shapiro-Wilk test: the W statistic
/// and its approximate p-value under the null hypothesis of normality.
///
/// Key behaviors
/// -------------
/// - Holds the W statistic (0 < W ≤ 1; values near 1 are consistent with
///   normality) and the Royston-approximation p-value.
/// - Provides lightweight accessor methods so downstream code (including
///   Python bindings) does not depend on the internal layout.
///
/// Parameters
/// ----------
/// Constructed via [`SwOutcome::shapiro_wilk`]:
/// - `data`: `&[f64]`
///   Residual-like sample with 3 ≤ len ≤ 5000, finite, not constant.
///
/// Fields
/// ------
/// - `statistic`: `f64`
///   The W statistic, clamped into (0, 1].
/// - `p_value`: `f64`
///   Approximate p-value in [0, 1].
///
/// Invariants
/// ----------
/// - `statistic` is finite and lies in (0, 1] whenever construction
///   succeeds.
/// - `p_value` lies in the closed interval [0, 1].
///
/// Performance
/// -----------
/// - Stores two scalars and derives `Copy`, making it cheap to pass by
///   value across FFI boundaries.
/// - Construction sorts one owned copy of the input and allocates the
///   half-length coefficient vector; nothing else.
#[derive(Debug, Copy, Clone)]
pub struct SwOutcome {
    statistic: f64,
    p_value: f64,
}

impl SwOutcome {
    /// Run the Shapiro-Wilk normality test (Royston AS R94 approximation).
    ///
    /// Parameters
    /// ----------
    /// - `data`: `&[f64]`
    ///   Sample {xᵢ} with 3 ≤ n ≤ 5000. Typically residuals or random-effect
    ///   estimates from a fitted small-area model. Values must be finite
    ///   and not all identical.
    ///
    /// Returns
    /// -------
    /// `TestResult<SwOutcome>`
    ///   - `Ok(SwOutcome)` on success, containing the W statistic and its
    ///     p-value.
    ///   - `Err(TestError)` when the sample size is unsupported, the data
    ///     contain non-finite values, the sample is constant, or the
    ///     coefficient construction degenerates.
    ///
    /// Errors
    /// ------
    /// - `TestError::SampleSizeOutOfRange`
    ///   Returned when `n < 3` or `n > 5000` (outside the Royston range).
    /// - `TestError::NonFiniteValue`
    ///   Returned by input validation for NaN or ±∞ entries.
    /// - `TestError::ConstantSeries`
    ///   Returned when the sorted sample has (numerically) zero range.
    /// - `TestError::IllConditioned`
    ///   Returned when the normalization inside the coefficient
    ///   construction loses positivity, or W falls outside [0, 1].
    ///
    /// Panics
    /// ------
    /// - Never panics under normal operation; all user-facing invalid
    ///   inputs are surfaced as `TestError` values.
    ///
    /// Notes
    /// -----
    /// - n = 3 is handled by the exact formula
    ///   `p = 1 − (6/π)·arccos(√W)` with `W` clamped into [0.75, 1].
    /// - For n ≤ 11 the p-value uses Royston's gamma-shifted log
    ///   transformation; for n > 11 the log-normal transformation in
    ///   `ln n`. Both read the upper tail of the standard normal CDF.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use sae_diagnostics::statistical_tests::shapiro_wilk::SwOutcome;
    ///
    /// let data = vec![-1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5];
    /// let outcome = SwOutcome::shapiro_wilk(&data).unwrap();
    ///
    /// assert!(outcome.statistic() > 0.9);
    /// assert!((0.0..=1.0).contains(&outcome.p_value()));
    /// ```
    pub fn shapiro_wilk(data: &[f64]) -> TestResult<Self> {
        let n = data.len();
        if !(3..=5000).contains(&n) {
            return Err(TestError::SampleSizeOutOfRange { len: n });
        }
        validate_series("sample", data, 3)?;

        let mut x: Vec<f64> = data.to_vec();
        x.sort_by(|a, b| a.partial_cmp(b).expect("finite values compare totally"));

        if x[n - 1] - x[0] < 1e-300 {
            return Err(TestError::ConstantSeries { len: n });
        }

        if n == 3 {
            return Ok(calc_exact_n3(&x));
        }

        let nn2 = n / 2;
        let a = calc_coefficients(n, nn2)?;
        let statistic = calc_statistic(&x, &a, n, nn2);

        if !(0.0..=1.0 + 1e-10).contains(&statistic) {
            return Err(TestError::IllConditioned { reason: "W statistic left the unit interval" });
        }
        let statistic = statistic.min(1.0);
        let p_value = calc_p_value(statistic, n).clamp(0.0, 1.0);

        Ok(SwOutcome { statistic, p_value })
    }

    /// The W statistic (values near 1 are consistent with normality).
    pub fn statistic(&self) -> f64 {
        self.statistic
    }

    /// Approximate p-value of [`statistic`](Self::statistic) under the
    /// null hypothesis of normality.
    pub fn p_value(&self) -> f64 {
        self.p_value
    }
}

//
// ---------- Private helpers (compact docs) ----------
//

/// Exact W and p-value for n = 3: `a = (1/√2, 0, −1/√2)` and
/// `p = 1 − (6/π)·arccos(√W)`, with W clamped into [0.75, 1].
fn calc_exact_n3(x: &[f64]) -> SwOutcome {
    let a1 = std::f64::consts::FRAC_1_SQRT_2;
    let mean = (x[0] + x[1] + x[2]) / 3.0;
    let ss: f64 = x.iter().map(|&v| (v - mean).powi(2)).sum();

    let numerator = a1 * (x[2] - x[0]);
    let statistic = ((numerator * numerator) / ss).clamp(0.75, 1.0);
    let p_value = (1.0 - (6.0 / std::f64::consts::PI) * statistic.sqrt().acos()).clamp(0.0, 1.0);

    SwOutcome { statistic, p_value }
}

/// Evaluate the polynomial `c[0] + c[1]·x + c[2]·x² + …` (Horner's method).
#[inline]
fn calc_poly(c: &[f64], x: f64) -> f64 {
    let mut result = c[c.len() - 1];
    for i in (0..c.len() - 1).rev() {
        result = result * x + c[i];
    }
    result
}

/// Compute the Shapiro-Wilk coefficient half-vector via Royston's
/// algorithm: Blom-approximated expected normal order statistics with
/// polynomial corrections to the first one (n ≤ 5) or two (n > 5)
/// coefficients.
fn calc_coefficients(n: usize, nn2: usize) -> TestResult<Vec<f64>> {
    let unit_normal = Normal::new(0.0, 1.0).expect("unit normal has valid parameters");
    let mut a = vec![0.0; nn2];

    let mut m = vec![0.0; nn2];
    let mut summ2 = 0.0;
    for (i, mi) in m.iter_mut().enumerate() {
        let p = (i as f64 + 1.0 - 0.375) / (n as f64 + 0.25);
        *mi = unit_normal.inverse_cdf(p);
        summ2 += *mi * *mi;
    }
    summ2 *= 2.0;
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / (n as f64).sqrt();

    let a1 = calc_poly(&C1, rsn) - m[0] / ssumm2;

    if n <= 5 {
        let fac_sq = summ2 - 2.0 * m[0] * m[0];
        let one_minus = 1.0 - 2.0 * a1 * a1;
        if fac_sq <= 0.0 || one_minus <= 0.0 {
            return Err(TestError::IllConditioned { reason: "coefficient normalization lost positivity" });
        }
        let fac = (fac_sq / one_minus).sqrt();
        a[0] = a1;
        for i in 1..nn2 {
            a[i] = -m[i] / fac;
        }
    } else {
        let a2 = -m[1] / ssumm2 + calc_poly(&C2, rsn);
        let fac_sq = summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1];
        let one_minus = 1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2;
        if fac_sq <= 0.0 || one_minus <= 0.0 {
            return Err(TestError::IllConditioned { reason: "coefficient normalization lost positivity" });
        }
        let fac = (fac_sq / one_minus).sqrt();
        a[0] = a1;
        a[1] = a2;
        for i in 2..nn2 {
            a[i] = -m[i] / fac;
        }
    }

    Ok(a)
}

/// Compute `W = (Σ aᵢ (x₍ₙ₊₁₋ᵢ₎ − x₍ᵢ₎))² / Σ (xᵢ − x̄)²` from the sorted
/// sample and the coefficient half-vector.
fn calc_statistic(x: &[f64], a: &[f64], n: usize, nn2: usize) -> f64 {
    let mut sa = 0.0;
    for i in 0..nn2 {
        sa += a[i] * (x[n - 1 - i] - x[i]);
    }

    let mean = x.iter().sum::<f64>() / n as f64;
    let ss: f64 = x.iter().map(|&v| (v - mean).powi(2)).sum();

    (sa * sa) / ss
}

/// Transform W into a p-value via Royston's approximations: a
/// gamma-shifted log transformation for 4 ≤ n ≤ 11 and a log-normal
/// transformation in `ln n` for n > 11, both read off the standard normal
/// upper tail.
fn calc_p_value(w: f64, n: usize) -> f64 {
    let unit_normal = Normal::new(0.0, 1.0).expect("unit normal has valid parameters");
    let nf = n as f64;

    let w1 = 1.0 - w;
    if w1 <= 0.0 {
        return 1.0;
    }
    let y = w1.ln();

    if n <= 11 {
        let gamma = calc_poly(&G, nf);
        if y >= gamma {
            return 0.0;
        }
        let y2 = -(gamma - y).ln();
        let m = calc_poly(&C3, nf);
        let s = calc_poly(&C4, nf).exp();
        if s < 1e-300 {
            return 0.0;
        }
        1.0 - unit_normal.cdf((y2 - m) / s)
    } else {
        let xx = nf.ln();
        let m = calc_poly(&C5, xx);
        let s = calc_poly(&C6, xx).exp();
        if s < 1e-300 {
            return 0.0;
        }
        1.0 - unit_normal.cdf((y - m) / s)
    }
}

//! summary::direct — summary of a direct-estimation result.
//!
//! Purpose
//! -------
//! Summarize a direct (design-based) estimation run: domain and unit
//! counts plus the classical five-number-style distribution of per-domain
//! sample sizes. No model diagnostics apply; a direct estimator has no
//! residuals, random effects, or variance components.
//!
//! Key behaviors
//! -------------
//! - [`FiveNumberSummary`] reports min, first quartile, median, mean,
//!   third quartile, and max, with quartiles interpolated the way the
//!   classical `summary()` convention does (type-7 quantiles).
//!
//! Invariants & assumptions
//! ------------------------
//! - Per-domain sample sizes come from the sampling framework's raw
//!   membership vector; an empty sample yields NaN entries (0/0-style
//!   edge, left to the caller to render).
//!
//! Downstream usage
//! ----------------
//! - `summary::summarize` builds this for the `Direct` variant; display
//!   layers render the six numbers in one row.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the type-7 quartiles on small fixed count vectors.

use crate::model::FitResult;

/// FiveNumberSummary — classical distribution summary of a count vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub mean: f64,
    pub q3: f64,
    pub max: f64,
}

/// DirectSummary — diagnostic summary of a direct-estimation result.
///
/// Fields
/// ------
/// - `n_domains`: number of sampled domains.
/// - `n_units`: number of sampled units.
/// - `sample_sizes`: five-number-style summary of per-domain sample
///   sizes.
///
/// All model-specific diagnostics (normality, R², ICC, transformations)
/// are undefined for this variant and therefore absent from the payload;
/// the variant-tagged union keeps the shape stable for consumers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectSummary {
    pub n_domains: usize,
    pub n_units: usize,
    pub sample_sizes: FiveNumberSummary,
}

impl std::fmt::Display for DirectSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Direct estimation over {} domains ({} units)", self.n_domains, self.n_units)?;
        let s = &self.sample_sizes;
        writeln!(f, "Sample sizes per domain:")?;
        writeln!(
            f,
            "  min {:.1}  q1 {:.1}  median {:.1}  mean {:.1}  q3 {:.1}  max {:.1}",
            s.min, s.q1, s.median, s.mean, s.q3, s.max
        )
    }
}

/// Assemble the direct-estimation summary from a result object.
pub(crate) fn summarize_direct(fit: &FitResult) -> DirectSummary {
    let framework = fit.framework();
    let counts: Vec<f64> =
        framework.domain_sample_sizes().into_iter().map(|c| c as f64).collect();

    DirectSummary {
        n_domains: framework.n_domains_sampled(),
        n_units: framework.n_units_sampled(),
        sample_sizes: five_number_summary(&counts),
    }
}

/// Classical five-number-style summary with type-7 quantile
/// interpolation.
pub(crate) fn five_number_summary(values: &[f64]) -> FiveNumberSummary {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("finite values compare totally"));

    let mean = values.iter().sum::<f64>() / values.len() as f64;

    FiveNumberSummary {
        min: quantile_type7(&sorted, 0.0),
        q1: quantile_type7(&sorted, 0.25),
        median: quantile_type7(&sorted, 0.5),
        mean,
        q3: quantile_type7(&sorted, 0.75),
        max: quantile_type7(&sorted, 1.0),
    }
}

/// Type-7 sample quantile: linear interpolation at `h = (n − 1)·p` over
/// the sorted values. Returns NaN for an empty input.
fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Type-7 quartile interpolation on a small fixed vector.
    // - The degenerate single-value vector.
    //
    // They intentionally DO NOT cover:
    // - Framework count derivation (tested in `model::framework`) or the
    //   summarize dispatch (integration tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Pin the five numbers on a vector with interpolated quartiles.
    //
    // Given
    // -----
    // - Counts [1, 2, 3, 4]: h(0.25) = 0.75 → 1.75, h(0.5) = 1.5 → 2.5,
    //   h(0.75) = 2.25 → 3.25, mean = 2.5.
    //
    // Expect
    // ------
    // - min 1, q1 1.75, median 2.5, mean 2.5, q3 3.25, max 4.
    fn five_number_summary_interpolates_type7_quartiles() {
        // Act
        let s = five_number_summary(&[1.0, 2.0, 3.0, 4.0]);

        // Assert
        assert_eq!(s.min, 1.0);
        assert!((s.q1 - 1.75).abs() < 1e-12);
        assert!((s.median - 2.5).abs() < 1e-12);
        assert!((s.mean - 2.5).abs() < 1e-12);
        assert!((s.q3 - 3.25).abs() < 1e-12);
        assert_eq!(s.max, 4.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify the degenerate single-value vector: all six numbers equal
    // the value.
    //
    // Given
    // -----
    // - The vector [7].
    //
    // Expect
    // ------
    // - Every field is 7.
    fn five_number_summary_single_value_collapses() {
        // Act
        let s = five_number_summary(&[7.0]);

        // Assert
        for value in [s.min, s.q1, s.median, s.mean, s.q3, s.max] {
            assert_eq!(value, 7.0);
        }
    }
}

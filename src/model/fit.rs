//! model::fit — read-only adapter over a fitted small-area model.
//!
//! Purpose
//! -------
//! Provide the validated, immutable view the diagnostics consume: the
//! per-domain estimate table (direct and model-based point estimates with
//! the in/out-of-sample partition), the optional parallel MSE table, the
//! variant-specific model internals, and the sampling framework.
//!
//! Key behaviors
//! -------------
//! - [`EstimateTable`] couples the two estimate columns with the
//!   out-of-sample flags and offers in-sample extraction for the test
//!   engines.
//! - [`FitResult`] ties a table, an optional MSE table, internals, and the
//!   framework together, enforcing the cross-table invariants once at
//!   construction:
//!   - indicators and MSE share length and out-of-sample flags,
//!   - per-in-sample-domain internals vectors align with the in-sample
//!     row count.
//! - [`ModelVariant`] is the closed tag the top-level operations dispatch
//!   on; it derives from the internals, never from runtime inspection.
//!
//! Invariants & assumptions
//! ------------------------
//! - In-sample rows carry finite estimates (and finite MSEs when the MSE
//!   table is present); out-of-sample rows may carry non-finite
//!   placeholders, matching how fitters report unobserved domains.
//! - All containers are read-only after construction; every diagnostic
//!   operation takes `&FitResult` and builds new values.
//!
//! Conventions
//! -----------
//! - An out-of-sample flag of `false` marks an in-sample (observed)
//!   domain; this mirrors the "in-sample flag == 0" convention of the
//!   upstream fitters.
//!
//! Downstream usage
//! ----------------
//! - `comparison::compare` consumes FH results; `summary::summarize`
//!   consumes any variant. Both rely on the invariants enforced here and
//!   perform no re-validation.
//!
//! Testing notes
//! -------------
//! - Unit tests cover constructor validation (flag mismatches, misaligned
//!   internals, non-finite in-sample rows) and in-sample extraction.

use crate::model::errors::{ModelDataError, ModelResult};
use crate::model::framework::SampleFramework;
use crate::model::internals::{EbpInternals, FhInternals, ModelInternals};
use ndarray::Array1;

/// ModelVariant — closed tag of the supported model classes.
///
/// Dispatch in `compare` and `summarize` is an exhaustive `match` on this
/// enum; an unsupported class is unrepresentable by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelVariant {
    Direct,
    Ebp,
    Fh,
}

impl std::fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelVariant::Direct => write!(f, "direct"),
            ModelVariant::Ebp => write!(f, "ebp"),
            ModelVariant::Fh => write!(f, "fh"),
        }
    }
}

/// EstimateTable — per-domain estimate columns with the sample partition.
///
/// Purpose
/// -------
/// Represent one ordered table with a direct-estimator column, a
/// model-estimate column, and the out-of-sample flag per domain. The same
/// shape carries point estimates and (in a second instance) their MSEs.
///
/// Parameters
/// ----------
/// Constructed via [`EstimateTable::new`]:
/// - `table`: `&'static str`
///   Name used in error messages ("indicators", "mse").
/// - `direct`: `Array1<f64>`
///   Direct-estimator column, one entry per domain.
/// - `model`: `Array1<f64>`
///   Model-estimate column, aligned with `direct`.
/// - `out_of_sample`: `Vec<bool>`
///   `false` for in-sample (observed) domains, `true` otherwise.
///
/// Invariants
/// ----------
/// - All three containers share one length ≥ 1.
/// - In-sample rows are finite in both columns; out-of-sample rows are
///   unconstrained (fitters report NaN there).
///
/// Performance
/// -----------
/// - In-sample extraction allocates one vector per call; tables are small
///   (domains in the tens to low thousands).
#[derive(Debug, Clone)]
pub struct EstimateTable {
    direct: Array1<f64>,
    model: Array1<f64>,
    out_of_sample: Vec<bool>,
}

impl EstimateTable {
    /// Validate and assemble an estimate table.
    ///
    /// Returns
    /// -------
    /// `ModelResult<EstimateTable>`
    ///   - `Ok` when the columns align, the table is non-empty, and every
    ///     in-sample row is finite in both columns.
    ///
    /// Errors
    /// ------
    /// - `ModelDataError::EmptyTable` for zero rows.
    /// - `ModelDataError::LengthMismatch` for misaligned columns or flags.
    /// - `ModelDataError::NonFiniteInSample` for NaN/±∞ in an in-sample
    ///   row.
    pub fn new(
        table: &'static str, direct: Array1<f64>, model: Array1<f64>, out_of_sample: Vec<bool>,
    ) -> ModelResult<Self> {
        let n = direct.len();
        if n == 0 {
            return Err(ModelDataError::EmptyTable { table });
        }
        if model.len() != n {
            return Err(ModelDataError::LengthMismatch { table, expected: n, actual: model.len() });
        }
        if out_of_sample.len() != n {
            return Err(ModelDataError::LengthMismatch {
                table,
                expected: n,
                actual: out_of_sample.len(),
            });
        }

        for index in 0..n {
            if out_of_sample[index] {
                continue;
            }
            for (column, value) in [("direct", direct[index]), ("model", model[index])] {
                if !value.is_finite() {
                    return Err(ModelDataError::NonFiniteInSample { table, column, index, value });
                }
            }
        }

        Ok(EstimateTable { direct, model, out_of_sample })
    }

    /// Number of domain rows.
    pub fn len(&self) -> usize {
        self.direct.len()
    }

    /// Whether the table has no rows (never true after construction).
    pub fn is_empty(&self) -> bool {
        self.direct.is_empty()
    }

    /// Direct-estimator column over all domains.
    pub fn direct(&self) -> &Array1<f64> {
        &self.direct
    }

    /// Model-estimate column over all domains.
    pub fn model(&self) -> &Array1<f64> {
        &self.model
    }

    /// Out-of-sample flags (`false` = in-sample).
    pub fn out_of_sample(&self) -> &[bool] {
        &self.out_of_sample
    }

    /// Number of in-sample (observed) domains.
    pub fn n_in_sample(&self) -> usize {
        self.out_of_sample.iter().filter(|&&o| !o).count()
    }

    /// Number of out-of-sample (unobserved) domains.
    pub fn n_out_of_sample(&self) -> usize {
        self.len() - self.n_in_sample()
    }

    /// Direct-estimator column restricted to in-sample domains, in table
    /// order.
    pub fn in_sample_direct(&self) -> Array1<f64> {
        self.in_sample_column(&self.direct)
    }

    /// Model-estimate column restricted to in-sample domains, in table
    /// order.
    pub fn in_sample_model(&self) -> Array1<f64> {
        self.in_sample_column(&self.model)
    }

    fn in_sample_column(&self, column: &Array1<f64>) -> Array1<f64> {
        Array1::from_iter(
            column.iter().zip(&self.out_of_sample).filter(|(_, &o)| !o).map(|(&v, _)| v),
        )
    }
}

/// FitResult — the read-only result object every diagnostic consumes.
///
/// Purpose
/// -------
/// Bundle the estimate table, the optional MSE table, the variant-specific
/// internals, the sampling framework, and the provenance record of one
/// externally fitted small-area model.
///
/// Key behaviors
/// -------------
/// - Construction enforces the cross-table invariants (shared ordering
///   and flags between indicators and MSE; internals aligned with the
///   in-sample row count).
/// - [`FitResult::variant`] derives the closed dispatch tag from the
///   internals.
///
/// Invariants
/// ----------
/// - `mse`, when present, has the same length and out-of-sample flags as
///   `indicators`.
/// - FH: `random_effects`, `std_residuals` (and `gamma` when present)
///   have one entry per in-sample domain.
/// - EBP: `random_effects` has one entry per in-sample domain;
///   `pearson_residuals` is population-level and only required non-empty.
#[derive(Debug, Clone)]
pub struct FitResult {
    indicators: EstimateTable,
    mse: Option<EstimateTable>,
    internals: ModelInternals,
    framework: SampleFramework,
    fitting_call: String,
}

impl FitResult {
    /// Assemble a Fay-Herriot result object.
    ///
    /// Errors
    /// ------
    /// - `ModelDataError::LengthMismatch` / `FlagMismatch` when the MSE
    ///   table disagrees with the indicators, or when per-in-sample-domain
    ///   internals vectors disagree with the in-sample row count.
    pub fn fh(
        indicators: EstimateTable, mse: Option<EstimateTable>, internals: FhInternals,
        framework: SampleFramework, fitting_call: String,
    ) -> ModelResult<Self> {
        validate_mse(&indicators, mse.as_ref())?;
        let n_in = indicators.n_in_sample();
        validate_per_in_sample("random effects", internals.random_effects.len(), n_in)?;
        validate_per_in_sample("standardized residuals", internals.std_residuals.len(), n_in)?;

        Ok(FitResult {
            indicators,
            mse,
            internals: ModelInternals::Fh(internals),
            framework,
            fitting_call,
        })
    }

    /// Assemble an EBP result object.
    ///
    /// Errors
    /// ------
    /// - `ModelDataError::LengthMismatch` / `FlagMismatch` as for
    ///   [`FitResult::fh`]; the random-intercept vector must align with
    ///   the in-sample row count and the Pearson residuals must be
    ///   non-empty.
    pub fn ebp(
        indicators: EstimateTable, mse: Option<EstimateTable>, internals: EbpInternals,
        framework: SampleFramework, fitting_call: String,
    ) -> ModelResult<Self> {
        validate_mse(&indicators, mse.as_ref())?;
        let n_in = indicators.n_in_sample();
        validate_per_in_sample("random effects", internals.random_effects.len(), n_in)?;
        if internals.pearson_residuals.is_empty() {
            return Err(ModelDataError::EmptyTable { table: "pearson residuals" });
        }

        Ok(FitResult {
            indicators,
            mse,
            internals: ModelInternals::Ebp(internals),
            framework,
            fitting_call,
        })
    }

    /// Assemble a direct-estimation result object (no model internals).
    pub fn direct(
        indicators: EstimateTable, mse: Option<EstimateTable>, framework: SampleFramework,
        fitting_call: String,
    ) -> ModelResult<Self> {
        validate_mse(&indicators, mse.as_ref())?;
        Ok(FitResult {
            indicators,
            mse,
            internals: ModelInternals::Direct,
            framework,
            fitting_call,
        })
    }

    /// The closed dispatch tag, derived from the internals.
    pub fn variant(&self) -> ModelVariant {
        match &self.internals {
            ModelInternals::Direct => ModelVariant::Direct,
            ModelInternals::Ebp(_) => ModelVariant::Ebp,
            ModelInternals::Fh(_) => ModelVariant::Fh,
        }
    }

    /// Per-domain point-estimate table.
    pub fn indicators(&self) -> &EstimateTable {
        &self.indicators
    }

    /// Per-domain MSE table, when MSE estimation was requested.
    pub fn mse(&self) -> Option<&EstimateTable> {
        self.mse.as_ref()
    }

    /// Variant-specific model internals.
    pub fn internals(&self) -> &ModelInternals {
        &self.internals
    }

    /// Sampling-framework bookkeeping.
    pub fn framework(&self) -> &SampleFramework {
        &self.framework
    }

    /// Provenance record of the fitting call (display only).
    pub fn fitting_call(&self) -> &str {
        &self.fitting_call
    }
}

/// Enforce the shared-ordering contract between indicators and MSE.
fn validate_mse(indicators: &EstimateTable, mse: Option<&EstimateTable>) -> ModelResult<()> {
    let Some(mse) = mse else { return Ok(()) };
    if mse.len() != indicators.len() {
        return Err(ModelDataError::LengthMismatch {
            table: "mse",
            expected: indicators.len(),
            actual: mse.len(),
        });
    }
    for (index, (a, b)) in indicators.out_of_sample().iter().zip(mse.out_of_sample()).enumerate() {
        if a != b {
            return Err(ModelDataError::FlagMismatch { index });
        }
    }
    Ok(())
}

/// Enforce alignment of a per-in-sample-domain internals vector.
fn validate_per_in_sample(table: &'static str, actual: usize, expected: usize) -> ModelResult<()> {
    if actual != expected {
        return Err(ModelDataError::LengthMismatch { table, expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::internals::{FhTransformation, Transformation};
    use ndarray::array;

    fn indicators() -> EstimateTable {
        EstimateTable::new(
            "indicators",
            array![10.0, 20.0, f64::NAN],
            array![11.0, 19.0, 25.0],
            vec![false, false, true],
        )
        .expect("well-formed indicator table")
    }

    fn framework() -> SampleFramework {
        SampleFramework::new(
            vec!["a".to_string(), "b".to_string()],
            None,
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()]),
        )
    }

    fn fh_internals() -> FhInternals {
        FhInternals::new(
            Some(array![0.5, 0.5]),
            array![0.3, -0.3],
            array![1.0, -1.0],
            Vec::new(),
            2.0,
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
    // - In-sample extraction and counting on the estimate table, including
    //   tolerated non-finite out-of-sample placeholders.
    // - Rejection of non-finite in-sample rows.
    // - The MSE shared-flags invariant and internals alignment checks in
    //   the `FitResult` constructors.
    // - Variant derivation from the internals.
    //
    // They intentionally DO NOT cover:
    // - The diagnostics that consume the adapter (`comparison`, `summary`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify in-sample extraction and counts, with an out-of-sample row
    // carrying a NaN direct placeholder.
    //
    // Given
    // -----
    // - A three-domain table whose third row is out-of-sample with NaN in
    //   the direct column.
    //
    // Expect
    // ------
    // - Construction succeeds; 2 in-sample and 1 out-of-sample domains;
    //   in-sample columns equal the first two rows.
    fn estimate_table_in_sample_extraction_skips_out_of_sample_rows() {
        // Arrange
        let table = indicators();

        // Act & Assert
        assert_eq!(table.len(), 3);
        assert_eq!(table.n_in_sample(), 2);
        assert_eq!(table.n_out_of_sample(), 1);
        assert_eq!(table.in_sample_direct(), array![10.0, 20.0]);
        assert_eq!(table.in_sample_model(), array![11.0, 19.0]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a non-finite in-sample entry is rejected while the same value
    // is tolerated on an out-of-sample row.
    //
    // Given
    // -----
    // - A table with NaN in the direct column of an in-sample row.
    //
    // Expect
    // ------
    // - `NonFiniteInSample` naming table, column, and row.
    fn estimate_table_non_finite_in_sample_row_is_rejected() {
        // Act
        let result = EstimateTable::new(
            "indicators",
            array![f64::NAN, 20.0],
            array![11.0, 19.0],
            vec![false, false],
        );

        // Assert
        match result {
            Err(ModelDataError::NonFiniteInSample { table, column, index, .. }) => {
                assert_eq!(table, "indicators");
                assert_eq!(column, "direct");
                assert_eq!(index, 0);
            }
            other => panic!("expected NonFiniteInSample, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the shared-flags invariant between indicators and MSE.
    //
    // Given
    // -----
    // - An MSE table whose out-of-sample flags disagree at row 1.
    //
    // Expect
    // ------
    // - `FlagMismatch { index: 1 }` from the FH constructor.
    fn fit_result_mse_flag_disagreement_is_rejected() {
        // Arrange
        let mse = EstimateTable::new(
            "mse",
            array![1.0, f64::NAN, 0.5],
            array![0.5, f64::NAN, 0.25],
            vec![false, true, true],
        )
        .expect("well-formed MSE table");

        // Act
        let result =
            FitResult::fh(indicators(), Some(mse), fh_internals(), framework(), "fh(...)".into());

        // Assert
        match result {
            Err(ModelDataError::FlagMismatch { index }) => assert_eq!(index, 1),
            other => panic!("expected FlagMismatch, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure per-in-sample-domain internals vectors must align with the
    // in-sample row count.
    //
    // Given
    // -----
    // - FH internals with three random effects against two in-sample rows.
    //
    // Expect
    // ------
    // - `LengthMismatch` naming the random-effects container.
    fn fit_result_misaligned_random_effects_are_rejected() {
        // Arrange
        let internals = FhInternals::new(
            None,
            array![0.1, 0.2, 0.3],
            array![0.1, 0.2, 0.3],
            Vec::new(),
            1.0,
            "independent".to_string(),
            None,
            None,
            None,
            FhTransformation::None,
        )
        .expect("well-formed FH internals");

        // Act
        let result = FitResult::fh(indicators(), None, internals, framework(), "fh(...)".into());

        // Assert
        match result {
            Err(ModelDataError::LengthMismatch { table, expected, actual }) => {
                assert_eq!(table, "random effects");
                assert_eq!(expected, 2);
                assert_eq!(actual, 3);
            }
            other => panic!("expected LengthMismatch, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify variant derivation for all three constructors.
    //
    // Given
    // -----
    // - Well-formed direct, EBP, and FH result objects.
    //
    // Expect
    // ------
    // - `variant()` returns the matching tag.
    fn fit_result_variant_derives_from_internals() {
        // Arrange
        let ebp_internals = crate::model::internals::EbpInternals::new(
            array![0.1, -0.1, 0.2],
            array![0.3, -0.3],
            1.0,
            0.5,
            0.25,
            Transformation::None,
        )
        .expect("well-formed EBP internals");

        // Act
        let direct = FitResult::direct(indicators(), None, framework(), "direct(...)".into())
            .expect("direct result should construct");
        let ebp = FitResult::ebp(indicators(), None, ebp_internals, framework(), "ebp(...)".into())
            .expect("ebp result should construct");
        let fh = FitResult::fh(indicators(), None, fh_internals(), framework(), "fh(...)".into())
            .expect("fh result should construct");

        // Assert
        assert_eq!(direct.variant(), ModelVariant::Direct);
        assert_eq!(ebp.variant(), ModelVariant::Ebp);
        assert_eq!(fh.variant(), ModelVariant::Fh);
        assert_eq!(format!("{}", fh.variant()), "fh");
    }
}

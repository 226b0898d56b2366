//! summary — model-fit summary assembly for all model classes.
//!
//! Purpose
//! -------
//! Assemble the normalized diagnostic summary of a fitted result object,
//! branching on the closed model-class tag: sample bookkeeping and
//! five-number sample sizes for direct estimation, residual/random-effect
//! normality with R² and ICC for EBP, and normality plus surfaced model
//! internals for FH.
//!
//! Key behaviors
//! -------------
//! - [`summarize`] dispatches on [`ModelVariant`](crate::model::ModelVariant)
//!   with an exhaustive `match`; an unsupported class is unrepresentable,
//!   so the operation is total.
//! - [`FitSummary`] is the variant-tagged union of the three payloads;
//!   each payload has a stable field layout with `Option` for
//!   conditionally available statistics — consumers never meet an absent
//!   field.
//! - Shapiro-Wilk applicability guards differ per model class (see
//!   [`SwGuard`]); the asymmetry at n = 3 is intentional and preserved.
//!
//! Conventions
//! -----------
//! - Summaries read the result object and compute; they never mutate it
//!   and never print. Advisory conditions surface as structured notes on
//!   the payload.
//!
//! Downstream usage
//! ----------------
//! - Display impls on the payloads render the human-readable report;
//!   plotting/reporting tooling reads the fields directly.
//!
//! Testing notes
//! -------------
//! - Dispatch and cross-variant behavior are covered by the integration
//!   tests; per-payload logic is tested in the sibling modules.

pub mod direct;
pub mod ebp;
pub mod fh;
pub mod normality;
pub mod r_squared;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::direct::{DirectSummary, FiveNumberSummary};
pub use self::ebp::{EbpSummary, TransformationSummary};
pub use self::fh::{FhSummary, FhTransformationSummary};
pub use self::normality::{NormalitySummary, SwGuard};
pub use self::r_squared::{RSquared, icc, mixed_model_r_squared};

use crate::model::{FitResult, ModelInternals};

/// FitSummary — variant-tagged diagnostic summary.
///
/// Each variant holds exactly the fields defined for its model class;
/// conditionally available statistics inside a payload are `Option`s, so
/// the shape every consumer sees is stable.
#[derive(Debug, Clone)]
pub enum FitSummary {
    Direct(DirectSummary),
    Ebp(EbpSummary),
    Fh(FhSummary),
}

impl std::fmt::Display for FitSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitSummary::Direct(summary) => summary.fmt(f),
            FitSummary::Ebp(summary) => summary.fmt(f),
            FitSummary::Fh(summary) => summary.fmt(f),
        }
    }
}

/// Assemble the diagnostic summary of a fitted result object.
///
/// Parameters
/// ----------
/// - `fit`: `&FitResult`
///   Any supported result object (direct, EBP, or FH).
///
/// Returns
/// -------
/// `FitSummary`
///   The variant-tagged summary. The operation is total: the closed
///   model-class enum makes an unsupported input unrepresentable, so
///   there is no error path.
///
/// Notes
/// -----
/// - Per-variant behavior:
///   - Direct: five-number-style summary of per-domain sample sizes; no
///     model diagnostics.
///   - EBP: Pearson-residual and random-effect normality (Shapiro-Wilk
///     for lengths strictly between 3 and 5000), marginal/conditional
///     R², ICC, transformation block by tag.
///   - FH: standardized-residual and random-effect normality
///     (Shapiro-Wilk for lengths from 3 up to, excluding, 5000),
///     transformation labels, surfaced internals.
///
/// Examples
/// --------
/// ```rust,ignore
/// use sae_diagnostics::summary::{FitSummary, summarize};
///
/// match summarize(&fit) {
///     FitSummary::Fh(s) => println!("{s}"),
///     other => println!("{other}"),
/// }
/// ```
pub fn summarize(fit: &FitResult) -> FitSummary {
    match fit.internals() {
        ModelInternals::Direct => FitSummary::Direct(direct::summarize_direct(fit)),
        ModelInternals::Ebp(internals) => FitSummary::Ebp(ebp::summarize_ebp(fit, internals)),
        ModelInternals::Fh(internals) => FitSummary::Fh(fh::summarize_fh(fit, internals)),
    }
}

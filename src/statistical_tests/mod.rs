//! statistical_tests — diagnostic test engines and shared infrastructure.
//!
//! Purpose
//! -------
//! Collect the statistical-test routines used by the small-area model
//! diagnostics, together with common input validation and error handling.
//! This subtree implements the Brown goodness-of-fit test, the
//! Shapiro-Wilk normality test (Royston AS R94), and the moment-ratio
//! shape statistics, including Python bridges for PyO3-based bindings.
//!
//! Key behaviors
//! -------------
//! - Expose the Brown weighted chi-square goodness-of-fit test via
//!   [`BrownOutcome`] and its constructor
//!   [`BrownOutcome::brown`](brown::BrownOutcome::brown).
//! - Expose the Shapiro-Wilk test via [`SwOutcome`] and its constructor
//!   [`SwOutcome::shapiro_wilk`](shapiro_wilk::SwOutcome::shapiro_wilk).
//! - Provide moment-ratio [`skewness`](moments::skewness) and
//!   [`kurtosis`](moments::kurtosis) for residual-like vectors.
//! - Centralize input guards in [`validate_series`] and
//!   [`validate_aligned`], ensuring length, alignment, and finiteness are
//!   checked once in a consistent way across test modules.
//! - Provide a dedicated error type [`TestError`] and result alias
//!   [`TestResult`], plus a conversion layer to Python exceptions when the
//!   `python-bindings` feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite, real-valued estimate or residual vectors; modules
//!   call the validation helpers before computing any statistic.
//! - Statistical tests in this subtree report failures via [`TestResult`]
//!   and never panic on user-facing invalid inputs.
//! - [`TestError`] variants are small and cloneable so they can be used
//!   comfortably in unit tests and higher-level orchestration code.
//!
//! Conventions
//! -----------
//! - This subtree is focused on *statistical tests* over raw slices;
//!   model-aware concerns (in-sample filtering, MSE-absent degradation,
//!   per-model-class applicability guards) live in `comparison` and
//!   `summary`.
//! - Error messages are phrased in terms of domain constraints such as
//!   "3 ≤ n ≤ 5000" rather than low-level details.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust,ignore
//!   use sae_diagnostics::statistical_tests::{BrownOutcome, SwOutcome, TestResult};
//!
//!   let brown: BrownOutcome = BrownOutcome::brown(&d, &m, &mse_d, &mse_m)?;
//!   let sw: SwOutcome = SwOutcome::shapiro_wilk(&residuals)?;
//!   ```
//!
//! - The comparison reporter runs the Brown engine over in-sample rows;
//!   the summary assembler combines the Shapiro-Wilk engine with the
//!   moment ratios to build per-series normality blocks.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`errors`] verify `Display` messages and payload
//!   embedding for [`TestError`] variants.
//! - Unit tests in [`validation`] exercise all branches of both guards.
//! - Unit tests in [`brown`] and [`shapiro_wilk`] cover hand-computed
//!   scenarios, bound checks, and degenerate inputs; [`moments`] pins the
//!   moment ratios and their NaN edge cases.

pub mod brown;
pub mod errors;
pub mod moments;
pub mod shapiro_wilk;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::brown::BrownOutcome;
pub use self::errors::{TestError, TestResult};
pub use self::moments::{kurtosis, skewness};
pub use self::shapiro_wilk::SwOutcome;
pub use self::validation::{validate_aligned, validate_series};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use sae_diagnostics::statistical_tests::prelude::*;
//
// to import the main statistical-testing surface in a single line.

pub mod prelude {
    pub use super::brown::BrownOutcome;
    pub use super::errors::{TestError, TestResult};
    pub use super::moments::{kurtosis, skewness};
    pub use super::shapiro_wilk::SwOutcome;
}

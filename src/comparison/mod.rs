//! comparison — model-based vs. direct estimate comparison for FH fits.
//!
//! Purpose
//! -------
//! Bundle the pieces of the Fay-Herriot comparison: the synthetic-part
//! extractor, the comparison reporter orchestrating it with the Brown
//! goodness-of-fit test, and the error type of this level.
//!
//! Key behaviors
//! -------------
//! - [`compare`] is the top-level entry point; it accepts FH result
//!   objects only and returns an immutable [`ComparisonOutcome`] carrying
//!   the Brown outcome, the synthetic-part correlation, and the advisory
//!   notes.
//! - [`synthetic_part`] back-calculates the regression-only component of
//!   the FH predictor with two mutually exclusive branches selected by
//!   the presence of gamma weights.
//!
//! Conventions
//! -----------
//! - All statistics cover in-sample domains only; degraded sub-results
//!   are `None` plus a note, never a silent omission.
//!
//! Testing notes
//! -------------
//! - Module unit tests cover branch selection, degradation paths, and
//!   note emission; the integration tests run full fixtures.

pub mod compare;
pub mod errors;
pub mod synthetic;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::compare::{ComparisonOutcome, compare};
pub use self::errors::{CompareError, CompareResult};
pub use self::synthetic::synthetic_part;

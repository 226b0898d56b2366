//! sae_diagnostics — small-area estimation diagnostics with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the statistical test engines to Python via the
//! `_sae_diagnostics` extension module. The crate implements the
//! diagnostics layer for externally fitted small-area models: the Brown
//! goodness-of-fit test comparing model-based against direct estimates,
//! extraction of the synthetic (regression-only) part of the Fay-Herriot
//! predictor, and the model-fit summary pipeline (skewness/kurtosis,
//! Shapiro-Wilk normality, R², intraclass correlation) assembled per
//! model class.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`model`, `statistical_tests`,
//!   `comparison`, `summary`, `notes`) as the public crate surface.
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer for
//!   the `_sae_diagnostics` Python extension when the `python-bindings`
//!   feature is enabled.
//! - Create and register the Python `statistical_tests` submodule under
//!   `sae_diagnostics` so that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner Rust modules; this file
//!   performs only FFI glue, input validation, and error mapping.
//! - Model fitting is an external collaborator's job: every operation in
//!   this crate takes an immutable, validated result object and produces
//!   new immutable values. There is no shared mutable state anywhere.
//!
//! Conventions
//! -----------
//! - Python-exposed classes live under `_sae_diagnostics.<submodule>` and
//!   are typically wrapped by thin pure-Python facades.
//! - Errors from core Rust code propagate as rich error types internally
//!   and convert to `PyErr` values at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on the inner modules and can
//!   ignore the PyO3 items guarded by the `python-bindings` feature:
//!
//!   ```rust,ignore
//!   use sae_diagnostics::comparison::compare;
//!   use sae_diagnostics::summary::summarize;
//!
//!   let outcome = compare(&fit)?;
//!   let summary = summarize(&fit);
//!   ```
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner
//!   modules and by the integration tests in `tests/`; smoke tests for
//!   the PyO3 bindings live at the Python level.

pub mod comparison;
pub mod model;
pub mod notes;
pub mod statistical_tests;
pub mod summary;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArray1;

#[cfg(feature = "python-bindings")]
use crate::{
    statistical_tests::{brown::BrownOutcome, shapiro_wilk::SwOutcome},
    utils::extract_f64_array,
};

/// ShapiroWilk — Python-facing wrapper for the Shapiro-Wilk test.
///
/// Purpose
/// -------
/// Represent the result of the Shapiro-Wilk normality test when called
/// from Python and forward all computation to [`SwOutcome`].
///
/// Key behaviors
/// -------------
/// - Validate and convert Python inputs into a contiguous `f64` slice.
/// - Run the test via [`SwOutcome::shapiro_wilk`] and store the outcome
///   internally.
/// - Expose scalar accessors (`statistic`, `pvalue`) as Python
///   properties.
///
/// Parameters
/// ----------
/// Constructed from Python via `ShapiroWilk(data)`:
/// - `data`: `&PyAny`
///   One-dimensional array-like of `f64` values with 3 ≤ len ≤ 5000.
///
/// Notes
/// -----
/// - This type is intended to be used from Python; native Rust code
///   should prefer calling [`SwOutcome::shapiro_wilk`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "sae_diagnostics.statistical_tests")]
pub struct ShapiroWilk {
    /// The Shapiro-Wilk test result struct.
    inner: SwOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl ShapiroWilk {
    /// Result of the Shapiro-Wilk normality test (Royston AS R94).
    #[new]
    #[pyo3(text_signature = "(data, /)")]
    pub fn shapiro_wilk<'py>(py: Python<'py>, raw_data: &Bound<'py, PyAny>) -> PyResult<Self> {
        let arr: PyReadonlyArray1<f64> = extract_f64_array(py, raw_data)?;
        let data: &[f64] = arr
            .as_slice()
            .expect("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64");

        let inner = SwOutcome::shapiro_wilk(data)?;
        Ok(ShapiroWilk { inner })
    }

    /// The W statistic.
    #[getter]
    pub fn statistic(&self) -> f64 {
        self.inner.statistic()
    }

    /// The p-value of the test.
    #[getter]
    pub fn pvalue(&self) -> f64 {
        self.inner.p_value()
    }
}

/// BrownTest — Python-facing wrapper for the Brown goodness-of-fit test.
///
/// Purpose
/// -------
/// Represent the result of the Brown test when called from Python and
/// forward all computation to [`BrownOutcome`].
///
/// Key behaviors
/// -------------
/// - Validate and convert the four Python input arrays into contiguous
///   `f64` slices.
/// - Run the test via [`BrownOutcome::brown`] over the supplied
///   (in-sample) estimate pairs and store the outcome internally.
/// - Expose scalar accessors (`statistic`, `df`, `pvalue`) as Python
///   properties.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `BrownTest(direct, model, mse_direct, mse_model)`:
/// - Four one-dimensional array-likes of `f64`, aligned per domain.
///
/// Notes
/// -----
/// - Filtering to in-sample domains and MSE-absent degradation live in
///   the Rust comparison reporter; this wrapper exposes the raw engine.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "sae_diagnostics.statistical_tests")]
pub struct BrownTest {
    /// The Brown test result struct.
    inner: BrownOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl BrownTest {
    /// Result of the Brown goodness-of-fit test for FH estimates.
    #[new]
    #[pyo3(text_signature = "(direct, model, mse_direct, mse_model, /)")]
    pub fn brown<'py>(
        py: Python<'py>, direct: &Bound<'py, PyAny>, model: &Bound<'py, PyAny>,
        mse_direct: &Bound<'py, PyAny>, mse_model: &Bound<'py, PyAny>,
    ) -> PyResult<Self> {
        let direct_arr = extract_f64_array(py, direct)?;
        let model_arr = extract_f64_array(py, model)?;
        let mse_direct_arr = extract_f64_array(py, mse_direct)?;
        let mse_model_arr = extract_f64_array(py, mse_model)?;

        let as_slice = |arr: &PyReadonlyArray1<'py, f64>| -> PyResult<Vec<f64>> {
            arr.as_slice().map(|s| s.to_vec()).map_err(|_| {
                PyValueError::new_err("inputs must be 1-D contiguous float64 arrays or sequences")
            })
        };

        let inner = BrownOutcome::brown(
            &as_slice(&direct_arr)?,
            &as_slice(&model_arr)?,
            &as_slice(&mse_direct_arr)?,
            &as_slice(&mse_model_arr)?,
        )?;
        Ok(BrownTest { inner })
    }

    /// The weighted chi-square statistic W.
    #[getter]
    pub fn statistic(&self) -> f64 {
        self.inner.statistic()
    }

    /// Degrees of freedom (number of in-sample domains).
    #[getter]
    pub fn df(&self) -> usize {
        self.inner.df()
    }

    /// The p-value of the test.
    #[getter]
    pub fn pvalue(&self) -> f64 {
        self.inner.p_value()
    }
}

/// _sae_diagnostics — PyO3 module initializer for the Python extension.
///
/// Creates the `statistical_tests` submodule, attaches it to the parent
/// module, and registers it in `sys.modules` so that dotted imports work
/// from Python.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _sae_diagnostics<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let statistical_tests_mod = PyModule::new(_py, "statistical_tests")?;
    statistical_tests(_py, m, &statistical_tests_mod)?;

    // Manually add the submodule into sys.modules to allow dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("sae_diagnostics.statistical_tests", statistical_tests_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn statistical_tests<'py>(
    _py: Python, sae_diagnostics: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<ShapiroWilk>()?;
    m.add_class::<BrownTest>()?;
    sae_diagnostics.add_submodule(m)?;
    Ok(())
}

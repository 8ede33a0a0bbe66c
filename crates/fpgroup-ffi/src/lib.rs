// ─────────────────────────────────────────────────────────────────────
// FPGroup Bridge — PyO3 FFI Bindings
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
// Note: #[deny(unsafe_code)] not applied — PyO3 proc macros generate
// unsafe blocks internally. All hand-written code in this crate is safe.
//! Python-callable wrappers around the FPGroup Bridge.
//!
//! Exposes `GroupPresentation`, `FinitelyPresentedGroup`, `BridgeConfig`
//! and the start-up hook `configure()` to Python via PyO3.
//!
//! # Host Objects
//!
//! - `GroupPresentation.sage()` rebuilds the presentation with
//!   `sage.all.FreeGroup` and returns Sage's own finitely presented
//!   group. Exceptions raised by Sage propagate unchanged.
//! - `GroupPresentation.native()` returns the Rust-side
//!   `FinitelyPresentedGroup`, with no Sage required.
//! - Malformed relators are rejected with `ValueError` before any host
//!   object is built.
//!
//! Install: `pip install -e crates/fpgroup-ffi` (requires maturin).
//!
//! Usage from Sage:
//! ```python
//! from fpgroup_bridge import GroupPresentation, configure
//!
//! configure(census_data_path="/opt/census")
//! p = GroupPresentation(2)
//! p.add_relation([(0, 2)])
//! p.add_relation([(1, 3), (0, -1)])
//! G = p.sage()   # Finitely presented group < x0, x1 | x0^2, x1^3*x0^-1 >
//! ```

use std::path::PathBuf;

use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use fpgroup_core::{environment, FinitelyPresentedGroup, HostAlgebra, PresentationConverter};
use fpgroup_types::{BridgeConfig, BridgeError, GroupExpression, GroupPresentation};

fn to_py_err(e: BridgeError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

// ─── Sage host ──────────────────────────────────────────────────────

/// Failure inside the Sage host. Wraps the Python exception as-is.
struct SageError(PyErr);

impl From<BridgeError> for SageError {
    fn from(e: BridgeError) -> Self {
        Self(to_py_err(e))
    }
}

impl From<PyErr> for SageError {
    fn from(e: PyErr) -> Self {
        Self(e)
    }
}

impl From<SageError> for PyErr {
    fn from(e: SageError) -> Self {
        e.0
    }
}

/// Host algebra backed by `sage.all`.
struct SageAlgebra<'py> {
    sage: Bound<'py, PyModule>,
    names: String,
}

impl<'py> SageAlgebra<'py> {
    fn import(py: Python<'py>, config: &BridgeConfig) -> PyResult<Self> {
        log::debug!("importing sage.all for host conversion");
        Ok(Self {
            sage: PyModule::import(py, "sage.all")?,
            names: config.generator_prefix.clone(),
        })
    }
}

impl<'py> HostAlgebra for SageAlgebra<'py> {
    type Error = SageError;
    type FreeGroup = Bound<'py, PyAny>;
    type Element = Bound<'py, PyAny>;
    type Quotient = Bound<'py, PyAny>;

    fn free_group(&self, rank: usize) -> Result<Self::FreeGroup, SageError> {
        let kwargs = PyDict::new(self.sage.py());
        kwargs.set_item("names", self.names.as_str())?;
        Ok(self.sage.call_method("FreeGroup", (rank,), Some(&kwargs))?)
    }

    fn generators(&self, group: &Self::FreeGroup) -> Result<Vec<Self::Element>, SageError> {
        Ok(group.call_method0("gens")?.extract()?)
    }

    fn identity(&self, group: &Self::FreeGroup) -> Result<Self::Element, SageError> {
        Ok(group.call_method0("one")?)
    }

    fn pow(&self, base: &Self::Element, exponent: i64) -> Result<Self::Element, SageError> {
        Ok(base.pow(exponent, base.py().None())?)
    }

    fn mul(
        &self,
        lhs: &Self::Element,
        rhs: &Self::Element,
    ) -> Result<Self::Element, SageError> {
        Ok(lhs.mul(rhs)?)
    }

    fn quotient(
        &self,
        group: Self::FreeGroup,
        relators: Vec<Self::Element>,
    ) -> Result<Self::Quotient, SageError> {
        let relators = PyList::new(group.py(), relators)?;
        Ok(group.div(relators)?)
    }
}

// ─── PyBridgeConfig ─────────────────────────────────────────────────

/// Python-visible bridge configuration.
#[pyclass(name = "BridgeConfig")]
#[derive(Clone)]
struct PyBridgeConfig {
    inner: BridgeConfig,
}

#[pymethods]
impl PyBridgeConfig {
    #[new]
    #[pyo3(signature = (
        census_data_path = None,
        validate_generators = true,
        generator_prefix = String::from("x"),
    ))]
    fn new(
        census_data_path: Option<PathBuf>,
        validate_generators: bool,
        generator_prefix: String,
    ) -> PyResult<Self> {
        let config = BridgeConfig {
            census_data_path,
            validate_generators,
            generator_prefix,
        };
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    /// Construct from JSON string.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let config = BridgeConfig::from_json(json).map_err(to_py_err)?;
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    fn to_json(&self) -> PyResult<String> {
        self.inner.to_json().map_err(to_py_err)
    }

    #[getter]
    fn census_data_path(&self) -> Option<PathBuf> {
        self.inner.census_data_path.clone()
    }

    #[getter]
    fn validate_generators(&self) -> bool {
        self.inner.validate_generators
    }

    #[getter]
    fn generator_prefix(&self) -> &str {
        &self.inner.generator_prefix
    }

    fn __repr__(&self) -> String {
        format!(
            "BridgeConfig(census_data_path={:?}, validate_generators={}, generator_prefix={:?})",
            self.inner.census_data_path, self.inner.validate_generators, self.inner.generator_prefix
        )
    }
}

// ─── PyFinitelyPresentedGroup ───────────────────────────────────────

/// Python-visible native finitely presented group.
#[pyclass(name = "FinitelyPresentedGroup")]
#[derive(Clone)]
struct PyFinitelyPresentedGroup {
    inner: FinitelyPresentedGroup,
}

#[pymethods]
impl PyFinitelyPresentedGroup {
    #[getter]
    fn ngens(&self) -> usize {
        self.inner.ngens()
    }

    fn generator_names(&self) -> Vec<String> {
        self.inner.free_group().generator_names().to_vec()
    }

    /// Relators rendered as words, e.g. `x1^3*x0^-1`.
    fn relations(&self) -> Vec<String> {
        self.inner.relations().iter().map(|r| r.to_string()).collect()
    }

    /// Relators as Tietze lists, matching Sage's `Tietze()`.
    ///
    /// Raises ValueError for words too long to list letter by letter.
    fn tietze_relations(&self) -> PyResult<Vec<Vec<i64>>> {
        self.inner
            .tietze_relations()
            .map_err(|e| to_py_err(e.into()))
    }

    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let inner = FinitelyPresentedGroup::from_json(json).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    fn to_json(&self) -> PyResult<String> {
        self.inner.to_json().map_err(to_py_err)
    }

    fn __eq__(&self, other: PyRef<'_, Self>) -> bool {
        self.inner == other.inner
    }

    fn __repr__(&self) -> String {
        self.inner.to_string()
    }
}

// ─── PyGroupPresentation ────────────────────────────────────────────

/// Python-visible finitely presented group from the topology engine.
///
/// Relators are lists of `(generator, exponent)` pairs.
#[pyclass(name = "GroupPresentation")]
#[derive(Clone)]
struct PyGroupPresentation {
    inner: GroupPresentation,
}

impl PyGroupPresentation {
    fn converter_config(config: Option<PyBridgeConfig>) -> BridgeConfig {
        config.map(|c| c.inner).unwrap_or_default()
    }
}

#[pymethods]
impl PyGroupPresentation {
    #[new]
    #[pyo3(signature = (generators = 0))]
    fn new(generators: usize) -> Self {
        Self {
            inner: GroupPresentation::new(generators),
        }
    }

    /// Append generators; returns the index of the first new one.
    #[pyo3(signature = (count = 1))]
    fn add_generator(&mut self, count: usize) -> usize {
        self.inner.add_generator(count)
    }

    fn add_relation(&mut self, terms: Vec<(usize, i64)>) {
        self.inner.add_relation(GroupExpression::from_terms(terms));
    }

    fn count_generators(&self) -> usize {
        self.inner.count_generators()
    }

    fn count_relations(&self) -> usize {
        self.inner.count_relations()
    }

    fn relation(&self, index: usize) -> PyResult<Vec<(usize, i64)>> {
        let relation = self.inner.relation(index).ok_or_else(|| {
            PyIndexError::new_err(format!(
                "relation index {index} out of range for {} relations",
                self.inner.count_relations()
            ))
        })?;
        Ok(relation
            .terms()
            .iter()
            .map(|t| (t.generator, t.exponent))
            .collect())
    }

    fn validate(&self) -> PyResult<()> {
        self.inner.validate().map_err(to_py_err)
    }

    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let inner = GroupPresentation::from_json(json).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    fn to_json(&self) -> PyResult<String> {
        self.inner.to_json().map_err(to_py_err)
    }

    /// The Rust-native finitely presented group.
    #[pyo3(signature = (config = None))]
    fn native(&self, config: Option<PyBridgeConfig>) -> PyResult<PyFinitelyPresentedGroup> {
        let converter = PresentationConverter::native(Self::converter_config(config));
        let inner = converter.convert(&self.inner).map_err(to_py_err)?;
        Ok(PyFinitelyPresentedGroup { inner })
    }

    /// Sage's finitely presented group for this presentation.
    ///
    /// Requires running inside Sage.
    #[pyo3(signature = (config = None))]
    fn sage<'py>(
        &self,
        py: Python<'py>,
        config: Option<PyBridgeConfig>,
    ) -> PyResult<Bound<'py, PyAny>> {
        let config = Self::converter_config(config);
        let host = SageAlgebra::import(py, &config)?;
        Ok(PresentationConverter::new(host, config).convert(&self.inner)?)
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "GroupPresentation(generators={}, relations={})",
            self.inner.count_generators(),
            self.inner.count_relations()
        )
    }
}

// ─── Start-up hook ──────────────────────────────────────────────────

/// Point census lookups at `census_data_path`, if it exists.
///
/// Best effort: returns False and changes nothing when the path is
/// absent or not a directory.
#[pyfunction]
#[pyo3(signature = (census_data_path = None))]
fn configure(census_data_path: Option<PathBuf>) -> PyResult<bool> {
    let config = BridgeConfig {
        census_data_path,
        ..Default::default()
    };
    config.validate().map_err(to_py_err)?;
    Ok(environment::initialize(&config))
}

/// Census directory currently in effect.
#[pyfunction]
fn census_dir() -> PathBuf {
    environment::global_dirs().census().to_path_buf()
}

// ─── Module Registration ────────────────────────────────────────────

/// FPGroup Bridge — finitely presented groups as host-native objects.
///
/// - `BridgeConfig` — configuration
/// - `GroupPresentation` — source presentation with `native()` / `sage()`
/// - `FinitelyPresentedGroup` — native conversion result
/// - `configure()` / `census_dir()` — start-up data directory wiring
#[pymodule]
fn fpgroup_bridge(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyBridgeConfig>()?;
    m.add_class::<PyGroupPresentation>()?;
    m.add_class::<PyFinitelyPresentedGroup>()?;
    m.add_function(wrap_pyfunction!(configure, m)?)?;
    m.add_function(wrap_pyfunction!(census_dir, m)?)?;
    Ok(())
}

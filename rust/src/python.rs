//! PyO3 bindings for the key cache.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::KeysConfig;
use crate::index::KeyIndex;
use crate::keys::Keys;

/// Index accepted from Python: an int of any sign or a str.
#[derive(FromPyObject, Debug)]
pub enum PyKeyIndex {
    Int(i64),
    UInt(u64),
    Str(String),
}

impl From<PyKeyIndex> for KeyIndex<'static> {
    fn from(index: PyKeyIndex) -> Self {
        match index {
            PyKeyIndex::Int(i) => KeyIndex::from(i),
            PyKeyIndex::UInt(u) => KeyIndex::from(u),
            PyKeyIndex::Str(s) => KeyIndex::from(s),
        }
    }
}

#[pymethods]
impl KeysConfig {
    #[new]
    #[pyo3(signature = (batch_size=None, testing=None, testing_prefix=None, verbosity=None))]
    fn py_new(
        batch_size: Option<usize>,
        testing: Option<bool>,
        testing_prefix: Option<String>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            batch_size: batch_size.unwrap_or(defaults.batch_size),
            testing: testing.unwrap_or(defaults.testing),
            testing_prefix: testing_prefix.unwrap_or(defaults.testing_prefix),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "KeysConfig(batch_size={}, testing={}, testing_prefix={:?})",
            self.batch_size, self.testing, self.testing_prefix
        )
    }
}

/// Index-to-token cache (PyO3 wrapper).
#[pyclass(name = "Keys")]
#[derive(Debug)]
pub struct PyKeys {
    inner: Keys,
}

#[pymethods]
impl PyKeys {
    /// Raises ValueError when batch_size is 0.
    #[new]
    #[pyo3(signature = (config=None))]
    fn new(config: Option<KeysConfig>) -> PyResult<Self> {
        let inner = Keys::new(config.unwrap_or_default())
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner })
    }

    fn at(&mut self, index: PyKeyIndex) -> String {
        self.inner.at(index)
    }

    fn contains(&self, index: PyKeyIndex) -> bool {
        self.inner.contains(index)
    }

    /// None once the largest index has been handed out.
    fn next(&mut self) -> Option<String> {
        self.inner.next_key()
    }

    #[getter]
    fn size(&self) -> usize {
        self.inner.size()
    }

    #[getter]
    fn values(&self) -> Vec<String> {
        self.inner.values()
    }

    #[getter]
    fn cache_size(&self) -> usize {
        self.inner.cache_size()
    }

    #[getter]
    fn batch_size(&self) -> usize {
        self.inner.batch_size()
    }

    #[getter]
    fn testing(&self) -> bool {
        self.inner.testing()
    }

    #[getter]
    fn testing_prefix(&self) -> String {
        self.inner.testing_prefix().to_string()
    }

    #[getter]
    fn last_index(&self) -> i128 {
        self.inner.last_index()
    }

    #[getter]
    fn config(&self) -> KeysConfig {
        self.inner.config().clone()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __contains__(&self, index: PyKeyIndex) -> bool {
        self.inner.contains(index)
    }

    fn __repr__(&self) -> String {
        format!(
            "Keys(size={}, batch_size={}, last_index={})",
            self.inner.size(),
            self.inner.batch_size(),
            self.inner.last_index()
        )
    }
}

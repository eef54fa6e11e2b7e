//! Deterministic index-to-token mapping.
//!
//! A [`Keys`] cache hands out a generated token (UUID v4 by default) for any
//! integer or string index, and keeps returning the same token for the same
//! index. Tokens are pre-generated in batches and assigned lazily.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

pub mod config;
pub mod error;
pub mod index;
mod keys;
pub mod logging;
pub mod pool;
#[cfg(feature = "python")]
mod python;

pub use config::{checked_batch_size, KeysConfig, DEFAULT_BATCH_SIZE};
pub use error::KeysError;
pub use index::{hash_code, KeyId, KeyIndex};
pub use keys::Keys;
pub use pool::{TokenGenerator, TokenPool, UuidGenerator};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// The keys_rust Python module.
#[cfg(feature = "python")]
#[pymodule]
fn keys_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<KeysConfig>()?;
    m.add_class::<python::PyKeys>()?;
    Ok(())
}

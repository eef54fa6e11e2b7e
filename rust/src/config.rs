//! Configuration for the key cache.

use std::num::NonZeroUsize;

#[cfg(feature = "python")]
use pyo3::prelude::*;

use crate::error::KeysError;
use crate::logging::VERBOSITY_SILENT;

/// Number of tokens generated per pool refill when none is given.
pub const DEFAULT_BATCH_SIZE: usize = 25;

pub(crate) const DEFAULT_BATCH: NonZeroUsize = match NonZeroUsize::new(DEFAULT_BATCH_SIZE) {
    Some(n) => n,
    None => panic!("DEFAULT_BATCH_SIZE must be positive"),
};

/// Reject a zero batch size, which would leave nothing to draw from.
pub fn checked_batch_size(batch_size: usize) -> Result<NonZeroUsize, KeysError> {
    NonZeroUsize::new(batch_size).ok_or_else(|| {
        KeysError::InvalidConfiguration("batch_size must be positive".to_string())
    })
}

/// Configuration for a [`Keys`](crate::Keys) cache.
#[cfg_attr(feature = "python", pyclass)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeysConfig {
    /// Number of tokens generated per pool refill (must be positive)
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub batch_size: usize,
    /// Echo the normalized index instead of handing out generated tokens
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub testing: bool,
    /// Prepended to the echoed index in testing mode
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub testing_prefix: String,
    /// Logging verbosity (0-3, see `logging`)
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub verbosity: u8,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            testing: false,
            testing_prefix: String::new(),
            verbosity: VERBOSITY_SILENT,
        }
    }
}

impl KeysConfig {
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Switch on testing mode, echoing `prefix + index` from every lookup.
    pub fn with_testing(mut self, prefix: impl Into<String>) -> Self {
        self.testing = true;
        self.testing_prefix = prefix.into();
        self
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Check the configuration before any pool is built.
    pub fn validate(&self) -> Result<(), KeysError> {
        checked_batch_size(self.batch_size).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KeysConfig::default();
        assert_eq!(config.batch_size, 25);
        assert!(!config.testing);
        assert_eq!(config.testing_prefix, "");
        assert_eq!(config.verbosity, VERBOSITY_SILENT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = KeysConfig::default()
            .with_batch_size(5)
            .with_testing("t")
            .with_verbosity(2);
        assert_eq!(config.batch_size, 5);
        assert!(config.testing);
        assert_eq!(config.testing_prefix, "t");
        assert_eq!(config.verbosity, 2);
    }

    #[test]
    fn test_checked_batch_size() {
        assert_eq!(checked_batch_size(5).map(NonZeroUsize::get), Ok(5));
        assert!(checked_batch_size(0).is_err());
        assert_eq!(DEFAULT_BATCH.get(), DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let config = KeysConfig::default().with_batch_size(0);
        assert!(matches!(
            config.validate(),
            Err(KeysError::InvalidConfiguration(_))
        ));
    }
}

//! Error types for key cache construction.

use thiserror::Error;

/// Errors that can occur when building a [`Keys`](crate::Keys) cache.
///
/// Lookups themselves never fail; every index is normalized rather than rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeysError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

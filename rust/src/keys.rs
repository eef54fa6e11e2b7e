//! Index-to-token cache.
//!
//! Maps any index (integer or string) to a generated token. The same
//! normalized index always returns the same token for the lifetime of the
//! cache. Tokens are drawn lazily from a [`TokenPool`] refilled in batches.

use rustc_hash::FxHashMap;

use crate::config::{KeysConfig, DEFAULT_BATCH};
use crate::error::KeysError;
use crate::index::{KeyId, KeyIndex};
use crate::pool::{TokenGenerator, TokenPool, UuidGenerator};
use crate::{log_checks, log_debug};

/// Lazily-populated mapping from index to unique token.
///
/// # Example
///
/// ```
/// use keys_rust::Keys;
///
/// let mut keys = Keys::with_batch_size(5).unwrap();
/// let first = keys.at(0);
/// assert_eq!(keys.at(-99), first);
/// assert_eq!(keys.at("test string 1"), keys.at(3161057047u32));
/// ```
#[derive(Debug)]
pub struct Keys<G = UuidGenerator> {
    config: KeysConfig,
    /// Normalized index -> position in `tokens`.
    assigned: FxHashMap<KeyId, usize>,
    /// Assigned tokens and their ids, in assignment order.
    tokens: Vec<(KeyId, String)>,
    pool: TokenPool<G>,
    /// Highest normalized index seen, `None` before the first lookup.
    last_index: Option<KeyId>,
}

impl Keys<UuidGenerator> {
    /// Create a cache handing out UUID v4 tokens.
    pub fn new(config: KeysConfig) -> Result<Self, KeysError> {
        Self::with_generator(config, UuidGenerator)
    }

    /// Create a UUID cache with default settings and the given batch size.
    pub fn with_batch_size(batch_size: usize) -> Result<Self, KeysError> {
        Self::new(KeysConfig::default().with_batch_size(batch_size))
    }
}

impl Default for Keys<UuidGenerator> {
    fn default() -> Self {
        let pool = TokenPool::filled(DEFAULT_BATCH, UuidGenerator);
        Self::from_parts(KeysConfig::default(), pool)
    }
}

impl<G: TokenGenerator> Keys<G> {
    /// Create a cache drawing tokens from a custom generator.
    ///
    /// Fails with [`KeysError::InvalidConfiguration`] when `batch_size` is 0.
    /// In testing mode the pool is built but never filled.
    pub fn with_generator(config: KeysConfig, generator: G) -> Result<Self, KeysError> {
        let pool = if config.testing {
            TokenPool::unfilled(config.batch_size, generator)?
        } else {
            TokenPool::new(config.batch_size, generator)?
        };
        let pool = pool.with_verbosity(config.verbosity);
        Ok(Self::from_parts(config, pool))
    }

    fn from_parts(config: KeysConfig, pool: TokenPool<G>) -> Self {
        Self {
            config,
            assigned: FxHashMap::default(),
            tokens: Vec::new(),
            pool,
            last_index: None,
        }
    }

    /// Retrieve the token for `index`, assigning one on first use.
    ///
    /// Strings are hashed and negative integers clamp to 0 before lookup.
    /// In testing mode this returns `testing_prefix + index` and assigns
    /// nothing.
    pub fn at<'a>(&mut self, index: impl Into<KeyIndex<'a>>) -> String {
        let id = self.normalize(index.into());
        self.lookup(id)
    }

    /// Retrieve the token following the highest index seen so far.
    ///
    /// Starts at 0 on a fresh cache and continues after gaps left by `at`.
    /// Returns `None` once `KeyId::MAX` has been seen, as no index follows it.
    pub fn next_key(&mut self) -> Option<String> {
        let id = match self.last_index {
            None => 0,
            Some(last) => last.checked_add(1)?,
        };
        Some(self.at(id))
    }

    /// Whether `index` already has an assigned token.
    ///
    /// Always false in testing mode, since testing lookups assign nothing.
    pub fn contains<'a>(&self, index: impl Into<KeyIndex<'a>>) -> bool {
        self.assigned.contains_key(&index.into().normalize())
    }

    /// Assigned token for `index`, without assigning or moving `last_index`.
    pub fn get<'a>(&self, index: impl Into<KeyIndex<'a>>) -> Option<&str> {
        self.assigned
            .get(&index.into().normalize())
            .map(|&pos| self.tokens[pos].1.as_str())
    }

    fn normalize(&mut self, index: KeyIndex<'_>) -> KeyId {
        let id = index.normalize();
        log_debug!(self.config.verbosity, ?index, id, "normalized index");
        self.last_index = Some(self.last_index.map_or(id, |last| last.max(id)));
        id
    }

    fn lookup(&mut self, id: KeyId) -> String {
        if self.config.testing {
            return format!("{}{}", self.config.testing_prefix, id);
        }

        if let Some(&pos) = self.assigned.get(&id) {
            return self.tokens[pos].1.clone();
        }

        let token = self.pool.draw();
        log_checks!(
            self.config.verbosity,
            id,
            %token,
            remaining = self.pool.remaining(),
            "assigned token"
        );
        self.assigned.insert(id, self.tokens.len());
        self.tokens.push((id, token.clone()));
        token
    }

    /// Number of distinct indices with an assigned token.
    pub fn size(&self) -> usize {
        self.tokens.len()
    }

    pub fn len(&self) -> usize {
        self.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Snapshot of all assigned tokens, in assignment order.
    pub fn values(&self) -> Vec<String> {
        self.tokens.iter().map(|(_, token)| token.clone()).collect()
    }

    /// Iterate `(id, token)` pairs in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (KeyId, &str)> + '_ {
        self.tokens.iter().map(|(id, token)| (*id, token.as_str()))
    }

    /// Number of tokens generated per pool refill.
    pub fn cache_size(&self) -> usize {
        self.pool.batch_size()
    }

    pub fn batch_size(&self) -> usize {
        self.pool.batch_size()
    }

    pub fn testing(&self) -> bool {
        self.config.testing
    }

    pub fn testing_prefix(&self) -> &str {
        &self.config.testing_prefix
    }

    /// Highest normalized index looked up so far, or -1 before any lookup.
    ///
    /// Widened to `i128` so every `KeyId` and the -1 sentinel fit.
    pub fn last_index(&self) -> i128 {
        self.last_index.map_or(-1, i128::from)
    }

    /// Pool refills performed since construction (the initial fill excluded).
    pub fn refills(&self) -> usize {
        self.pool.refills()
    }

    pub fn config(&self) -> &KeysConfig {
        &self.config
    }
}

/// Sequence of [`Keys::next_key`] tokens, ending after `KeyId::MAX`.
impl<G: TokenGenerator> Iterator for Keys<G> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.next_key()
    }
}

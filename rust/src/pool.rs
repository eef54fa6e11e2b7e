//! Pool of pre-generated tokens, refilled one batch at a time.

use std::num::NonZeroUsize;

use uuid::Uuid;

use crate::config::checked_batch_size;
use crate::error::KeysError;
use crate::log_changes;
use crate::logging::VERBOSITY_SILENT;

/// Source of fresh tokens.
///
/// Each call must return a non-empty string; uniqueness is the generator's own
/// guarantee and is not checked by the pool.
pub trait TokenGenerator {
    fn generate(&mut self) -> String;
}

/// Random UUID v4 tokens in lowercase hyphenated form (36 chars).
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl TokenGenerator for UuidGenerator {
    fn generate(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

impl<F> TokenGenerator for F
where
    F: FnMut() -> String,
{
    fn generate(&mut self) -> String {
        self()
    }
}

/// Dense batch of unused tokens plus a cursor to the next unused slot.
#[derive(Debug)]
pub struct TokenPool<G> {
    tokens: Vec<String>,
    cursor: usize,
    batch_size: NonZeroUsize,
    generator: G,
    /// Refills performed after the initial fill.
    refills: usize,
    verbosity: u8,
}

impl<G: TokenGenerator> TokenPool<G> {
    /// Build a pool and fill it with one full batch.
    ///
    /// Fails with [`KeysError::InvalidConfiguration`] when `batch_size` is 0.
    pub fn new(batch_size: usize, generator: G) -> Result<Self, KeysError> {
        Ok(Self::filled(checked_batch_size(batch_size)?, generator))
    }

    /// Build a pool without generating anything.
    ///
    /// The cursor starts exhausted, so the first draw triggers a fill.
    pub fn unfilled(batch_size: usize, generator: G) -> Result<Self, KeysError> {
        Ok(Self::empty(checked_batch_size(batch_size)?, generator))
    }

    pub(crate) fn filled(batch_size: NonZeroUsize, generator: G) -> Self {
        let mut pool = Self::empty(batch_size, generator);
        pool.fill();
        pool
    }

    pub(crate) fn empty(batch_size: NonZeroUsize, generator: G) -> Self {
        Self {
            tokens: Vec::with_capacity(batch_size.get()),
            cursor: batch_size.get(),
            batch_size,
            generator,
            refills: 0,
            verbosity: VERBOSITY_SILENT,
        }
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Replace the pool contents with `batch_size` fresh tokens and rewind.
    pub fn fill(&mut self) {
        let generator = &mut self.generator;
        self.tokens.clear();
        self.tokens
            .extend((0..self.batch_size.get()).map(|_| generator.generate()));
        self.cursor = 0;
    }

    /// Take the next unused token, refilling first if the batch is used up.
    pub fn draw(&mut self) -> String {
        if self.cursor >= self.tokens.len() {
            self.fill();
            self.refills += 1;
            log_changes!(
                self.verbosity,
                refills = self.refills,
                batch_size = self.batch_size.get(),
                "token pool refilled"
            );
        }
        // A fill always leaves batch_size >= 1 tokens behind the cursor
        let token = std::mem::take(&mut self.tokens[self.cursor]);
        self.cursor += 1;
        token
    }

    /// Unused tokens left in the current batch.
    pub fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.cursor)
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size.get()
    }

    pub fn refills(&self) -> usize {
        self.refills
    }
}

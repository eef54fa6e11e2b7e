//! Index normalization.
//!
//! Any integer or string is accepted as an index. Strings are hashed to an
//! integer, and negative integers clamp to 0, so every lookup ends up on a
//! non-negative [`KeyId`].

use std::borrow::Cow;

/// Normalized index (always non-negative).
pub type KeyId = u64;

/// Raw index passed to a lookup, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyIndex<'a> {
    Int(i64),
    /// Unsigned input, kept whole so it can span the full `KeyId` range.
    UInt(u64),
    Str(Cow<'a, str>),
}

impl KeyIndex<'_> {
    /// Resolve to a non-negative id: hash strings, clamp negatives to 0.
    pub fn normalize(&self) -> KeyId {
        match self {
            KeyIndex::Int(i) => clamp(*i),
            KeyIndex::UInt(u) => *u,
            KeyIndex::Str(s) => KeyId::from(hash_code(s)),
        }
    }
}

#[inline]
fn clamp(raw: i64) -> KeyId {
    // max(0) makes the conversion infallible
    raw.max(0) as KeyId
}

/// Deterministic string hash (djb2, xor variant) over UTF-16 code units.
///
/// Output is unsigned, so it never needs the negative clamp.
pub fn hash_code(s: &str) -> u32 {
    s.encode_utf16()
        .fold(5381u32, |h, unit| h.wrapping_mul(33) ^ u32::from(unit))
}

impl From<i64> for KeyIndex<'_> {
    fn from(i: i64) -> Self {
        KeyIndex::Int(i)
    }
}

impl From<i32> for KeyIndex<'_> {
    fn from(i: i32) -> Self {
        KeyIndex::Int(i64::from(i))
    }
}

impl From<u32> for KeyIndex<'_> {
    fn from(i: u32) -> Self {
        KeyIndex::Int(i64::from(i))
    }
}

impl From<u64> for KeyIndex<'_> {
    fn from(i: u64) -> Self {
        KeyIndex::UInt(i)
    }
}

impl From<usize> for KeyIndex<'_> {
    fn from(i: usize) -> Self {
        // usize is at most 64 bits on every supported target
        KeyIndex::UInt(i as u64)
    }
}

impl<'a> From<&'a str> for KeyIndex<'a> {
    fn from(s: &'a str) -> Self {
        KeyIndex::Str(Cow::Borrowed(s))
    }
}

impl<'a> From<&'a String> for KeyIndex<'a> {
    fn from(s: &'a String) -> Self {
        KeyIndex::Str(Cow::Borrowed(s.as_str()))
    }
}

impl From<String> for KeyIndex<'_> {
    fn from(s: String) -> Self {
        KeyIndex::Str(Cow::Owned(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_code_reference_value() {
        assert_eq!(hash_code("test string 1"), 3161057047);
    }

    #[test]
    fn test_hash_code_empty_string_is_seed() {
        assert_eq!(hash_code(""), 5381);
    }

    #[test]
    fn test_hash_code_deterministic() {
        assert_eq!(hash_code("abc"), hash_code("abc"));
        assert_ne!(hash_code("abc"), hash_code("abd"));
    }

    #[test]
    fn test_negative_clamps_to_zero() {
        assert_eq!(KeyIndex::from(-1).normalize(), 0);
        assert_eq!(KeyIndex::from(-99i64).normalize(), 0);
        assert_eq!(KeyIndex::from(i64::MIN).normalize(), 0);
    }

    #[test]
    fn test_positive_passes_through() {
        assert_eq!(KeyIndex::from(0).normalize(), 0);
        assert_eq!(KeyIndex::from(255).normalize(), 255);
        assert_eq!(KeyIndex::from(7usize).normalize(), 7);
    }

    #[test]
    fn test_string_normalizes_to_hash() {
        let owned = String::from("test string 1");
        assert_eq!(KeyIndex::from("test string 1").normalize(), 3161057047);
        assert_eq!(KeyIndex::from(&owned).normalize(), 3161057047);
        assert_eq!(KeyIndex::from(owned).normalize(), 3161057047);
    }

    #[test]
    fn test_unsigned_keeps_full_range() {
        assert_eq!(KeyIndex::from(u64::MAX).normalize(), u64::MAX);
        assert_eq!(KeyIndex::from(u64::MAX - 1).normalize(), u64::MAX - 1);
        assert_ne!(
            KeyIndex::from(u64::MAX).normalize(),
            KeyIndex::from(i64::MAX).normalize()
        );
    }
}

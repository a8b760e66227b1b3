use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Alphabet used for identifier rendering: digits then lowercase letters.
pub const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Compact, user-facing identifier: a non-empty lowercase base-36 string.
///
/// A `ShortId` is what appears in share links. It is distinct from the
/// content digest: digests address bytes, short ids address records. Ids are
/// variable-length — the allocator hands out the shortest ids first and the
/// length grows over time as a namespace fills up. Once assigned to a record,
/// an id is immutable.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortId(String);

impl ShortId {
    /// Validate and wrap an identifier string.
    ///
    /// Accepts only non-empty strings over `[0-9a-z]`.
    pub fn new(s: impl Into<String>) -> Result<Self, TypeError> {
        let s = s.into();
        if s.is_empty() {
            return Err(TypeError::EmptyShortId);
        }
        if let Some(ch) = s.chars().find(|c| !c.is_ascii_digit() && !c.is_ascii_lowercase()) {
            return Err(TypeError::InvalidShortIdChar { ch });
        }
        Ok(Self(s))
    }

    /// Render a numeric value as a base-36 identifier.
    pub fn from_u128(mut value: u128) -> Self {
        if value == 0 {
            return Self("0".to_string());
        }
        let mut buf = Vec::new();
        while value > 0 {
            buf.push(ALPHABET[(value % 36) as usize]);
            value /= 36;
        }
        buf.reverse();
        // The alphabet is pure ASCII, so the buffer is valid UTF-8.
        Self(String::from_utf8(buf).expect("base-36 rendering is ASCII"))
    }

    /// Numeric value of this identifier.
    ///
    /// Returns an error for identifiers too long to fit in a `u128`
    /// (more than 24 characters).
    pub fn value(&self) -> Result<u128, TypeError> {
        u128::from_str_radix(&self.0, 36).map_err(|_| TypeError::ShortIdOverflow {
            id: self.0.clone(),
        })
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`: empty identifiers are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ShortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShortId({})", self.0)
    }
}

impl fmt::Display for ShortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ShortId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ShortId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_lowercase_base36() {
        for s in ["g", "4", "10", "zz", "a1b2c3"] {
            assert!(ShortId::new(s).is_ok(), "{s} should be valid");
        }
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(ShortId::new(""), Err(TypeError::EmptyShortId)));
    }

    #[test]
    fn rejects_uppercase_and_symbols() {
        for s in ["G", "a-b", "a_b", "a b", "ab!"] {
            assert!(ShortId::new(s).is_err(), "{s} should be rejected");
        }
    }

    #[test]
    fn from_u128_known_values() {
        assert_eq!(ShortId::from_u128(0).as_str(), "0");
        assert_eq!(ShortId::from_u128(4).as_str(), "4");
        assert_eq!(ShortId::from_u128(16).as_str(), "g");
        assert_eq!(ShortId::from_u128(35).as_str(), "z");
        assert_eq!(ShortId::from_u128(36).as_str(), "10");
        assert_eq!(ShortId::from_u128(1295).as_str(), "zz");
    }

    #[test]
    fn value_roundtrip() {
        let id = ShortId::from_u128(123_456_789);
        assert_eq!(id.value().unwrap(), 123_456_789);
    }

    #[test]
    fn display_is_raw_string() {
        let id = ShortId::new("g4z").unwrap();
        assert_eq!(format!("{id}"), "g4z");
        assert_eq!(format!("{id:?}"), "ShortId(g4z)");
    }

    #[test]
    fn serde_is_transparent() {
        let id = ShortId::new("g").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"g\"");
        let parsed: ShortId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    proptest! {
        #[test]
        fn from_u128_always_valid_and_roundtrips(value in 0u128..u64::MAX as u128) {
            let id = ShortId::from_u128(value);
            prop_assert!(ShortId::new(id.as_str()).is_ok());
            prop_assert_eq!(id.value().unwrap(), value);
        }
    }
}

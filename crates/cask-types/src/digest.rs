use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::TypeError;

/// Content digest of a stored payload.
///
/// A `ContentDigest` is the BLAKE3 hash of a payload's bytes, domain-separated
/// by [`Category`]. Identical payloads always produce the same digest within a
/// category, which is what makes deduplication possible: the digest, not the
/// short id, is the canonical identity of the bytes.
///
/// The digest algorithm is part of the on-disk format. Changing it (or the
/// per-category domain tags) invalidates every existing digest index.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Compute the digest of a payload within a category.
    pub fn of(category: Category, payload: &[u8]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(category.digest_domain().as_bytes());
        hasher.update(b":");
        hasher.update(payload);
        Self(*hasher.finalize().as_bytes())
    }

    /// Wrap a pre-computed 32-byte hash.
    pub fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    /// The raw 32-byte hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string (64 hex characters).
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Verify that `payload` hashes to this digest within `category`.
    pub fn verify(&self, category: Category, payload: &[u8]) -> bool {
        Self::of(category, payload) == *self
    }
}

impl fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentDigest({})", self.short_hex())
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

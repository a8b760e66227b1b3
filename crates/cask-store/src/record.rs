use serde::{Deserialize, Serialize};

use cask_types::{Category, ContentDigest, ShortId, Timestamp};

/// One deduplicated payload within a category namespace.
///
/// A record is created exactly once, by the first caller to submit its
/// payload, and never mutated afterwards. The category itself is not part of
/// the record — it is the namespace the record lives in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Short identifier assigned at insertion. Immutable once assigned.
    pub id: ShortId,
    /// Domain-separated digest of `payload`. Unique within the category.
    pub digest: ContentDigest,
    /// The stored bytes, exactly as submitted.
    pub payload: Vec<u8>,
    /// When the record was created.
    pub created_at: Timestamp,
}

impl ContentRecord {
    /// Build a record for a payload, computing its digest for `category`.
    pub fn new(category: Category, id: ShortId, payload: Vec<u8>) -> Self {
        let digest = ContentDigest::of(category, &payload);
        Self {
            id,
            digest,
            payload,
            created_at: Timestamp::now(),
        }
    }

    /// Payload size in bytes.
    pub fn size(&self) -> u64 {
        self.payload.len() as u64
    }
}

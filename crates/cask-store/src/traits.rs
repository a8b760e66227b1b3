use cask_types::{Category, ContentDigest, ShortId};

use crate::error::StoreResult;
use crate::record::ContentRecord;

/// Result of an attempted record insertion.
///
/// The two duplicate variants are not failures: they are the signal the
/// retry loop in [`ContentStore`](crate::store::ContentStore) branches on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The record was inserted; its id is now assigned.
    Inserted,
    /// A record with the same digest already exists — a concurrent (or
    /// earlier) writer stored the same payload. Deduplicate to its id.
    DuplicateDigest {
        /// Identifier of the record that won.
        existing: ShortId,
    },
    /// A record with the same id already exists — the candidate collided.
    /// Reallocate and retry.
    DuplicateId,
}

/// Storage backend for content records.
///
/// All implementations must satisfy these invariants:
/// - `try_insert` enforces both per-category uniqueness constraints (digest
///   and id) **atomically at the insertion layer**. Callers never pre-check
///   existence and then insert — under concurrent writers that sequence
///   races; the tagged [`InsertOutcome`] is the only safe protocol.
/// - Records are immutable once inserted.
/// - Reads never observe a partially inserted record.
/// - Backend failures other than the two duplicate outcomes are propagated
///   as errors, never folded into an outcome.
pub trait ContentBackend: Send + Sync {
    /// Attempt to insert a record into a category namespace.
    fn try_insert(&self, category: Category, record: &ContentRecord) -> StoreResult<InsertOutcome>;

    /// Read a record by id. Returns `Ok(None)` if absent. No side effects.
    fn get(&self, category: Category, id: &ShortId) -> StoreResult<Option<ContentRecord>>;

    /// Look up the id assigned to a digest, if any.
    fn find_by_digest(
        &self,
        category: Category,
        digest: &ContentDigest,
    ) -> StoreResult<Option<ShortId>>;

    /// Number of records in a category.
    fn count(&self, category: Category) -> StoreResult<u64>;
}

use std::collections::HashMap;
use std::sync::RwLock;

use cask_types::{Category, ContentDigest, ShortId};

use crate::error::StoreResult;
use crate::record::ContentRecord;
use crate::traits::{ContentBackend, InsertOutcome};

/// Per-category indexes: records by id, plus the digest-to-id map that
/// backs deduplication.
#[derive(Default)]
struct Namespace {
    by_id: HashMap<ShortId, ContentRecord>,
    by_digest: HashMap<ContentDigest, ShortId>,
}

/// In-memory, `HashMap`-based content backend.
///
/// Intended for tests and embedding. Each category namespace sits behind its
/// own `RwLock`, so the uniqueness checks and the insertion happen under one
/// write guard — the atomicity `try_insert` requires.
pub struct InMemoryContentBackend {
    namespaces: [RwLock<Namespace>; 2],
}

impl InMemoryContentBackend {
    /// Create a new empty backend.
    pub fn new() -> Self {
        Self {
            namespaces: [RwLock::new(Namespace::default()), RwLock::new(Namespace::default())],
        }
    }

    fn namespace(&self, category: Category) -> &RwLock<Namespace> {
        &self.namespaces[category.index()]
    }

    /// Total bytes stored in a category.
    pub fn total_bytes(&self, category: Category) -> u64 {
        let ns = self.namespace(category).read().expect("lock poisoned");
        ns.by_id.values().map(ContentRecord::size).sum()
    }
}

impl Default for InMemoryContentBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentBackend for InMemoryContentBackend {
    fn try_insert(&self, category: Category, record: &ContentRecord) -> StoreResult<InsertOutcome> {
        let mut ns = self.namespace(category).write().expect("lock poisoned");

        // Digest first: re-submitting existing content deduplicates even if
        // the candidate id also happens to collide.
        if let Some(existing) = ns.by_digest.get(&record.digest) {
            return Ok(InsertOutcome::DuplicateDigest {
                existing: existing.clone(),
            });
        }
        if ns.by_id.contains_key(&record.id) {
            return Ok(InsertOutcome::DuplicateId);
        }

        ns.by_digest.insert(record.digest, record.id.clone());
        ns.by_id.insert(record.id.clone(), record.clone());
        Ok(InsertOutcome::Inserted)
    }

    fn get(&self, category: Category, id: &ShortId) -> StoreResult<Option<ContentRecord>> {
        let ns = self.namespace(category).read().expect("lock poisoned");
        Ok(ns.by_id.get(id).cloned())
    }

    fn find_by_digest(
        &self,
        category: Category,
        digest: &ContentDigest,
    ) -> StoreResult<Option<ShortId>> {
        let ns = self.namespace(category).read().expect("lock poisoned");
        Ok(ns.by_digest.get(digest).cloned())
    }

    fn count(&self, category: Category) -> StoreResult<u64> {
        let ns = self.namespace(category).read().expect("lock poisoned");
        Ok(ns.by_id.len() as u64)
    }
}

impl std::fmt::Debug for InMemoryContentBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("InMemoryContentBackend");
        for category in Category::ALL {
            let ns = self.namespace(category).read().expect("lock poisoned");
            s.field(category.as_str(), &ns.by_id.len());
        }
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: Category, id: &str, payload: &[u8]) -> ContentRecord {
        ContentRecord::new(category, ShortId::new(id).unwrap(), payload.to_vec())
    }

    #[test]
    fn insert_and_get_roundtrip() {
        let backend = InMemoryContentBackend::new();
        let rec = record(Category::Metadata, "g", b"hello");
        assert_eq!(
            backend.try_insert(Category::Metadata, &rec).unwrap(),
            InsertOutcome::Inserted
        );

        let read = backend
            .get(Category::Metadata, &rec.id)
            .unwrap()
            .expect("should exist");
        assert_eq!(read, rec);
    }

    #[test]
    fn duplicate_digest_reports_winner() {
        let backend = InMemoryContentBackend::new();
        let first = record(Category::Metadata, "g", b"same bytes");
        let second = record(Category::Metadata, "h", b"same bytes");

        backend.try_insert(Category::Metadata, &first).unwrap();
        let outcome = backend.try_insert(Category::Metadata, &second).unwrap();
        assert_eq!(
            outcome,
            InsertOutcome::DuplicateDigest {
                existing: first.id.clone()
            }
        );
        assert_eq!(backend.count(Category::Metadata).unwrap(), 1);
    }

    #[test]
    fn duplicate_id_is_flagged() {
        let backend = InMemoryContentBackend::new();
        backend
            .try_insert(Category::Roles, &record(Category::Roles, "g", b"one"))
            .unwrap();
        let outcome = backend
            .try_insert(Category::Roles, &record(Category::Roles, "g", b"two"))
            .unwrap();
        assert_eq!(outcome, InsertOutcome::DuplicateId);
        assert_eq!(backend.count(Category::Roles).unwrap(), 1);
    }

    #[test]
    fn categories_are_independent_namespaces() {
        let backend = InMemoryContentBackend::new();
        backend
            .try_insert(Category::Metadata, &record(Category::Metadata, "g", b"data"))
            .unwrap();

        // Same id and same bytes in the other category: no conflict.
        let outcome = backend
            .try_insert(Category::Roles, &record(Category::Roles, "g", b"data"))
            .unwrap();
        assert_eq!(outcome, InsertOutcome::Inserted);
    }

    #[test]
    fn get_missing_returns_none() {
        let backend = InMemoryContentBackend::new();
        let id = ShortId::new("zz").unwrap();
        assert!(backend.get(Category::Metadata, &id).unwrap().is_none());
    }

    #[test]
    fn find_by_digest() {
        let backend = InMemoryContentBackend::new();
        let rec = record(Category::Metadata, "g", b"find me");
        backend.try_insert(Category::Metadata, &rec).unwrap();

        assert_eq!(
            backend
                .find_by_digest(Category::Metadata, &rec.digest)
                .unwrap(),
            Some(rec.id.clone())
        );
        // Same digest value does not exist in the other category.
        assert!(backend
            .find_by_digest(Category::Roles, &rec.digest)
            .unwrap()
            .is_none());
    }

    #[test]
    fn total_bytes_sums_payloads() {
        let backend = InMemoryContentBackend::new();
        backend
            .try_insert(Category::Metadata, &record(Category::Metadata, "a", b"12345"))
            .unwrap();
        backend
            .try_insert(Category::Metadata, &record(Category::Metadata, "b", b"123456789"))
            .unwrap();
        assert_eq!(backend.total_bytes(Category::Metadata), 14);
    }
}

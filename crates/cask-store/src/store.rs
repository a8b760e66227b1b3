use std::sync::Arc;

use tracing::{debug, warn};

use cask_alloc::IdAllocator;
use cask_types::{Category, ContentDigest, ShortId};

use crate::error::{StoreError, StoreResult};
use crate::record::ContentRecord;
use crate::traits::{ContentBackend, InsertOutcome};

/// Insertion attempts per `store` call before giving up.
const MAX_INSERT_ATTEMPTS: u32 = 10;

/// Consecutive id collisions that trigger length growth.
const COLLISIONS_BEFORE_GROWTH: u32 = 3;

/// The deduplicating content store.
///
/// `ContentStore` ties a [`ContentBackend`] to an [`IdAllocator`]: payloads
/// are deduplicated by digest, new payloads get a freshly minted short id,
/// and id collisions drive the allocator's length-growth policy. The store is
/// safe to call from concurrent threads; conflicting writers are resolved by
/// the backend's atomic insert, not by locking here.
pub struct ContentStore {
    backend: Arc<dyn ContentBackend>,
    allocator: IdAllocator,
}

impl ContentStore {
    /// Create a store over a backend and an allocator.
    pub fn new(backend: Arc<dyn ContentBackend>, allocator: IdAllocator) -> Self {
        Self { backend, allocator }
    }

    /// Store a payload, returning its identifier.
    ///
    /// Identical payloads always resolve to the same identifier, whether
    /// submitted sequentially or by concurrent callers. A duplicate-id
    /// collision reallocates; after [`COLLISIONS_BEFORE_GROWTH`] consecutive
    /// collisions the category's identifier length grows (durably) and the
    /// streak resets, so later candidates come from the next, 36x larger
    /// tier. After [`MAX_INSERT_ATTEMPTS`] failed insertions the call fails
    /// with [`StoreError::AllocationExhausted`].
    pub fn store(&self, category: Category, payload: Vec<u8>) -> StoreResult<ShortId> {
        let digest = ContentDigest::of(category, &payload);

        // Fast path: the payload is already stored. The insert loop below
        // still handles the case where a concurrent writer lands it between
        // this lookup and our insert.
        if let Some(existing) = self.backend.find_by_digest(category, &digest)? {
            debug!(category = %category, id = %existing, "payload deduplicated");
            return Ok(existing);
        }

        let mut record = ContentRecord::new(category, self.allocator.allocate(category), payload);
        let mut collision_streak = 0u32;

        for attempt in 1..=MAX_INSERT_ATTEMPTS {
            match self.backend.try_insert(category, &record)? {
                InsertOutcome::Inserted => {
                    debug!(category = %category, id = %record.id, attempt, "record inserted");
                    return Ok(record.id);
                }
                InsertOutcome::DuplicateDigest { existing } => {
                    // A concurrent writer stored the same payload first.
                    // Same deduplication guarantee as the fast path.
                    debug!(category = %category, id = %existing, "concurrent writer won, deduplicated");
                    return Ok(existing);
                }
                InsertOutcome::DuplicateId => {
                    collision_streak += 1;
                    if collision_streak >= COLLISIONS_BEFORE_GROWTH {
                        let length = self.allocator.grow(category)?;
                        warn!(category = %category, length, "id tier contended, length grown");
                        collision_streak = 0;
                    }
                    record.id = self.allocator.allocate(category);
                }
            }
        }

        Err(StoreError::AllocationExhausted {
            category,
            attempts: MAX_INSERT_ATTEMPTS,
        })
    }

    /// Read a record by id. Pure lookup: `Ok(None)` if absent.
    pub fn fetch(&self, category: Category, id: &ShortId) -> StoreResult<Option<ContentRecord>> {
        self.backend.get(category, id)
    }

    /// Number of records in a category.
    pub fn count(&self, category: Category) -> StoreResult<u64> {
        self.backend.count(category)
    }

    /// Current identifier length for a category.
    pub fn current_length(&self, category: Category) -> u32 {
        self.allocator.current_length(category)
    }
}

impl std::fmt::Debug for ContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentStore").finish_non_exhaustive()
    }
}

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::RwLock;

use tracing::{info, warn};

use cask_alloc::tier::MAX_LENGTH;
use cask_alloc::{ConfigError, LengthConfig};
use cask_links::{LinkRecord, LinkResult, LinkStore};
use cask_store::{ContentBackend, ContentRecord, InsertOutcome, StoreResult};
use cask_types::{Category, ContentDigest, ShortId};

use crate::error::JournalResult;
use crate::event::JournalEvent;
use crate::journal::{Journal, JournalConfig, SyncMode};

/// Per-category content indexes rebuilt from the journal.
#[derive(Default)]
struct Namespace {
    by_id: HashMap<ShortId, ContentRecord>,
    by_digest: HashMap<ContentDigest, ShortId>,
}

/// All replayed state behind one lock.
#[derive(Default)]
struct State {
    content: [Namespace; 2],
    links: HashMap<(ShortId, ShortId), LinkRecord>,
}

/// Durable store: one journal file plus in-memory indexes replayed from it.
///
/// `DurableStore` implements all three storage contracts — [`ContentBackend`],
/// [`LinkStore`], and [`LengthConfig`] — over a single journal, mirroring the
/// "one shared durable store" the system runs on. Writes append to the
/// journal *before* updating the indexes, and both steps happen under the
/// state write guard, so the per-category uniqueness constraints are enforced
/// atomically at the insertion layer. Reads only take the read guard.
pub struct DurableStore {
    journal: Journal,
    state: RwLock<State>,
    /// Cached length counters; reads must be infallible.
    lengths: [AtomicU32; 2],
}

impl DurableStore {
    /// Open (or create) a durable store, fsyncing every write.
    pub fn open(path: &Path) -> JournalResult<Self> {
        Self::open_with_config(
            path,
            JournalConfig {
                sync_mode: SyncMode::EveryWrite,
            },
        )
    }

    /// Open with an explicit journal configuration.
    pub fn open_with_config(path: &Path, config: JournalConfig) -> JournalResult<Self> {
        let journal = Journal::open(path, config)?;
        let events = journal.recover()?;

        let mut state = State::default();
        let mut lengths = [1u32; 2];

        for event in events {
            match event {
                JournalEvent::ContentInserted { category, record } => {
                    let ns = &mut state.content[category.index()];
                    if ns.by_digest.contains_key(&record.digest)
                        || ns.by_id.contains_key(&record.id)
                    {
                        // Should not occur in a journal written by this
                        // store; keep the first writer.
                        warn!(category = %category, id = %record.id, "duplicate content entry in journal; keeping first");
                        continue;
                    }
                    ns.by_digest.insert(record.digest, record.id.clone());
                    ns.by_id.insert(record.id.clone(), record);
                }
                JournalEvent::LinkInserted { record } => {
                    let key = (record.metadata_id.clone(), record.roles_id.clone());
                    state.links.entry(key).or_insert(record);
                }
                JournalEvent::LengthGrown { category } => {
                    let length = &mut lengths[category.index()];
                    *length = (*length + 1).min(MAX_LENGTH);
                }
            }
        }

        let record_count: usize = state.content.iter().map(|ns| ns.by_id.len()).sum();
        info!(
            path = %path.display(),
            records = record_count,
            links = state.links.len(),
            "durable store opened"
        );

        Ok(Self {
            journal,
            state: RwLock::new(state),
            lengths: lengths.map(AtomicU32::new),
        })
    }

    /// Path to the backing journal file.
    pub fn path(&self) -> &Path {
        self.journal.path()
    }
}

impl ContentBackend for DurableStore {
    fn try_insert(&self, category: Category, record: &ContentRecord) -> StoreResult<InsertOutcome> {
        let mut state = self.state.write().expect("lock poisoned");
        let ns = &mut state.content[category.index()];

        if let Some(existing) = ns.by_digest.get(&record.digest) {
            return Ok(InsertOutcome::DuplicateDigest {
                existing: existing.clone(),
            });
        }
        if ns.by_id.contains_key(&record.id) {
            return Ok(InsertOutcome::DuplicateId);
        }

        // Journal first: the record is durable before any reader can see it.
        self.journal.append(&JournalEvent::ContentInserted {
            category,
            record: record.clone(),
        })?;

        ns.by_digest.insert(record.digest, record.id.clone());
        ns.by_id.insert(record.id.clone(), record.clone());
        Ok(InsertOutcome::Inserted)
    }

    fn get(&self, category: Category, id: &ShortId) -> StoreResult<Option<ContentRecord>> {
        let state = self.state.read().expect("lock poisoned");
        Ok(state.content[category.index()].by_id.get(id).cloned())
    }

    fn find_by_digest(
        &self,
        category: Category,
        digest: &ContentDigest,
    ) -> StoreResult<Option<ShortId>> {
        let state = self.state.read().expect("lock poisoned");
        Ok(state.content[category.index()].by_digest.get(digest).cloned())
    }

    fn count(&self, category: Category) -> StoreResult<u64> {
        let state = self.state.read().expect("lock poisoned");
        Ok(state.content[category.index()].by_id.len() as u64)
    }
}

impl LinkStore for DurableStore {
    fn link(&self, metadata_id: &ShortId, roles_id: &ShortId) -> LinkResult<bool> {
        let mut state = self.state.write().expect("lock poisoned");
        let key = (metadata_id.clone(), roles_id.clone());
        if state.links.contains_key(&key) {
            return Ok(false);
        }

        let record = LinkRecord::new(metadata_id.clone(), roles_id.clone());
        self.journal.append(&JournalEvent::LinkInserted {
            record: record.clone(),
        })?;

        state.links.insert(key, record);
        Ok(true)
    }

    fn is_linked(&self, metadata_id: &ShortId, roles_id: &ShortId) -> LinkResult<bool> {
        let state = self.state.read().expect("lock poisoned");
        Ok(state
            .links
            .contains_key(&(metadata_id.clone(), roles_id.clone())))
    }

    fn count(&self) -> LinkResult<u64> {
        let state = self.state.read().expect("lock poisoned");
        Ok(state.links.len() as u64)
    }

    fn links_for_metadata(&self, metadata_id: &ShortId) -> LinkResult<Vec<ShortId>> {
        let state = self.state.read().expect("lock poisoned");
        let mut ids: Vec<ShortId> = state
            .links
            .keys()
            .filter(|(m, _)| m == metadata_id)
            .map(|(_, r)| r.clone())
            .collect();
        ids.sort();
        Ok(ids)
    }
}

impl LengthConfig for DurableStore {
    fn current_length(&self, category: Category) -> u32 {
        self.lengths[category.index()].load(Ordering::SeqCst)
    }

    fn grow(&self, category: Category) -> Result<u32, ConfigError> {
        // Growth is a relative event: the journal records "grew by one", and
        // the write guard serializes concurrent growers, so two growth events
        // can never collapse into one.
        let _guard = self.state.write().expect("lock poisoned");

        let counter = &self.lengths[category.index()];
        let current = counter.load(Ordering::SeqCst);
        if current >= MAX_LENGTH {
            warn!(category = %category, "identifier length limit reached");
            return Ok(MAX_LENGTH);
        }

        self.journal.append(&JournalEvent::LengthGrown { category })?;
        let new = current + 1;
        counter.store(new, Ordering::SeqCst);
        Ok(new)
    }
}

impl std::fmt::Debug for DurableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read().expect("lock poisoned");
        f.debug_struct("DurableStore")
            .field("path", &self.journal.path())
            .field("metadata_records", &state.content[0].by_id.len())
            .field("roles_records", &state.content[1].by_id.len())
            .field("links", &state.links.len())
            .finish()
    }
}

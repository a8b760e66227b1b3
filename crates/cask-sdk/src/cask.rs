use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use cask_alloc::{IdAllocator, InMemoryLengthConfig, LengthConfig};
use cask_journal::DurableStore;
use cask_links::{InMemoryLinkStore, LinkStore};
use cask_store::{ContentBackend, ContentStore, InMemoryContentBackend};
use cask_types::{Category, ShortId};

use crate::error::{SdkError, SdkResult};
use crate::script::{Script, ScriptRef};

/// The Cask context object.
///
/// Holds the content store, allocator, and link registry for one underlying
/// store. All operations are short, blocking, and safe to call from
/// concurrent threads; a `Cask` is usually shared behind an `Arc`.
pub struct Cask {
    content: ContentStore,
    links: Arc<dyn LinkStore>,
}

/// Counters reported by [`Cask::stats`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaskStats {
    pub metadata_records: u64,
    pub roles_records: u64,
    pub links: u64,
    pub metadata_id_length: u32,
    pub roles_id_length: u32,
}

impl Cask {
    /// Open (or create) a durable store backed by a journal file.
    pub fn open(path: &Path) -> SdkResult<Self> {
        let durable = Arc::new(DurableStore::open(path)?);
        Ok(Self::with_parts(
            durable.clone(),
            durable.clone(),
            durable,
        ))
    }

    /// Create an ephemeral in-memory store (tests, embedding).
    pub fn in_memory() -> Self {
        Self::with_parts(
            Arc::new(InMemoryContentBackend::new()),
            Arc::new(InMemoryLengthConfig::new()),
            Arc::new(InMemoryLinkStore::new()),
        )
    }

    /// Assemble a `Cask` from explicitly injected parts.
    pub fn with_parts(
        backend: Arc<dyn ContentBackend>,
        config: Arc<dyn LengthConfig>,
        links: Arc<dyn LinkStore>,
    ) -> Self {
        let allocator = IdAllocator::new(config);
        Self {
            content: ContentStore::new(backend, allocator),
            links,
        }
    }

    /// Store a JSON payload in a category, returning its identifier.
    ///
    /// Payloads are serialized with sorted object keys before hashing, so
    /// semantically identical documents deduplicate to one record and one id.
    pub fn store_payload(&self, category: Category, payload: &Value) -> SdkResult<ShortId> {
        let bytes =
            serde_json::to_vec(payload).map_err(|e| SdkError::Serialization(e.to_string()))?;
        Ok(self.content.store(category, bytes)?)
    }

    /// Fetch a JSON payload by id. `Ok(None)` when absent.
    ///
    /// A record whose bytes no longer deserialize is unusable either way, so
    /// it is reported as absent (and logged) rather than as a fault.
    pub fn fetch_payload(&self, category: Category, id: &ShortId) -> SdkResult<Option<Value>> {
        let Some(record) = self.content.fetch(category, id)? else {
            return Ok(None);
        };
        match serde_json::from_slice(&record.payload) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(category = %category, id = %id, error = %e, "stored payload is malformed; treating as absent");
                Ok(None)
            }
        }
    }

    /// Register a metadata/roles pair. Idempotent.
    ///
    /// Both ids must already name records in their namespaces — the registry
    /// never points at content that does not exist.
    pub fn register_link(&self, metadata_id: &ShortId, roles_id: &ShortId) -> SdkResult<()> {
        for (category, id) in [
            (Category::Metadata, metadata_id),
            (Category::Roles, roles_id),
        ] {
            if self.content.fetch(category, id)?.is_none() {
                return Err(SdkError::UnknownId {
                    category,
                    id: id.clone(),
                });
            }
        }
        self.links.link(metadata_id, roles_id)?;
        Ok(())
    }

    /// Fetch both payloads of a registered pair.
    ///
    /// Returns `Ok(None)` unless the pair was registered **and** both records
    /// are present and readable — a metadata id and a roles id that were
    /// never associated must look exactly like a missing script.
    pub fn fetch_linked_pair(
        &self,
        metadata_id: &ShortId,
        roles_id: &ShortId,
    ) -> SdkResult<Option<(Value, Value)>> {
        if !self.links.is_linked(metadata_id, roles_id)? {
            return Ok(None);
        }
        let Some(metadata) = self.fetch_payload(Category::Metadata, metadata_id)? else {
            return Ok(None);
        };
        let Some(roles) = self.fetch_payload(Category::Roles, roles_id)? else {
            return Ok(None);
        };
        Ok(Some((metadata, roles)))
    }

    /// Store both documents of a script and register the pair.
    pub fn publish(&self, metadata: &Value, roles: &Value) -> SdkResult<ScriptRef> {
        let metadata_id = self.store_payload(Category::Metadata, metadata)?;
        let roles_id = self.store_payload(Category::Roles, roles)?;
        self.links.link(&metadata_id, &roles_id)?;
        Ok(ScriptRef::new(metadata_id, roles_id))
    }

    /// Fetch a script by reference.
    pub fn fetch_script(&self, script: &ScriptRef) -> SdkResult<Option<Script>> {
        Ok(self
            .fetch_linked_pair(&script.metadata_id, &script.roles_id)?
            .map(|(metadata, roles)| Script { metadata, roles }))
    }

    /// Record, link, and length counters.
    pub fn stats(&self) -> SdkResult<CaskStats> {
        Ok(CaskStats {
            metadata_records: self.content.count(Category::Metadata)?,
            roles_records: self.content.count(Category::Roles)?,
            links: self.links.count()?,
            metadata_id_length: self.content.current_length(Category::Metadata),
            roles_id_length: self.content.current_length(Category::Roles),
        })
    }
}

impl std::fmt::Debug for Cask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cask").finish_non_exhaustive()
    }
}

use std::collections::HashMap;
use std::sync::RwLock;

use cask_types::ShortId;

use crate::error::LinkResult;
use crate::traits::LinkStore;
use crate::types::LinkRecord;

/// In-memory, `HashMap`-based link registry.
///
/// Intended for tests and embedding. The map sits behind a `RwLock`, so the
/// existence check and the insertion in `link` happen under one write guard.
pub struct InMemoryLinkStore {
    links: RwLock<HashMap<(ShortId, ShortId), LinkRecord>>,
}

impl InMemoryLinkStore {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            links: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryLinkStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkStore for InMemoryLinkStore {
    fn link(&self, metadata_id: &ShortId, roles_id: &ShortId) -> LinkResult<bool> {
        let mut links = self.links.write().expect("lock poisoned");
        let key = (metadata_id.clone(), roles_id.clone());
        if links.contains_key(&key) {
            return Ok(false);
        }
        links.insert(key, LinkRecord::new(metadata_id.clone(), roles_id.clone()));
        Ok(true)
    }

    fn is_linked(&self, metadata_id: &ShortId, roles_id: &ShortId) -> LinkResult<bool> {
        let links = self.links.read().expect("lock poisoned");
        Ok(links.contains_key(&(metadata_id.clone(), roles_id.clone())))
    }

    fn count(&self) -> LinkResult<u64> {
        let links = self.links.read().expect("lock poisoned");
        Ok(links.len() as u64)
    }

    fn links_for_metadata(&self, metadata_id: &ShortId) -> LinkResult<Vec<ShortId>> {
        let links = self.links.read().expect("lock poisoned");
        let mut ids: Vec<ShortId> = links
            .keys()
            .filter(|(m, _)| m == metadata_id)
            .map(|(_, r)| r.clone())
            .collect();
        ids.sort();
        Ok(ids)
    }
}

impl std::fmt::Debug for InMemoryLinkStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.links.read().expect("lock poisoned").len();
        f.debug_struct("InMemoryLinkStore")
            .field("link_count", &count)
            .finish()
    }
}

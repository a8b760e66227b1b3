use serde::{Deserialize, Serialize};

use cask_types::{ShortId, Timestamp};

/// One registered association between a metadata record and a roles record.
///
/// Keyed by the composite `(metadata_id, roles_id)`. Created on first
/// registration, never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Identifier in the metadata namespace.
    pub metadata_id: ShortId,
    /// Identifier in the roles namespace.
    pub roles_id: ShortId,
    /// When the pair was first registered.
    pub created_at: Timestamp,
}

impl LinkRecord {
    /// Build a record for a pair, stamped with the current time.
    pub fn new(metadata_id: ShortId, roles_id: ShortId) -> Self {
        Self {
            metadata_id,
            roles_id,
            created_at: Timestamp::now(),
        }
    }
}

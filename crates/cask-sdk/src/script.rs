use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use cask_types::ShortId;

use crate::error::SdkError;

/// The shareable name of a published script: its metadata id and roles id.
///
/// Renders as `<metadata_id>-<roles_id>`. Base-36 ids never contain `-`, so
/// the rendering is unambiguous and parseable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScriptRef {
    /// Identifier in the metadata namespace.
    pub metadata_id: ShortId,
    /// Identifier in the roles namespace.
    pub roles_id: ShortId,
}

impl ScriptRef {
    /// Build a reference from the two ids.
    pub fn new(metadata_id: ShortId, roles_id: ShortId) -> Self {
        Self {
            metadata_id,
            roles_id,
        }
    }
}

impl fmt::Display for ScriptRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.metadata_id, self.roles_id)
    }
}

impl FromStr for ScriptRef {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (metadata, roles) = s
            .split_once('-')
            .ok_or_else(|| SdkError::InvalidScriptRef(s.to_string()))?;
        let metadata_id =
            ShortId::new(metadata).map_err(|_| SdkError::InvalidScriptRef(s.to_string()))?;
        let roles_id =
            ShortId::new(roles).map_err(|_| SdkError::InvalidScriptRef(s.to_string()))?;
        Ok(Self {
            metadata_id,
            roles_id,
        })
    }
}

/// A retrieved script: both JSON documents of a registered pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    /// The metadata document.
    pub metadata: Value,
    /// The role-list document.
    pub roles: Value,
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A content namespace.
///
/// Every stored document belongs to exactly one category. Categories are
/// fully independent: each has its own digest index, its own identifier
/// space, and its own identifier-length counter. A `ShortId` valid in one
/// category carries no meaning in the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Script metadata documents (name, author, description, ...).
    Metadata,
    /// Script role-list documents.
    Roles,
}

impl Category {
    /// All categories, in stable order.
    pub const ALL: [Category; 2] = [Category::Metadata, Category::Roles];

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metadata => "metadata",
            Self::Roles => "roles",
        }
    }

    /// Domain tag mixed into every digest computed for this category.
    ///
    /// Domain separation means identical bytes stored under different
    /// categories produce different digests, so the per-category digest
    /// uniqueness invariant can never collide across namespaces.
    pub fn digest_domain(&self) -> &'static str {
        match self {
            Self::Metadata => "cask-metadata-v1",
            Self::Roles => "cask-roles-v1",
        }
    }

    /// Stable index for per-category arrays.
    pub fn index(&self) -> usize {
        match self {
            Self::Metadata => 0,
            Self::Roles => 1,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metadata" => Ok(Self::Metadata),
            "roles" => Ok(Self::Roles),
            other => Err(TypeError::UnknownCategory(other.to_string())),
        }
    }
}

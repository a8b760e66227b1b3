use cask_types::{Category, ShortId};

/// Errors from the high-level API.
///
/// "Not found" is deliberately absent: lookups return `Ok(None)`, which
/// callers must branch on. Errors here are faults or caller mistakes.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Content store failure (including allocation exhaustion).
    #[error(transparent)]
    Store(#[from] cask_store::StoreError),

    /// Link registry failure.
    #[error(transparent)]
    Links(#[from] cask_links::LinkError),

    /// Durable engine failure while opening a store.
    #[error(transparent)]
    Journal(#[from] cask_journal::JournalError),

    /// Payload could not be serialized for storage.
    #[error("payload serialization error: {0}")]
    Serialization(String),

    /// A link referenced an id with no record in its namespace.
    #[error("unknown {category} id: {id}")]
    UnknownId { category: Category, id: ShortId },

    /// A script reference string could not be parsed.
    #[error("invalid script reference: {0:?}")]
    InvalidScriptRef(String),
}

/// Result alias for SDK operations.
pub type SdkResult<T> = Result<T, SdkError>;

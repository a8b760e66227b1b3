use cask_types::Category;

/// Errors from content store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The bounded insertion-retry budget was exhausted without obtaining a
    /// unique identifier. Effectively unreachable given length growth; a
    /// server-side fault when it does happen, never a user input error.
    #[error("identifier allocation exhausted for {category} after {attempts} attempts")]
    AllocationExhausted { category: Category, attempts: u32 },

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failure in a backend.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Backend-specific failure unrelated to the known duplicate outcomes.
    #[error("backend error: {0}")]
    Backend(String),

    /// Length counter failure while growing a tier.
    #[error(transparent)]
    Config(#[from] cask_alloc::ConfigError),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from journal operations.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// I/O error on the journal file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Event serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result alias for journal operations.
pub type JournalResult<T> = Result<T, JournalError>;

// The durable store implements the storage traits of cask-store, cask-links,
// and cask-alloc; journal failures surface through each trait's error type.

impl From<JournalError> for cask_store::StoreError {
    fn from(e: JournalError) -> Self {
        match e {
            JournalError::Io(io) => Self::Io(io),
            JournalError::Serialization(s) => Self::Serialization(s),
        }
    }
}

impl From<JournalError> for cask_links::LinkError {
    fn from(e: JournalError) -> Self {
        match e {
            JournalError::Io(io) => Self::Io(io),
            JournalError::Serialization(s) => Self::Backend(s),
        }
    }
}

impl From<JournalError> for cask_alloc::ConfigError {
    fn from(e: JournalError) -> Self {
        match e {
            JournalError::Io(io) => Self::Io(io),
            JournalError::Serialization(s) => Self::Backend(s),
        }
    }
}

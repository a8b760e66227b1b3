/// Errors from link registry operations.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// I/O failure in a durable backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure.
    #[error("link backend error: {0}")]
    Backend(String),
}

/// Result alias for link registry operations.
pub type LinkResult<T> = Result<T, LinkError>;

use std::sync::atomic::{AtomicU32, Ordering};

use cask_types::Category;

use crate::tier::MAX_LENGTH;

/// Errors from length-counter backends.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O failure in a durable counter backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure (e.g. journal append).
    #[error("length counter backend error: {0}")]
    Backend(String),
}

/// Persistent per-category identifier-length counter.
///
/// The counter starts at 1 and is monotonically non-decreasing for the
/// lifetime of a store — it is never reset or decreased. Reads are cheap
/// (the current value is always held in process); growth must be a single
/// atomic relative increment, never a separate read-then-write pair, so two
/// concurrent growth events cannot collapse into one.
pub trait LengthConfig: Send + Sync {
    /// Current identifier length for the category.
    fn current_length(&self, category: Category) -> u32;

    /// Grow the category's length by one, durably where the backend supports
    /// it, and return the new length. Growth is clamped at
    /// [`MAX_LENGTH`](crate::tier::MAX_LENGTH).
    fn grow(&self, category: Category) -> Result<u32, ConfigError>;
}

/// In-process length counters backed by atomics.
///
/// Suitable for tests and ephemeral embedding; values are lost on drop.
#[derive(Debug)]
pub struct InMemoryLengthConfig {
    lengths: [AtomicU32; 2],
}

impl InMemoryLengthConfig {
    /// Create counters starting at length 1 for both categories.
    pub fn new() -> Self {
        Self {
            lengths: [AtomicU32::new(1), AtomicU32::new(1)],
        }
    }

    /// Create counters starting at a specific length (tests).
    pub fn starting_at(length: u32) -> Self {
        let length = length.clamp(1, MAX_LENGTH);
        Self {
            lengths: [AtomicU32::new(length), AtomicU32::new(length)],
        }
    }
}

impl Default for InMemoryLengthConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LengthConfig for InMemoryLengthConfig {
    fn current_length(&self, category: Category) -> u32 {
        self.lengths[category.index()].load(Ordering::SeqCst)
    }

    fn grow(&self, category: Category) -> Result<u32, ConfigError> {
        let counter = &self.lengths[category.index()];
        let prev = counter.fetch_add(1, Ordering::SeqCst);
        if prev >= MAX_LENGTH {
            // Clamp: monotonic, never past the widest tier.
            counter.store(MAX_LENGTH, Ordering::SeqCst);
            tracing::warn!(category = %category, "identifier length limit reached");
            return Ok(MAX_LENGTH);
        }
        Ok(prev + 1)
    }
}

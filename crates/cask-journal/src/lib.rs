//! Durable storage engine for Cask.
//!
//! Cask's durable state is a single append-only journal file. Every write —
//! a content record, a link registration, a length growth — is one framed,
//! checksummed journal entry. On open, the journal is replayed front to back
//! into in-memory indexes; reads are served from the indexes, writes append
//! to the journal before touching them. Records are permanent (there is no
//! eviction), so the log never needs compaction.
//!
//! This write-ahead, log-structured layout is what lets `try_insert` check
//! both uniqueness constraints and commit the insertion under one short
//! write guard, while reads stay index-only.
//!
//! # Components
//!
//! - [`Journal`] — crash-recoverable append-only log with CRC32 framing
//! - [`JournalEvent`] — the serialized write types
//! - [`DurableStore`] — replayed state implementing the `ContentBackend`,
//!   `LinkStore`, and `LengthConfig` traits over one journal

pub mod durable;
pub mod error;
pub mod event;
pub mod journal;

pub use durable::DurableStore;
pub use error::{JournalError, JournalResult};
pub use event::JournalEvent;
pub use journal::{Journal, JournalConfig, SyncMode};

//! Content-addressed payload storage for Cask.
//!
//! Every payload submitted to a category is hashed, deduplicated by digest,
//! and assigned a short base-36 identifier on first insertion. Identical
//! payloads always resolve to the same identifier, no matter which caller
//! submits them or how many times.
//!
//! # Design Rules
//!
//! 1. Records are immutable once written; ids are never reassigned.
//! 2. Uniqueness (per-category digest and id) is enforced by the backend at
//!    the insertion layer, never by a check-then-insert sequence.
//! 3. The two constraint-violation insert outcomes are the *expected*
//!    concurrency signal: duplicate digest resolves to the winner's id,
//!    duplicate id triggers reallocation and, when persistent, length growth.
//! 4. All other backend errors are propagated, never silently ignored.
//!
//! # Storage Backends
//!
//! All backends implement the [`ContentBackend`] trait:
//!
//! - [`InMemoryContentBackend`] — `HashMap`-based backend for tests and
//!   embedding. A durable, journal-backed implementation lives in
//!   `cask-journal`.

pub mod error;
pub mod memory;
pub mod record;
pub mod store;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryContentBackend;
pub use record::ContentRecord;
pub use store::ContentStore;
pub use traits::{ContentBackend, InsertOutcome};

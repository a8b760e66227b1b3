//! Short-identifier allocation for Cask.
//!
//! The allocator mints *candidate* identifiers: short lowercase base-36
//! strings of a per-category current length, screened against a denylist of
//! substrings that must never appear in a shareable link. Candidates are not
//! guaranteed unique — uniqueness is enforced by the content store's
//! insert-and-retry loop, which calls back into [`LengthConfig::grow`] when a
//! length tier becomes too contended.
//!
//! # Components
//!
//! - [`IdAllocator`] — draws denylist-clean candidates from the current tier
//! - [`Denylist`] — the fixed set of disallowed substrings
//! - [`LengthConfig`] — the persistent per-category length counter contract
//! - [`InMemoryLengthConfig`] — atomic in-process counters for tests/embedding
//! - [`tier`] — numeric bounds of each identifier length tier

pub mod allocator;
pub mod config;
pub mod denylist;
pub mod tier;

pub use allocator::IdAllocator;
pub use config::{ConfigError, InMemoryLengthConfig, LengthConfig};
pub use denylist::Denylist;

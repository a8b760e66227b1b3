//! Foundation types for Cask.
//!
//! This crate provides the identifier, digest, and temporal types used
//! throughout the Cask system. Every other Cask crate depends on
//! `cask-types`.
//!
//! # Key Types
//!
//! - [`Category`] — The two independent content namespaces (metadata, roles)
//! - [`ShortId`] — Compact, user-facing base-36 identifier used in share links
//! - [`ContentDigest`] — Content-addressed digest (domain-separated BLAKE3)
//! - [`Timestamp`] — Wall-clock creation time in milliseconds
//! - [`TypeError`] — Parse and validation failures for the above

pub mod category;
pub mod digest;
pub mod error;
pub mod id;
pub mod temporal;

pub use category::Category;
pub use digest::ContentDigest;
pub use error::TypeError;
pub use id::ShortId;
pub use temporal::Timestamp;

//! High-level Cask API.
//!
//! [`Cask`] is the explicit context object callers hold: it wires a content
//! backend, a length-counter config, and a link registry together and exposes
//! the four core operations over JSON payloads — store a categorized payload,
//! fetch one back, register a metadata/roles pair, and fetch a registered
//! pair. The transport layer above (HTTP, templating, caching) is a thin
//! wrapper around these calls and lives outside this workspace.
//!
//! There is no ambient global store: every `Cask` is independently
//! constructed, so tests can instantiate as many as they like.

pub mod cask;
pub mod error;
pub mod script;

pub use cask::{Cask, CaskStats};
pub use error::{SdkError, SdkResult};
pub use script::{Script, ScriptRef};

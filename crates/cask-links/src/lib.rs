//! Link registry for Cask.
//!
//! A published script is the pair of a metadata identifier and a role-list
//! identifier. Because both sides are deduplicated independently, the pair —
//! not either id alone — is what names a script. The registry records which
//! pairs have actually been published, so retrieval can refuse to serve a
//! metadata/roles combination that was never associated (a mistyped or
//! forged pair must look like "not found", not like a valid script).
//!
//! Registration is idempotent: re-publishing an identical script is a
//! silent no-op.

pub mod error;
pub mod memory;
pub mod traits;
pub mod types;

pub use error::{LinkError, LinkResult};
pub use memory::InMemoryLinkStore;
pub use traits::LinkStore;
pub use types::LinkRecord;

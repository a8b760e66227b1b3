use serde::{Deserialize, Serialize};

use cask_links::LinkRecord;
use cask_store::ContentRecord;
use cask_types::Category;

/// One durable write, as serialized into the journal.
///
/// Events are replayed in file order on open, so each variant must carry
/// everything needed to rebuild its slice of state. `LengthGrown` is
/// deliberately a relative event — replay *counts* growths instead of
/// storing absolute lengths, which keeps concurrent growth events from
/// collapsing into one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JournalEvent {
    /// A content record was inserted into a category namespace.
    ContentInserted {
        category: Category,
        record: ContentRecord,
    },
    /// A metadata/roles pair was registered.
    LinkInserted { record: LinkRecord },
    /// A category's identifier length advanced one tier.
    LengthGrown { category: Category },
}

use std::sync::{PoisonError, RwLock};

use tracing::debug;

use opal_log::LogSource;
use opal_types::{Entry, OwnerId};

use crate::error::IndexResult;
use crate::traits::StoreIndex;
use crate::view::View;

/// Reference index variant: full rebuild from the log snapshot.
///
/// On every update the committed view is discarded and replaced with the
/// log's full ordered entry sequence; the delta argument is ignored.
/// Correct by construction and trivially idempotent, at O(log size) per
/// update. Store types that need key-value, counter, or set semantics
/// supply their own variant with incremental fold logic instead.
pub struct BaseIndex {
    owner: OwnerId,
    view: RwLock<Vec<Entry>>,
}

impl BaseIndex {
    /// Create a fresh, empty index scoped to `owner`.
    pub fn new(owner: OwnerId) -> Self {
        Self {
            owner,
            view: RwLock::new(Vec::new()),
        }
    }

    /// Registry constructor for the `eventlog` store type.
    pub fn construct(owner: OwnerId) -> Box<dyn StoreIndex> {
        Box::new(Self::new(owner))
    }

    /// The identity this view is scoped to.
    pub fn owner(&self) -> OwnerId {
        self.owner
    }
}

impl StoreIndex for BaseIndex {
    fn query(&self, _name: &str) -> View {
        // A poisoned guard still holds a committed view: the swap below
        // is a single assignment of a fully built sequence.
        let view = self.view.read().unwrap_or_else(PoisonError::into_inner);
        View::Entries(view.clone())
    }

    fn update_index(&self, log: &dyn LogSource, _new_entries: &[Entry]) -> IndexResult<()> {
        let mut view = self.view.write().unwrap_or_else(PoisonError::into_inner);
        // Snapshot under the write lock so concurrent updates commit in
        // order. Fails before touching the view, keeping the previous
        // committed state on error.
        let entries = log.snapshot()?;
        debug!(owner = %self.owner, entries = entries.len(), "rebuilt base index");
        *view = entries;
        Ok(())
    }
}

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use opal_log::LogSource;
use opal_types::{Entry, EntryId, OpKind, Operation, OwnerId};

use crate::error::IndexResult;
use crate::traits::StoreIndex;
use crate::view::View;

/// Counter index variant: sums `INC` amounts across all writers.
///
/// Incremental like [`KvIndex`](crate::KvIndex): folds only the delta,
/// with applied entry ids tracked so at-least-once redelivery cannot
/// double-count. Addition is commutative, so no ordering or clock
/// comparison is needed.
pub struct CounterIndex {
    owner: OwnerId,
    inner: RwLock<CounterState>,
}

#[derive(Default)]
struct CounterState {
    total: i64,
    applied: HashSet<EntryId>,
}

impl CounterIndex {
    /// Create a fresh, zeroed index scoped to `owner`.
    pub fn new(owner: OwnerId) -> Self {
        Self {
            owner,
            inner: RwLock::new(CounterState::default()),
        }
    }

    /// Registry constructor for the `counter` store type.
    pub fn construct(owner: OwnerId) -> Box<dyn StoreIndex> {
        Box::new(Self::new(owner))
    }

    /// The identity this view is scoped to.
    pub fn owner(&self) -> OwnerId {
        self.owner
    }
}

impl StoreIndex for CounterIndex {
    fn query(&self, _name: &str) -> View {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        View::Counter(state.total)
    }

    fn update_index(&self, _log: &dyn LogSource, new_entries: &[Entry]) -> IndexResult<()> {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        for entry in new_entries {
            if !state.applied.insert(entry.id) {
                continue; // redelivered
            }
            match Operation::from_bytes(&entry.payload) {
                Ok(op) if op.kind == OpKind::Inc => {
                    state.total = state.total.saturating_add(op.amount());
                }
                Ok(_) => continue,
                Err(_) => {
                    debug!(entry = %entry.id.short_hex(), "skipping non-operation payload");
                }
            }
        }
        Ok(())
    }
}

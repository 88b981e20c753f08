use std::collections::{BTreeMap, HashSet};
use std::sync::{PoisonError, RwLock};

use serde_json::Value;
use tracing::debug;

use opal_log::LogSource;
use opal_types::{Entry, EntryId, LamportClock, OpKind, Operation, OwnerId};

use crate::error::IndexResult;
use crate::traits::StoreIndex;
use crate::view::View;

/// Key-value index variant: last-writer-wins register map.
///
/// Folds only the delta of newly observed entries (O(delta) per update),
/// never re-reading the log. Each key keeps the clock and entry id of
/// its winning write; a later `PUT` or `DEL` replaces it only when
/// causally newer, with the entry id as the final deterministic
/// tiebreak. Deletes leave tombstones so redelivered or reordered
/// batches cannot resurrect a key.
pub struct KvIndex {
    owner: OwnerId,
    inner: RwLock<KvState>,
}

#[derive(Default)]
struct KvState {
    slots: BTreeMap<String, Slot>,
    applied: HashSet<EntryId>,
}

/// The winning write for one key. `value` is `None` for a tombstone.
struct Slot {
    value: Option<Value>,
    clock: LamportClock,
    entry: EntryId,
}

impl KvIndex {
    /// Create a fresh, empty index scoped to `owner`.
    pub fn new(owner: OwnerId) -> Self {
        Self {
            owner,
            inner: RwLock::new(KvState::default()),
        }
    }

    /// Registry constructor for the `keyvalue` store type.
    pub fn construct(owner: OwnerId) -> Box<dyn StoreIndex> {
        Box::new(Self::new(owner))
    }

    /// The identity this view is scoped to.
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    fn wins(entry: &Entry, slot: &Slot) -> bool {
        entry
            .clock
            .cmp(&slot.clock)
            .then_with(|| entry.id.cmp(&slot.entry))
            .is_gt()
    }
}

impl StoreIndex for KvIndex {
    fn query(&self, name: &str) -> View {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let live = state
            .slots
            .iter()
            .filter(|(key, _)| name.is_empty() || key.as_str() == name)
            .filter_map(|(key, slot)| slot.value.clone().map(|v| (key.clone(), v)));
        View::Map(live.collect())
    }

    fn update_index(&self, _log: &dyn LogSource, new_entries: &[Entry]) -> IndexResult<()> {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let mut folded = 0usize;

        for entry in new_entries {
            if !state.applied.insert(entry.id) {
                continue; // redelivered
            }

            let op = match Operation::from_bytes(&entry.payload) {
                Ok(op) => op,
                Err(_) => {
                    debug!(entry = %entry.id.short_hex(), "skipping non-operation payload");
                    continue;
                }
            };
            let Some(key) = op.key else {
                debug!(entry = %entry.id.short_hex(), "skipping operation without key");
                continue;
            };
            let value = match op.kind {
                OpKind::Put => op.value,
                OpKind::Del => None,
                OpKind::Inc => continue, // not a key-value operation
            };

            let newer = state
                .slots
                .get(&key)
                .map_or(true, |slot| Self::wins(entry, slot));
            if newer {
                state.slots.insert(
                    key,
                    Slot {
                        value,
                        clock: entry.clock,
                        entry: entry.id,
                    },
                );
            }
            folded += 1;
        }

        if folded > 0 {
            debug!(owner = %self.owner, folded, keys = state.slots.len(), "folded kv delta");
        }
        Ok(())
    }
}

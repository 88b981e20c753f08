use tracing::{debug, info};

use opal_index::{IndexRegistry, StoreIndex, View};
use opal_log::{InMemoryLog, LogSource};
use opal_types::{Entry, OwnerId};

use crate::error::StoreError;

/// A named, typed store: an operation log plus one materialized index.
///
/// The store is the only writer of its log and the only caller of the
/// index's update operation; readers go through [`query`]. The index
/// itself is swappable — which variant backs the store is decided by
/// the store-type name at open time, through the registry.
///
/// [`query`]: Store::query
pub struct Store {
    name: String,
    kind: String,
    log: InMemoryLog,
    index: Box<dyn StoreIndex>,
}

impl Store {
    /// Open a store of the given type for `owner`.
    ///
    /// Looks up the index constructor in `registry`, builds a fresh
    /// index, and runs the initial update so the view reflects the log
    /// (relevant when a log is handed over pre-populated in the future;
    /// today the log starts empty).
    pub fn open(
        name: impl Into<String>,
        kind: &str,
        owner: OwnerId,
        registry: &IndexRegistry,
    ) -> Result<Self, StoreError> {
        let index = registry
            .construct(kind, owner)
            .ok_or_else(|| StoreError::UnknownStoreType(kind.to_string()))?;

        let store = Self {
            name: name.into(),
            kind: kind.to_string(),
            log: InMemoryLog::new(owner),
            index,
        };

        let existing = store.log.snapshot()?;
        store.index.update_index(&store.log, &existing)?;

        info!(store = %store.name, kind = %store.kind, owner = %owner, "opened store");
        Ok(store)
    }

    /// The store's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The store-type name the index was selected by.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The underlying log, for replication (feed its snapshot to a
    /// peer's [`join`]) and inspection.
    ///
    /// [`join`]: Store::join
    pub fn log(&self) -> &InMemoryLog {
        &self.log
    }

    /// Current derived view; `name` selects a sub-view where the store
    /// type supports it.
    pub fn query(&self, name: &str) -> View {
        self.index.query(name)
    }

    /// Append a local payload and bring the index up to date.
    pub fn append(&self, payload: Vec<u8>) -> Result<Entry, StoreError> {
        let entry = self.log.append(payload)?;
        self.index
            .update_index(&self.log, std::slice::from_ref(&entry))?;
        debug!(store = %self.name, entry = %entry.id.short_hex(), "appended");
        Ok(entry)
    }

    /// Merge entries received from a peer and bring the index up to
    /// date with the delta the log actually admitted.
    pub fn join(&self, entries: &[Entry]) -> Result<usize, StoreError> {
        let admitted = self.log.join(entries)?;
        if !admitted.is_empty() {
            self.index.update_index(&self.log, &admitted)?;
            debug!(store = %self.name, admitted = admitted.len(), "joined entries");
        }
        Ok(admitted.len())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use opal_types::Operation;

    use super::*;

    fn owner(seed: u8) -> OwnerId {
        OwnerId::from_raw([seed; 32])
    }

    fn open(kind: &str, seed: u8) -> Store {
        Store::open(format!("test-{kind}"), kind, owner(seed), &IndexRegistry::with_defaults())
            .unwrap()
    }

    #[test]
    fn unknown_store_type_fails_open() {
        let result = Store::open("s", "docstore", owner(1), &IndexRegistry::with_defaults());
        assert!(matches!(result, Err(StoreError::UnknownStoreType(k)) if k == "docstore"));
    }

    #[test]
    fn eventlog_store_materializes_appends_in_order() {
        let store = open("eventlog", 1);
        store.append(b"a".to_vec()).unwrap();
        store.append(b"b".to_vec()).unwrap();
        store.append(b"c".to_vec()).unwrap();

        let view = store.query("");
        let payloads: Vec<_> = view
            .as_entries()
            .unwrap()
            .iter()
            .map(|e| e.payload.clone())
            .collect();
        assert_eq!(payloads, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
    }

    #[test]
    fn keyvalue_store_applies_operations() {
        let store = open("keyvalue", 1);
        store
            .append(Operation::put("name", Value::from("ada")).to_bytes().unwrap())
            .unwrap();
        store
            .append(Operation::put("name", Value::from("grace")).to_bytes().unwrap())
            .unwrap();
        store.append(Operation::del("stale").to_bytes().unwrap()).unwrap();

        let view = store.query("name");
        assert_eq!(view.as_map().unwrap().get("name"), Some(&Value::from("grace")));
    }

    #[test]
    fn counter_store_sums_increments() {
        let store = open("counter", 1);
        store.append(Operation::inc(2).to_bytes().unwrap()).unwrap();
        store.append(Operation::inc(3).to_bytes().unwrap()).unwrap();
        assert_eq!(store.query(""), View::Counter(5));
    }

    #[test]
    fn join_updates_index_with_admitted_delta() {
        let ours = open("counter", 1);
        let theirs = open("counter", 2);
        theirs.append(Operation::inc(4).to_bytes().unwrap()).unwrap();

        let remote = theirs.log().snapshot().unwrap();
        assert_eq!(ours.join(&remote).unwrap(), 1);
        assert_eq!(ours.query(""), View::Counter(4));

        // Redelivering the same entries admits and applies nothing.
        assert_eq!(ours.join(&remote).unwrap(), 0);
        assert_eq!(ours.query(""), View::Counter(4));
    }

    #[test]
    fn replicated_stores_converge() {
        let a = open("keyvalue", 1);
        let b = open("keyvalue", 2);
        a.append(Operation::put("x", Value::from(1)).to_bytes().unwrap())
            .unwrap();
        b.append(Operation::put("y", Value::from(2)).to_bytes().unwrap())
            .unwrap();

        a.join(&b.log().snapshot().unwrap()).unwrap();
        b.join(&a.log().snapshot().unwrap()).unwrap();

        assert_eq!(a.query(""), b.query(""));
        let map_view = a.query("");
        let map = map_view.as_map().unwrap();
        assert_eq!(map.get("x"), Some(&Value::from(1)));
        assert_eq!(map.get("y"), Some(&Value::from(2)));
    }

    #[test]
    fn closed_log_surfaces_snapshot_unavailable() {
        let store = open("eventlog", 1);
        store.append(b"a".to_vec()).unwrap();
        let committed = store.query("");

        store.log().close();
        assert!(matches!(store.append(b"b".to_vec()), Err(StoreError::Log(_))));
        // The index still answers from its last committed view.
        assert_eq!(store.query(""), committed);
    }
}

use std::collections::BTreeMap;

use opal_types::OwnerId;

use crate::base::BaseIndex;
use crate::counter::CounterIndex;
use crate::kv::KvIndex;
use crate::traits::{IndexConstructor, StoreIndex};

/// Explicit mapping from store-type name to index constructor.
///
/// Built once at initialization and passed into store construction;
/// there is no global registration. Read-mostly after that: register
/// every variant up front, then only look up.
#[derive(Clone, Default)]
pub struct IndexRegistry {
    constructors: BTreeMap<String, IndexConstructor>,
}

impl IndexRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in store types: `eventlog` (base
    /// full-rebuild variant), `keyvalue`, and `counter`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("eventlog", BaseIndex::construct);
        registry.register("keyvalue", KvIndex::construct);
        registry.register("counter", CounterIndex::construct);
        registry
    }

    /// Register a constructor for a store-type name. A later
    /// registration under the same name replaces the earlier one.
    pub fn register(&mut self, kind: impl Into<String>, constructor: IndexConstructor) {
        self.constructors.insert(kind.into(), constructor);
    }

    /// Returns `true` if a constructor is registered for `kind`.
    pub fn contains(&self, kind: &str) -> bool {
        self.constructors.contains_key(kind)
    }

    /// Registered store-type names, in sorted order.
    pub fn kinds(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }

    /// Build a fresh index for `kind`, scoped to `owner`. Returns `None`
    /// for an unknown store type.
    pub fn construct(&self, kind: &str, owner: OwnerId) -> Option<Box<dyn StoreIndex>> {
        self.constructors.get(kind).map(|ctor| ctor(owner))
    }
}

#[cfg(test)]
mod tests {
    use crate::view::View;

    use super::*;

    fn owner() -> OwnerId {
        OwnerId::from_raw([1; 32])
    }

    #[test]
    fn defaults_cover_builtin_store_types() {
        let registry = IndexRegistry::with_defaults();
        assert_eq!(registry.kinds(), vec!["counter", "eventlog", "keyvalue"]);
    }

    #[test]
    fn constructed_indexes_start_at_their_zero_view() {
        let registry = IndexRegistry::with_defaults();
        let eventlog = registry.construct("eventlog", owner()).unwrap();
        let keyvalue = registry.construct("keyvalue", owner()).unwrap();
        let counter = registry.construct("counter", owner()).unwrap();

        assert_eq!(eventlog.query(""), View::empty_entries());
        assert_eq!(keyvalue.query(""), View::empty_map());
        assert_eq!(counter.query(""), View::Counter(0));
    }

    #[test]
    fn unknown_kind_is_none() {
        let registry = IndexRegistry::with_defaults();
        assert!(registry.construct("docstore", owner()).is_none());
        assert!(!registry.contains("docstore"));
    }

    #[test]
    fn custom_variant_plugs_in() {
        let mut registry = IndexRegistry::new();
        registry.register("events", BaseIndex::construct);
        assert!(registry.contains("events"));
        assert!(registry.construct("events", owner()).is_some());
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use opal_types::Entry;

/// A committed derived view returned by [`StoreIndex::query`].
///
/// Each index variant produces one shape. A freshly constructed index
/// answers queries with its variant's zero value.
///
/// [`StoreIndex::query`]: crate::StoreIndex::query
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum View {
    /// The full ordered entry sequence (event-log stores).
    Entries(Vec<Entry>),
    /// A key-value mapping (key-value stores).
    Map(BTreeMap<String, Value>),
    /// A counter total (counter stores).
    Counter(i64),
}

impl View {
    /// The zero entry-sequence view.
    pub fn empty_entries() -> Self {
        View::Entries(Vec::new())
    }

    /// The zero map view.
    pub fn empty_map() -> Self {
        View::Map(BTreeMap::new())
    }

    /// Returns `true` if the view holds no derived data.
    pub fn is_empty(&self) -> bool {
        match self {
            View::Entries(entries) => entries.is_empty(),
            View::Map(map) => map.is_empty(),
            View::Counter(total) => *total == 0,
        }
    }

    /// The entry sequence, if this is an entries view.
    pub fn as_entries(&self) -> Option<&[Entry]> {
        match self {
            View::Entries(entries) => Some(entries),
            _ => None,
        }
    }

    /// The mapping, if this is a map view.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            View::Map(map) => Some(map),
            _ => None,
        }
    }

    /// The counter total, if this is a counter view.
    pub fn as_counter(&self) -> Option<i64> {
        match self {
            View::Counter(total) => Some(*total),
            _ => None,
        }
    }
}

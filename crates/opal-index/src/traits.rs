use opal_log::LogSource;
use opal_types::{Entry, OwnerId};

use crate::error::IndexResult;
use crate::view::View;

/// The store-index contract: a derived, queryable view over a log.
///
/// One index is constructed per store instance. The owning store calls
/// [`update_index`] after every log mutation batch (local appends or
/// entries merged from peers); readers call [`query`] at any time.
/// Both may be invoked concurrently from multiple threads without
/// external synchronization, so implementations serialize mutations
/// behind a single exclusive critical section and must guarantee that a
/// query observes either the pre- or post-update view, never a torn
/// intermediate.
///
/// The index borrows the log handle only for the duration of one
/// `update_index` call and must not retain entries or the handle beyond
/// it; the log is free to evolve between calls.
///
/// [`query`]: StoreIndex::query
/// [`update_index`]: StoreIndex::update_index
pub trait StoreIndex: Send + Sync {
    /// Return the last committed view. Never blocks on the log, never
    /// fails; before the first successful update this is the variant's
    /// zero view. `name` selects a sub-view for store types whose view
    /// is structured; variants with a single view ignore it.
    fn query(&self, name: &str) -> View;

    /// Recompute or incrementally update the view.
    ///
    /// `new_entries` is the batch newly observed since the last call; it
    /// may be empty and may redeliver entries already processed, so the
    /// operation must be idempotent under at-least-once delivery. Errors
    /// only if the log cannot produce a snapshot, in which case the
    /// previously committed view is retained untouched.
    fn update_index(&self, log: &dyn LogSource, new_entries: &[Entry]) -> IndexResult<()>;
}

/// Constructor signature every index variant registers.
///
/// Pure: allocates a fresh, empty view scoped to `owner` and performs
/// no I/O.
pub type IndexConstructor = fn(owner: OwnerId) -> Box<dyn StoreIndex>;

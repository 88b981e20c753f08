//! Pluggable materialized-index layer over the OPAL operation log.
//!
//! A store index consumes snapshots of an append-only, content-addressed
//! log and maintains a derived, queryable view. Different store types
//! plug in different index semantics through the same contract.
//!
//! # Key Types
//!
//! - [`StoreIndex`] — The capability contract: `query` + `update_index`
//! - [`View`] — The committed derived state a query returns
//! - [`BaseIndex`] — Reference variant: full rebuild from the snapshot
//! - [`KvIndex`] — Last-writer-wins key-value variant (incremental)
//! - [`CounterIndex`] — Deduplicated counter variant (incremental)
//! - [`IndexRegistry`] — Store-type name to constructor mapping

pub mod base;
pub mod counter;
pub mod error;
pub mod kv;
pub mod registry;
pub mod traits;
pub mod view;

pub use base::BaseIndex;
pub use counter::CounterIndex;
pub use error::{IndexError, IndexResult};
pub use kv::KvIndex;
pub use registry::IndexRegistry;
pub use traits::{IndexConstructor, StoreIndex};
pub use view::View;

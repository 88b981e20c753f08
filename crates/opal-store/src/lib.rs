//! Store layer for OPAL.
//!
//! A [`Store`] owns an operation log and one materialized index built
//! through an [`IndexRegistry`](opal_index::IndexRegistry) at open time.
//! Every log mutation (local append or entries joined from a peer) is
//! followed by an index update with the delta, so readers always see a
//! view consistent with some committed point of the log.

pub mod error;
pub mod store;

pub use error::StoreError;
pub use store::Store;

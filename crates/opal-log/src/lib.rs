//! Append-only, content-addressed operation log for OPAL.
//!
//! This crate provides:
//! - The [`LogSource`] trait boundary consumed by the index layer
//! - [`InMemoryLog`] implementation for tests and embedding
//! - Deduplicated, causally-ordered entry sequences with head tracking
//!
//! The log is the canonical source of truth; every derived view in
//! `opal-index` can be rebuilt from a log snapshot at any time.

pub mod error;
pub mod memory;
pub mod source;

pub use error::LogError;
pub use memory::InMemoryLog;
pub use source::LogSource;

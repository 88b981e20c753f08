//! Foundation types for OPAL.
//!
//! This crate provides the identity, ordering, and entry types shared by
//! every other OPAL crate.
//!
//! # Key Types
//!
//! - [`EntryId`] — Content-addressed entry identifier (BLAKE3 hash)
//! - [`OwnerId`] — Writer/owner identity derived from an ed25519 public key
//! - [`LamportClock`] — Logical clock for causal ordering of entries
//! - [`Entry`] — Immutable, content-addressed log entry with causal links
//! - [`Operation`] — Payload convention for structured store types

pub mod clock;
pub mod entry;
pub mod error;
pub mod identity;
pub mod operation;

pub use clock::LamportClock;
pub use entry::{Entry, EntryId};
pub use error::TypeError;
pub use identity::OwnerId;
pub use operation::{OpKind, Operation};

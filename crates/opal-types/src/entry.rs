use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clock::LamportClock;
use crate::error::TypeError;
use crate::identity::OwnerId;

/// Content-addressed identifier of a log entry.
///
/// An `EntryId` is the BLAKE3 hash of the entry's canonical field
/// encoding. Identical entries always produce the same id, which is what
/// makes the log deduplicatable and its links verifiable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId([u8; 32]);

impl EntryId {
    /// Create an `EntryId` from a pre-computed hash.
    pub fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    /// The raw 32-byte hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryId({})", self.short_hex())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// An immutable, content-addressed log entry.
///
/// Entries carry an opaque payload, causal links (`next`) to the entries
/// they were appended after, and the writer's Lamport clock. The id is
/// derived from all other fields, so any mutation is detectable via
/// [`verify`].
///
/// [`verify`]: Entry::verify
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Content hash of the remaining fields.
    pub id: EntryId,
    /// The writer that produced this entry.
    pub author: OwnerId,
    /// Opaque payload bytes; structured stores encode an
    /// [`Operation`](crate::Operation) here.
    pub payload: Vec<u8>,
    /// Causal links to the entries this one was appended after.
    pub next: Vec<EntryId>,
    /// The writer's clock at append time.
    pub clock: LamportClock,
}

impl Entry {
    /// Build an entry, computing its content-addressed id.
    pub fn new(
        author: OwnerId,
        payload: Vec<u8>,
        next: Vec<EntryId>,
        clock: LamportClock,
    ) -> Self {
        let id = Self::content_hash(&author, &payload, &next, &clock);
        Self {
            id,
            author,
            payload,
            next,
            clock,
        }
    }

    /// Returns `true` if the stored id matches the recomputed content
    /// hash, i.e. no field has been tampered with.
    pub fn verify(&self) -> bool {
        self.id == Self::content_hash(&self.author, &self.payload, &self.next, &self.clock)
    }

    fn content_hash(
        author: &OwnerId,
        payload: &[u8],
        next: &[EntryId],
        clock: &LamportClock,
    ) -> EntryId {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"opal-entry-v1:");
        hasher.update(author.as_bytes());
        hasher.update(&clock.time.to_le_bytes());
        hasher.update(clock.id.as_bytes());
        hasher.update(&(next.len() as u64).to_le_bytes());
        for link in next {
            hasher.update(link.as_bytes());
        }
        hasher.update(&(payload.len() as u64).to_le_bytes());
        hasher.update(payload);
        EntryId::from_hash(*hasher.finalize().as_bytes())
    }
}

use std::fmt;

use ed25519_dalek::{SigningKey, VerifyingKey};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identity of a log writer or index owner.
///
/// An `OwnerId` wraps the raw 32 bytes of an ed25519 verifying key. The
/// log layer has already verified entry signatures upstream; here the key
/// bytes serve purely as a stable identifier for attribution, clock
/// tie-breaking, and scoping a derived view to its owner.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwnerId([u8; 32]);

impl OwnerId {
    /// Create an `OwnerId` from an ed25519 verifying key.
    pub fn from_verifying_key(key: &VerifyingKey) -> Self {
        Self(key.to_bytes())
    }

    /// Create from raw key bytes. Use [`from_verifying_key`] when a real
    /// key is at hand.
    ///
    /// [`from_verifying_key`]: OwnerId::from_verifying_key
    pub fn from_raw(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Generate a fresh random identity for tests and demos.
    pub fn ephemeral() -> Self {
        let signing = SigningKey::generate(&mut rand::thread_rng());
        Self::from_verifying_key(&signing.verifying_key())
    }

    /// The raw 32 key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Full hex-encoded string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short identifier (first 8 hex characters).
    pub fn short_id(&self) -> String {
        format!("own:{}", hex::encode(&self.0[..4]))
    }

    /// Parse from a hex string (64 hex characters, optional `own:` prefix).
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s.strip_prefix("own:").unwrap_or(s);
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

impl fmt::Debug for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OwnerId({})", self.short_id())
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_id())
    }
}

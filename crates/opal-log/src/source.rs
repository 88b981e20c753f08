use opal_types::Entry;

use crate::error::LogError;

/// Read boundary the index layer consumes.
///
/// A log source holds the canonical, append-only, content-addressed
/// sequence of entries. [`snapshot`] must be callable any number of
/// times and safe to call while the owning process is concurrently
/// appending; serializing internal state is the implementation's
/// responsibility. Snapshot retrieval is expected to be fast and
/// in-memory; a source that can block indefinitely must bound that
/// itself.
///
/// [`snapshot`]: LogSource::snapshot
pub trait LogSource: Send + Sync {
    /// A point-in-time, internally consistent read of the full ordered,
    /// deduplicated entry sequence.
    fn snapshot(&self) -> Result<Vec<Entry>, LogError>;
}

//! Error types for the index layer.

use opal_log::LogError;

/// Errors that can occur during index updates.
///
/// `query` never fails; the only failure an index surfaces is the log
/// refusing to produce a snapshot, and it is propagated verbatim to the
/// owning store. The index neither retries nor logs it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// The log handle could not produce its entry snapshot.
    #[error("log snapshot unavailable: {0}")]
    SnapshotUnavailable(#[from] LogError),
}

/// Convenience alias for index results.
pub type IndexResult<T> = Result<T, IndexError>;

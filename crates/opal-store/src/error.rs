use opal_index::IndexError;
use opal_log::LogError;

/// Errors produced by store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No index constructor is registered for the requested store type.
    #[error("unknown store type: {0}")]
    UnknownStoreType(String),

    /// The index could not be updated.
    #[error(transparent)]
    Index(#[from] IndexError),

    /// The log rejected a mutation.
    #[error(transparent)]
    Log(#[from] LogError),
}

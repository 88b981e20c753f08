/// Errors produced by log operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogError {
    #[error("log is closed")]
    Closed,

    #[error("log backend error: {0}")]
    Backend(String),
}

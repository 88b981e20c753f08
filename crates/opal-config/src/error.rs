use thiserror::Error;

/// Errors produced by the configuration subsystem.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{subsystem} configuration: {field} should not be empty")]
    MissingField {
        subsystem: &'static str,
        field: &'static str,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("configuration sink rejected update: {0}")]
    Sink(String),
}

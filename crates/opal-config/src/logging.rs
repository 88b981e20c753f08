use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sink::{ConfigSink, ConfigUpdate};

/// Configuration of the logging subsystem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter directive, e.g. `"info"` or `"opal_index=debug"`.
    pub level: String,
}

impl LoggingConfig {
    /// Subsystem identifier carried on change events.
    pub const SUBSYSTEM: &'static str = "logging";

    /// Level applied when none is configured.
    pub const DEFAULT_LEVEL: &'static str = "info";

    /// Assign defaults to unset fields.
    pub fn set_defaults(&mut self) {
        if self.level.is_empty() {
            self.level = Self::DEFAULT_LEVEL.to_string();
        }
    }

    /// Check that every required field is set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.level.is_empty() {
            return Err(ConfigError::MissingField {
                subsystem: Self::SUBSYSTEM,
                field: "level",
            });
        }
        Ok(())
    }

    /// Replace this config and notify the sink of the change.
    pub fn update(&mut self, new: LoggingConfig, sink: &dyn ConfigSink) -> Result<(), ConfigError> {
        *self = new;
        let payload =
            serde_json::to_value(&*self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        sink.config_changed(ConfigUpdate {
            subsystem: Self::SUBSYSTEM,
            payload,
        })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::new(),
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sink::{ConfigSink, ConfigUpdate};

/// Configuration of the store subsystem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store type opened when none is requested explicitly.
    pub default_store_type: String,
}

impl StoreConfig {
    /// Subsystem identifier carried on change events.
    pub const SUBSYSTEM: &'static str = "store";

    /// Store type applied when none is configured.
    pub const DEFAULT_STORE_TYPE: &'static str = "eventlog";

    /// Assign defaults to unset fields.
    pub fn set_defaults(&mut self) {
        if self.default_store_type.is_empty() {
            self.default_store_type = Self::DEFAULT_STORE_TYPE.to_string();
        }
    }

    /// Check that every required field is set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_store_type.is_empty() {
            return Err(ConfigError::MissingField {
                subsystem: Self::SUBSYSTEM,
                field: "default_store_type",
            });
        }
        Ok(())
    }

    /// Replace this config and notify the sink of the change.
    pub fn update(&mut self, new: StoreConfig, sink: &dyn ConfigSink) -> Result<(), ConfigError> {
        *self = new;
        let payload =
            serde_json::to_value(&*self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        sink.config_changed(ConfigUpdate {
            subsystem: Self::SUBSYSTEM,
            payload,
        })
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_store_type: String::new(),
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use crate::store::StoreConfig;

/// Top-level process configuration, aggregating every subsystem.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub store: StoreConfig,
}

impl Config {
    /// Assign defaults to every unset field, cascading into subsystems.
    pub fn set_defaults(&mut self) {
        self.logging.set_defaults();
        self.store.set_defaults();
    }

    /// Validate every subsystem configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logging.validate()?;
        self.store.validate()
    }

    /// Parse from TOML, then apply defaults. The result still needs
    /// [`validate`](Config::validate) if fields may legitimately be
    /// rejected.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let mut config: Config =
            toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.set_defaults();
        Ok(config)
    }
}

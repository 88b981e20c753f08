use serde_json::Value;

use crate::error::ConfigError;

/// Change event published when a subsystem configuration is replaced.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigUpdate {
    /// Which subsystem changed, e.g. `"logging"`.
    pub subsystem: &'static str,
    /// The new configuration, serialized to JSON.
    pub payload: Value,
}

/// Receiver of configuration change events.
///
/// The config owner holds a reference to a sink and calls it directly on
/// every update — explicit dependency injection in place of a global
/// channel. Sinks must tolerate updates for subsystems they do not care
/// about (ignore them and return `Ok`).
pub trait ConfigSink: Send + Sync {
    fn config_changed(&self, update: ConfigUpdate) -> Result<(), ConfigError>;
}

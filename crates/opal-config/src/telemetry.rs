use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{reload, EnvFilter, Registry};

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use crate::sink::{ConfigSink, ConfigUpdate};

/// Sink that re-applies the logging level when the logging config
/// changes. Events for other subsystems are ignored.
pub struct TracingReloadSink {
    handle: reload::Handle<EnvFilter, Registry>,
}

/// Install the global tracing subscriber from the logging config.
///
/// The level filter sits behind a reload layer; the returned sink can be
/// handed to the config owner so later [`LoggingConfig::update`] calls
/// take effect on the running process. May only be called once per
/// process; a second call fails with [`ConfigError::Sink`].
pub fn init_tracing(config: &LoggingConfig) -> Result<TracingReloadSink, ConfigError> {
    let filter = parse_filter(&config.level)?;
    let (filter_layer, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| ConfigError::Sink(e.to_string()))?;

    Ok(TracingReloadSink { handle })
}

impl ConfigSink for TracingReloadSink {
    fn config_changed(&self, update: ConfigUpdate) -> Result<(), ConfigError> {
        if update.subsystem != LoggingConfig::SUBSYSTEM {
            return Ok(());
        }
        let config: LoggingConfig =
            serde_json::from_value(update.payload).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let filter = parse_filter(&config.level)?;
        self.handle
            .reload(filter)
            .map_err(|e| ConfigError::Sink(e.to_string()))?;
        debug!(level = %config.level, "reloaded log level");
        Ok(())
    }
}

fn parse_filter(level: &str) -> Result<EnvFilter, ConfigError> {
    EnvFilter::try_new(level).map_err(|e| ConfigError::Parse(e.to_string()))
}

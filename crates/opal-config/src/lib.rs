//! Configuration subsystem for OPAL.
//!
//! Each subsystem config follows the same shape: `set_defaults()` fills
//! unset fields, `validate()` checks the result, and `update()` replaces
//! the config and notifies an injected [`ConfigSink`] with a
//! [`ConfigUpdate`] tagged by subsystem. There is no process-wide bus;
//! whoever cares about changes is handed to the config owner explicitly.
//!
//! [`init_tracing`] wires the logging config to `tracing-subscriber` and
//! returns a sink that re-applies the level on every logging update.

pub mod config;
pub mod error;
pub mod logging;
pub mod sink;
pub mod store;
pub mod telemetry;

pub use config::Config;
pub use error::ConfigError;
pub use logging::LoggingConfig;
pub use sink::{ConfigSink, ConfigUpdate};
pub use store::StoreConfig;
pub use telemetry::{init_tracing, TracingReloadSink};

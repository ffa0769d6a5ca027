//! Client configuration.
//!
//! Settings are layered with figment: built-in defaults, then an optional
//! TOML file, then `TGWIRE_*` environment variables.

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, load_config, load_config_from_file};
pub use schema::{ClientConfig, LogFormat, LogLevel, LoggingConfig, PrepareConfig};

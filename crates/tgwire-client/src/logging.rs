//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is up to the application. These helpers cover the common case.
//!
//! # Configuration-Based Initialization
//!
//! ```rust,ignore
//! use tgwire_client::{config::load_config, logging};
//!
//! let config = load_config()?;
//! logging::init_from_config(&config.logging);
//! ```
//!
//! # Manual Initialization
//!
//! ```rust,ignore
//! use tgwire_client::logging::LoggingBuilder;
//!
//! LoggingBuilder::new()
//!     .directive("tgwire_core=trace")
//!     .init();
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LogFormat, LoggingConfig};

/// Initialize logging from a [`LoggingConfig`].
///
/// Does nothing if a global subscriber is already installed.
pub fn init_from_config(config: &LoggingConfig) {
    let _ = LoggingBuilder::from_config(config).try_init();
}

/// A builder for configuring logging.
#[derive(Debug)]
pub struct LoggingBuilder {
    directives: Vec<String>,
    level: tracing::Level,
    format: LogFormat,
    with_target: bool,
}

impl Default for LoggingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggingBuilder {
    /// Create a new logging builder.
    pub fn new() -> Self {
        Self {
            directives: Vec::new(),
            level: tracing::Level::INFO,
            format: LogFormat::Compact,
            with_target: true,
        }
    }

    /// Create a builder from a [`LoggingConfig`].
    pub fn from_config(config: &LoggingConfig) -> Self {
        Self {
            directives: config.directives.clone(),
            level: config.level.to_tracing_level(),
            format: config.format,
            with_target: config.with_target,
        }
    }

    /// Set the global log level.
    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = level;
        self
    }

    /// Add a filter directive, e.g. `tgwire_client=debug`.
    pub fn directive(mut self, directive: &str) -> Self {
        self.directives.push(directive.to_string());
        self
    }

    /// Set the output format.
    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Include the target (module path) in log output.
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    /// Build the filter. `RUST_LOG` wins over the configured level.
    fn build_filter(&self) -> EnvFilter {
        let base_filter = self.level.to_string().to_lowercase();
        let mut filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&base_filter));

        for directive in &self.directives {
            if let Ok(d) = directive.parse() {
                filter = filter.add_directive(d);
            }
        }

        filter
    }

    /// Initialize the logging system, ignoring an existing subscriber.
    pub fn init(self) {
        let _ = self.try_init();
    }

    /// Try to initialize the logging system.
    pub fn try_init(self) -> Result<(), TryInitError> {
        let filter = self.build_filter();
        let registry = tracing_subscriber::registry().with(filter);

        match self.format {
            #[cfg(feature = "json-log")]
            LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
            LogFormat::Compact => registry
                .with(fmt::layer().compact().with_target(self.with_target))
                .try_init(),
            LogFormat::Full => registry
                .with(fmt::layer().with_target(self.with_target))
                .try_init(),
            LogFormat::Pretty => registry
                .with(fmt::layer().pretty().with_target(self.with_target))
                .try_init(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn test_builder_from_config() {
        let config = LoggingConfig {
            level: LogLevel::Debug,
            directives: vec!["tgwire_core=trace".into()],
            format: LogFormat::Pretty,
            with_target: false,
        };
        let builder = LoggingBuilder::from_config(&config);
        assert_eq!(builder.level, tracing::Level::DEBUG);
        assert_eq!(builder.directives, vec!["tgwire_core=trace".to_string()]);
        assert!(!builder.with_target);
    }

    #[test]
    fn test_second_init_does_not_panic() {
        LoggingBuilder::new().init();
        LoggingBuilder::new().init();
    }
}

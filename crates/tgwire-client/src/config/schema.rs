//! Configuration schema definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use tgwire_core::{DepthPolicy, PrepareOptions};

use super::error::{ConfigError, ConfigResult};
use crate::api::DEFAULT_API_HOST;

/// Root configuration structure.
///
/// The access token is deliberately absent; callers pass it in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service host, e.g. a local Bot API server.
    #[serde(default = "default_api_host")]
    pub api_host: String,

    /// Timeout for regular calls, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Long polling timeout used when a `getUpdates` call sets none.
    #[serde(default)]
    pub long_poll_timeout_secs: Option<u32>,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Outbound preparation settings.
    #[serde(default)]
    pub prepare: PrepareConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_host: default_api_host(),
            timeout_secs: default_timeout_secs(),
            long_poll_timeout_secs: None,
            logging: LoggingConfig::default(),
            prepare: PrepareConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Timeout for regular calls.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Checks values serde cannot rule out.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.api_host.trim().is_empty() {
            return Err(ConfigError::validation("api_host must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::validation("timeout_secs must be at least 1"));
        }
        if self.prepare.max_depth == Some(0) {
            return Err(ConfigError::validation("prepare.max_depth must be at least 1"));
        }
        Ok(())
    }
}

fn default_api_host() -> String {
    DEFAULT_API_HOST.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Logging
// =============================================================================

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    /// Requires the `json-log` feature.
    #[cfg(feature = "json-log")]
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,

    /// Extra filter directives, e.g. `tgwire_core=trace`.
    #[serde(default)]
    pub directives: Vec<String>,

    #[serde(default)]
    pub format: LogFormat,

    /// Show the module path of each event.
    #[serde(default = "default_true")]
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            directives: Vec::new(),
            format: LogFormat::default(),
            with_target: true,
        }
    }
}

// =============================================================================
// Outbound preparation
// =============================================================================

/// Serializable subset of [`PrepareOptions`].
///
/// Identity fields and the flatten set keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepareConfig {
    #[serde(default = "default_true")]
    pub remove_none: bool,

    #[serde(default = "default_true")]
    pub unwrap_enums: bool,

    #[serde(default = "default_true")]
    pub update_offset_by_one: bool,

    /// Recursion ceiling; unbounded when absent.
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Fail instead of emitting the remaining subtree as-is.
    #[serde(default)]
    pub raise_on_depth_exceeded: bool,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            remove_none: true,
            unwrap_enums: true,
            update_offset_by_one: true,
            max_depth: None,
            raise_on_depth_exceeded: false,
        }
    }
}

impl PrepareConfig {
    /// Builds the options passed to the outbound mapper.
    pub fn to_options(&self) -> PrepareOptions {
        let options = PrepareOptions::default()
            .remove_none(self.remove_none)
            .unwrap_enums(self.unwrap_enums)
            .update_offset_by_one(self.update_offset_by_one);
        match self.max_depth {
            Some(depth) => {
                let policy = if self.raise_on_depth_exceeded {
                    DepthPolicy::Raise
                } else {
                    DepthPolicy::ReturnAsIs
                };
                options.max_depth(depth, policy)
            }
            None => options,
        }
    }
}

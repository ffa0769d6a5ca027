//! Configuration loader using figment.
//!
//! # Feature Flags
//!
//! - `toml-config` *(default)*: enables TOML configuration files (`tgwire.toml`)
//!
//! # Configuration Priority (lowest to highest)
//!
//! 1. Built-in defaults
//! 2. Programmatic overrides ([`ConfigLoader::merge`])
//! 3. Config file (`tgwire.toml`, searched or named explicitly)
//! 4. Environment variables (`TGWIRE_*`)
//!
//! # Environment Variable Mapping
//!
//! Environment variables use the `TGWIRE_` prefix with `__` as separator:
//!
//! - `TGWIRE_API_HOST=http://localhost:8081` → `api_host = "http://localhost:8081"`
//! - `TGWIRE_LOGGING__LEVEL=debug` → `logging.level = "debug"`
//! - `TGWIRE_PREPARE__MAX_DEPTH=16` → `prepare.max_depth = 16`
//!
//! # Example
//!
//! ```rust,ignore
//! use tgwire_client::config::ConfigLoader;
//!
//! let config = ConfigLoader::new()
//!     .file("./config/tgwire.toml")
//!     .load()?;
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
#[cfg(feature = "toml-config")]
use figment::providers::{Format, Toml};
use figment::providers::{Env, Serialized};
use tracing::{debug, info, trace, warn};

use super::error::{ConfigError, ConfigResult};
use super::schema::ClientConfig;

/// File name searched for in each search path.
pub const CONFIG_FILE_NAME: &str = "tgwire.toml";

/// Configuration loader with figment-based multi-source support.
pub struct ConfigLoader {
    /// Programmatic overrides.
    figment: Figment,
    /// Search paths for configuration files.
    search_paths: Vec<PathBuf>,
    /// Whether to load environment variables.
    load_env: bool,
    /// Specific config file to load (overrides search).
    config_file: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a new configuration loader with defaults.
    pub fn new() -> Self {
        Self {
            figment: Figment::new(),
            search_paths: Vec::new(),
            load_env: true,
            config_file: None,
        }
    }

    /// Adds a search path for configuration files.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Sets a specific configuration file to load.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enables loading environment variables (default: true).
    pub fn with_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Merges additional configuration programmatically.
    pub fn merge(mut self, config: ClientConfig) -> Self {
        self.figment = self.figment.merge(Serialized::defaults(config));
        self
    }

    /// Loads, validates and returns the configuration.
    pub fn load(self) -> ConfigResult<ClientConfig> {
        let figment = self.build_figment()?;

        let config: ClientConfig = figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;

        debug!(
            api_host = %config.api_host,
            logging_level = %config.logging.level,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Builds the figment instance with all sources.
    fn build_figment(mut self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(ClientConfig::default()));

        let user_figment = std::mem::take(&mut self.figment);
        figment = figment.merge(user_figment);

        if let Some(path) = self.config_file.take() {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path));
            }
            info!(path = %path.display(), "Loading configuration file");
            figment = Self::merge_config_file(figment, &path)?;
        } else {
            figment = self.load_config_files(figment);
        }

        if self.load_env {
            trace!("Loading environment variables with TGWIRE_ prefix");
            figment = figment.merge(Env::prefixed("TGWIRE_").split("__"));
        }

        Ok(figment)
    }

    /// Merges a single config file, dispatching on its extension.
    fn merge_config_file(figment: Figment, path: &Path) -> ConfigResult<Figment> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            #[cfg(feature = "toml-config")]
            "toml" => Ok(figment.merge(Toml::file(path))),
            _ => Err(ConfigError::ParseError(format!(
                "Unsupported or disabled configuration file format: .{ext}"
            ))),
        }
    }

    /// Resolves the effective list of search paths.
    fn resolve_search_paths(&self) -> Vec<PathBuf> {
        if !self.search_paths.is_empty() {
            return self.search_paths.clone();
        }
        let mut paths = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd);
        }
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("tgwire"));
        }
        paths
    }

    /// Merges the first configuration file found in the search paths.
    fn load_config_files(&self, figment: Figment) -> Figment {
        for search_path in self.resolve_search_paths() {
            let path = search_path.join(CONFIG_FILE_NAME);
            if path.exists() {
                info!(path = %path.display(), "Loading configuration file");
                match Self::merge_config_file(figment.clone(), &path) {
                    Ok(merged) => return merged,
                    Err(e) => warn!(path = %path.display(), error = %e, "Skipping configuration file"),
                }
            }
        }
        debug!("No configuration file found, using defaults");
        figment
    }
}

/// Loads configuration from the default locations.
pub fn load_config() -> ConfigResult<ClientConfig> {
    ConfigLoader::new().load()
}

/// Loads configuration from a specific file, with environment overrides.
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<ClientConfig> {
    ConfigLoader::new().file(path).load()
}

// =============================================================================
// Tests
// =============================================================================

//! Configuration Loader
//!
//! Loads [`ExportConfig`] from defaults, configuration files and the
//! environment, in that order of increasing precedence.

use crate::config::ExportConfig;
use crate::error::Result;
use sqlexport_common::{get_user_config_dir, CONFIG_FILE_NAMES};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Configuration loader that handles multiple sources with precedence
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    base_config: ExportConfig,
    config_paths: Vec<PathBuf>,
    load_from_env: bool,
    validate: bool,
}

impl ConfigLoader {
    /// Create a loader with the default search paths, env loading and validation
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_config: ExportConfig::default(),
            config_paths: Self::get_default_config_paths(),
            load_from_env: true,
            validate: true,
        }
    }

    /// Set the base configuration
    #[must_use]
    pub fn with_base_config(mut self, config: ExportConfig) -> Self {
        self.base_config = config;
        self
    }

    /// Add a configuration file path; later paths take precedence
    #[must_use]
    pub fn add_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Replace the configuration file paths
    #[must_use]
    pub fn with_config_paths<P: AsRef<Path>>(mut self, paths: Vec<P>) -> Self {
        self.config_paths = paths
            .into_iter()
            .map(|p| p.as_ref().to_path_buf())
            .collect();
        self
    }

    /// Disable loading from environment variables
    #[must_use]
    pub fn without_env_loading(mut self) -> Self {
        self.load_from_env = false;
        self
    }

    /// Enable or disable configuration validation
    #[must_use]
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate = enabled;
        self
    }

    /// Load configuration from all sources
    ///
    /// Missing files are skipped. Unreadable or malformed files are logged and
    /// skipped as well.
    ///
    /// # Errors
    /// Returns an error if an environment variable is malformed or the final
    /// configuration does not validate
    pub fn load(&self) -> Result<ExportConfig> {
        let mut config = self.base_config.clone();
        debug!("Starting configuration loading");

        for path in &self.config_paths {
            if !path.exists() {
                debug!("Configuration file not found: {}", path.display());
                continue;
            }
            match ExportConfig::from_file(path) {
                Ok(file_config) => {
                    config.merge_with(&file_config);
                    info!("Loaded configuration from: {}", path.display());
                }
                Err(e) => {
                    warn!(
                        "Failed to load configuration from {}: {}",
                        path.display(),
                        e
                    );
                }
            }
        }

        if self.load_from_env {
            debug!("Applying environment variables");
            config.apply_env()?;
        }

        if self.validate {
            config.validate()?;
            debug!("Configuration validation passed");
        }

        Ok(config)
    }

    /// Get the default configuration file paths, lowest precedence first
    #[must_use]
    pub fn get_default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![get_user_config_dir().join("config.yaml")];
        paths.extend(CONFIG_FILE_NAMES.iter().map(PathBuf::from));
        paths
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load configuration from the default paths and the environment
///
/// # Errors
/// Returns an error if configuration cannot be loaded
pub fn load_config() -> Result<ExportConfig> {
    ConfigLoader::new().load()
}

/// Load configuration from the given paths and the environment
///
/// # Errors
/// Returns an error if configuration cannot be loaded
pub fn load_config_with_paths<P: AsRef<Path>>(config_paths: Vec<P>) -> Result<ExportConfig> {
    ConfigLoader::new().with_config_paths(config_paths).load()
}

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths;
use crate::translation::DEFAULT_ENDPOINT;

/// Settings in the `[babelfish]` section of config.toml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BabelfishConfig {
    /// Base URL of the Google Translate v2 API.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
}

impl BabelfishConfig {
    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.trim().is_empty()
        {
            return Some(key.trim().to_string());
        }
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
    }

    /// The configured endpoint, or the public Google endpoint.
    pub fn endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/babelfish/config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub babelfish: BabelfishConfig,
}

/// Resolves the API key.
///
/// Priority (highest to lowest):
/// 1. `--apikey` on the command line
/// 2. the key file next to the executable
/// 3. the config file (`api_key_env`, then `api_key`)
///
/// # Errors
///
/// Returns `apikey not specified.` if no source yields a non-blank key.
pub fn resolve_api_key(
    cli_key: Option<&str>,
    key_file: Option<&Path>,
    config_file: &ConfigFile,
) -> Result<String> {
    if let Some(key) = cli_key.map(str::trim).filter(|key| !key.is_empty()) {
        return Ok(key.to_string());
    }

    if let Some(path) = key_file.filter(|path| path.is_file()) {
        let key = fs::read_to_string(path)
            .with_context(|| format!("Failed to read API key file: {}", path.display()))?;
        if !key.trim().is_empty() {
            return Ok(key.trim().to_string());
        }
    }

    if let Some(key) = config_file.babelfish.get_api_key() {
        return Ok(key);
    }

    bail!("apikey not specified.")
}

/// Locates and loads the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/babelfish/config.toml`
    /// or `~/.config/babelfish/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Self {
        Self {
            config_path: paths::config_dir().join("config.toml"),
        }
    }

    #[cfg(test)]
    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    #[cfg(test)]
    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    /// Loads the config file; a missing file yields defaults, a broken one is an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

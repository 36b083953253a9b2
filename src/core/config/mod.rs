//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. User config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order:
//! 1. `$CMDUSAGE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/cmdusage/config.toml`
//! 3. `~/.cmdusage/config.toml` (canonical write location)
//!
//! # Example
//!
//! ```no_run
//! use cmdusage::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("Root token: {}", config.root_token());
//! println!("Color: {}", config.color());
//! ```

pub mod schema;

pub use schema::{ColorChoice, UserConfig};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::manifest::LoadOptions;
use crate::render::DEFAULT_ROOT_TOKEN;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CMDUSAGE_CONFIG";

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const KEYS: &[&str] = &["root_token", "color", "sort_commands", "help_flag"];

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("unknown config key '{0}' (known keys: root_token, color, sort_commands, help_flag)")]
    UnknownKey(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Effective configuration.
///
/// Accessors apply defaults for anything the file leaves unset.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Values read from the config file
    pub user: UserConfig,
    /// Path the values were loaded from (if any)
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed,
    /// or validated. A missing file is not an error (defaults are used).
    pub fn load() -> Result<Config, ConfigError> {
        let located = Self::locate(|key| std::env::var(key).ok(), dirs::home_dir());
        match located {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("no config file found, using defaults");
                Ok(Config::default())
            }
        }
    }

    /// Wrap values that did not come from a file.
    pub fn from_user(user: UserConfig) -> Config {
        Config { user, path: None }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let user = Self::read_user_config(path)?;
        user.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(Config {
            user,
            path: Some(path.to_path_buf()),
        })
    }

    /// Find the first existing config file.
    ///
    /// `env` looks up environment variables; `home` is the user's home
    /// directory.
    pub fn locate(
        env: impl Fn(&str) -> Option<String>,
        home: Option<PathBuf>,
    ) -> Option<PathBuf> {
        // 1. Check $CMDUSAGE_CONFIG
        if let Some(path) = env(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
            warn!(path = %path.display(), "{} names a missing file, ignoring", CONFIG_ENV);
        }

        // 2. Check $XDG_CONFIG_HOME/cmdusage/config.toml
        if let Some(xdg_home) = env("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("cmdusage/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.cmdusage/config.toml
        if let Some(home) = home {
            let path = home.join(".cmdusage/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        None
    }

    /// Read and parse a config file.
    fn read_user_config(path: &Path) -> Result<UserConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the path new values are written to.
    ///
    /// Returns `$CMDUSAGE_CONFIG` if set, else `~/.cmdusage/config.toml`.
    pub fn write_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".cmdusage/config.toml"))
    }

    /// Write a config file atomically.
    ///
    /// Creates parent directories if needed. Writes to a temp file in the
    /// same directory, then renames it over the target.
    pub fn write(path: &Path, config: &UserConfig) -> Result<(), ConfigError> {
        config.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Get the root token.
    ///
    /// Defaults to "tanzu" if not configured.
    pub fn root_token(&self) -> &str {
        self.user.root_token.as_deref().unwrap_or(DEFAULT_ROOT_TOKEN)
    }

    /// Get the color choice.
    ///
    /// Defaults to `auto` if not configured.
    pub fn color(&self) -> ColorChoice {
        self.user.color.unwrap_or_default()
    }

    /// Check if manifest commands are sorted by name.
    ///
    /// Defaults to `true` if not configured.
    pub fn sort_commands(&self) -> bool {
        self.user.sort_commands.unwrap_or(true)
    }

    /// Check if manifest commands get a help flag.
    ///
    /// Defaults to `true` if not configured.
    pub fn help_flag(&self) -> bool {
        self.user.help_flag.unwrap_or(true)
    }

    /// Manifest loading defaults derived from this config.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            sort_commands: self.sort_commands(),
            help_flag: self.help_flag(),
        }
    }

    /// Path the config was loaded from, if any.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get the effective value of a key as text.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "root_token" => Ok(self.root_token().to_string()),
            "color" => Ok(self.color().to_string()),
            "sort_commands" => Ok(self.sort_commands().to_string()),
            "help_flag" => Ok(self.help_flag().to_string()),
            other => Err(ConfigError::UnknownKey(other.to_string())),
        }
    }

    /// Set a key from text, validating the value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "root_token" => {
                schema::validate_root_token(value)?;
                self.user.root_token = Some(value.to_string());
            }
            "color" => self.user.color = Some(value.parse()?),
            "sort_commands" => self.user.sort_commands = Some(parse_bool(key, value)?),
            "help_flag" => self.user.help_flag = Some(parse_bool(key, value)?),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse().map_err(|_| {
        ConfigError::InvalidValue(format!("{key} must be 'true' or 'false', got '{value}'"))
    })
}

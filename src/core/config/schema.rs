//! core::config::schema
//!
//! Configuration schema types.
//!
//! # User Config
//!
//! Located at (in order of precedence):
//! 1. `$CMDUSAGE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/cmdusage/config.toml`
//! 3. `~/.cmdusage/config.toml` (canonical write location)
//!
//! # Validation
//!
//! Config values are validated after parsing (e.g., the root token must be
//! a single word).

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::render::format::Style;

/// User configuration.
///
/// # Example
///
/// ```toml
/// root_token = "tanzu"
/// color = "auto"
/// sort_commands = true
/// help_flag = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct UserConfig {
    /// Program name prefixed to invocation lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_token: Option<String>,

    /// When to emit ANSI styling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorChoice>,

    /// Sort manifest commands by name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_commands: Option<bool>,

    /// Add `-h, --help` to every manifest command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_flag: Option<bool>,
}

impl UserConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(token) = &self.root_token {
            validate_root_token(token)?;
        }
        Ok(())
    }
}

/// Check that a root token is one non-empty word.
pub fn validate_root_token(token: &str) -> Result<(), ConfigError> {
    if token.is_empty() {
        return Err(ConfigError::InvalidValue(
            "root_token cannot be empty".into(),
        ));
    }
    if token.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidValue(format!(
            "root_token '{token}' cannot contain whitespace"
        )));
    }
    Ok(())
}

/// When to style output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Style only when writing to a terminal
    #[default]
    Auto,
    /// Always style
    Always,
    /// Never style
    Never,
}

impl ColorChoice {
    /// Resolve to a concrete style for a sink.
    pub fn style(self, is_terminal: bool) -> Style {
        match self {
            ColorChoice::Auto => Style::detect(is_terminal),
            ColorChoice::Always => Style::Ansi,
            ColorChoice::Never => Style::Plain,
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorChoice::Auto => "auto",
            ColorChoice::Always => "always",
            ColorChoice::Never => "never",
        })
    }
}

impl FromStr for ColorChoice {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            other => Err(ConfigError::InvalidValue(format!(
                "invalid color '{other}', must be one of: auto, always, never"
            ))),
        }
    }
}

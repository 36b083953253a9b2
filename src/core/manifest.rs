//! core::manifest
//!
//! Declarative command trees.
//!
//! # Format
//!
//! A manifest is TOML (or JSON when the file ends in `.json`):
//!
//! ```toml
//! [settings]
//! sort_commands = true
//! help_flag = true
//!
//! [command]
//! use = "cluster"
//! short = "Manage clusters"
//! annotations = { target = "kubernetes" }
//!
//! [[command.flags]]
//! name = "context"
//! type = "string"
//! usage = "kube `context` to use"
//! persistent = true
//!
//! [[command.commands]]
//! use = "create NAME"
//! short = "Create a cluster"
//! runnable = true
//! ```
//!
//! Unknown fields are rejected so typos surface as errors instead of
//! silently missing help text.
//!
//! # Settings
//!
//! `sort_commands` orders children by name; `help_flag` gives every command
//! a `-h, --help` flag. Both default to the caller's [`LoadOptions`]; values
//! in the manifest override them.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::flags::{Flag, FlagKind};
use super::node::CommandNode;
use super::types::NodeError;

/// Errors from loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse manifest '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid command '{command}': {source}")]
    Invalid { command: String, source: NodeError },
}

/// Serialization format of a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Toml,
    Json,
}

impl ManifestFormat {
    /// Choose a format from the file extension; anything but `.json` is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ManifestFormat::Json,
            _ => ManifestFormat::Toml,
        }
    }
}

/// Defaults applied when a manifest does not set them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub sort_commands: bool,
    pub help_flag: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            sort_commands: true,
            help_flag: true,
        }
    }
}

/// Top-level manifest document.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub settings: ManifestSettings,
    pub command: CommandSpec,
}

/// Manifest-level overrides of [`LoadOptions`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_commands: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_flag: Option<bool>,
}

/// One command as written in a manifest.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommandSpec {
    #[serde(rename = "use")]
    pub use_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub short: String,
    pub long: String,
    pub aliases: Vec<String>,
    pub example: String,
    pub annotations: BTreeMap<String, String>,
    pub runnable: bool,
    pub hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    pub disable_flags_in_use_line: bool,
    pub flags: Vec<FlagSpec>,
    pub commands: Vec<CommandSpec>,
}

/// One flag as written in a manifest.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlagSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shorthand: Option<char>,
    #[serde(rename = "type")]
    pub kind: FlagKind,
    pub usage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
    pub persistent: bool,
    pub hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
}

/// A flag default as written: any scalar, or a list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl DefaultValue {
    /// The value as shown in usage text; lists render as `[a,b]`.
    pub fn display(&self) -> String {
        match self {
            DefaultValue::Bool(b) => b.to_string(),
            DefaultValue::Int(i) => i.to_string(),
            DefaultValue::Float(f) => f.to_string(),
            DefaultValue::Text(s) => s.clone(),
            DefaultValue::List(items) => format!("[{}]", items.join(",")),
        }
    }
}

impl Manifest {
    /// Parse a manifest from text.
    pub fn parse(contents: &str, format: ManifestFormat) -> Result<Self, String> {
        match format {
            ManifestFormat::Toml => toml::from_str(contents).map_err(|e| e.to_string()),
            ManifestFormat::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
        }
    }

    /// Build the command tree.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::Invalid` naming the first command whose
    /// definition is rejected.
    pub fn into_tree(self, defaults: LoadOptions) -> Result<CommandNode, ManifestError> {
        let options = LoadOptions {
            sort_commands: self.settings.sort_commands.unwrap_or(defaults.sort_commands),
            help_flag: self.settings.help_flag.unwrap_or(defaults.help_flag),
        };
        let mut root = build_node(self.command, None)?;
        if options.help_flag {
            root.walk_mut(&mut add_help_flag)
                .map_err(|source| ManifestError::Invalid {
                    command: root_label(&root),
                    source,
                })?;
        }
        if options.sort_commands {
            root.sort_subcommands();
        }
        Ok(root)
    }
}

/// Load a manifest file into a command tree.
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not parse, or defines
/// an invalid command.
pub fn load(path: &Path, defaults: LoadOptions) -> Result<CommandNode, ManifestError> {
    let contents = fs::read_to_string(path).map_err(|e| ManifestError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let format = ManifestFormat::from_path(path);
    debug!(path = %path.display(), ?format, "loading manifest");

    let manifest = Manifest::parse(&contents, format).map_err(|message| ManifestError::Parse {
        path: path.to_path_buf(),
        message,
    })?;
    manifest.into_tree(defaults)
}

fn root_label(root: &CommandNode) -> String {
    root.name().to_string()
}

fn build_node(spec: CommandSpec, parent: Option<&str>) -> Result<CommandNode, ManifestError> {
    let label = match (&spec.name, spec.use_line.split_whitespace().next()) {
        (Some(name), _) => name.clone(),
        (None, Some(first)) => first.to_string(),
        (None, None) => "<unnamed>".to_string(),
    };
    let path = match parent {
        Some(p) => format!("{p} {label}"),
        None => label,
    };
    let invalid = |source: NodeError| ManifestError::Invalid {
        command: path.clone(),
        source,
    };

    let mut node = CommandNode::new(spec.use_line).map_err(invalid)?;
    if let Some(name) = spec.name {
        node = node.with_name(name).map_err(invalid)?;
    }
    node = node.short(spec.short).long(spec.long).example(spec.example);
    for alias in spec.aliases {
        node = node.alias(alias);
    }
    for (key, value) in spec.annotations {
        node.set_annotation(key, value);
    }
    if spec.runnable {
        node = node.runnable();
    }
    if spec.hidden {
        node = node.hidden();
    }
    if let Some(message) = spec.deprecated {
        node = node.deprecated(message);
    }
    if spec.disable_flags_in_use_line {
        node = node.disable_flags_in_use_line();
    }
    for flag in spec.flags {
        node.add_flag(build_flag(flag).map_err(|e| invalid(e.into()))?)
            .map_err(invalid)?;
    }
    for child in spec.commands {
        let child = build_node(child, Some(&path))?;
        node.add_subcommand(child).map_err(invalid)?;
    }
    Ok(node)
}

fn build_flag(spec: FlagSpec) -> Result<Flag, super::flags::FlagError> {
    let mut flag = Flag::new(spec.name, spec.kind, spec.usage)?;
    if let Some(short) = spec.shorthand {
        flag = flag.with_shorthand(short)?;
    }
    if let Some(value_name) = spec.value_name {
        flag = flag.with_value_name(value_name);
    }
    if let Some(default) = spec.default {
        flag = flag.with_default(default.display());
    }
    if spec.persistent {
        flag = flag.persistent();
    }
    if spec.hidden {
        flag = flag.hidden();
    }
    if let Some(message) = spec.deprecated {
        flag = flag.deprecated(message);
    }
    Ok(flag)
}

fn add_help_flag(node: &mut CommandNode) -> Result<(), NodeError> {
    let flags = node.local_flags();
    if flags.lookup("help").is_some() {
        return Ok(());
    }
    let mut help = Flag::new("help", FlagKind::Bool, format!("help for {}", node.name()))?;
    if flags.lookup_shorthand('h').is_none() {
        help = help.with_shorthand('h')?;
    }
    node.add_flag(help)
}

//! core::types
//!
//! Strong types for command-tree concepts.
//!
//! # Types
//!
//! - [`CommandName`] - Validated command name (one word, no whitespace)
//! - [`TargetKind`] - Routing domain derived from a node's `target` annotation
//!
//! # Validation
//!
//! These types enforce validity at construction time. The renderer never
//! re-parses raw annotation strings; it branches on [`TargetKind`].
//!
//! # Examples
//!
//! ```
//! use cmdusage::core::types::{CommandName, TargetKind};
//!
//! let name = CommandName::new("create").unwrap();
//! assert_eq!(name.as_str(), "create");
//! assert!(CommandName::new("two words").is_err());
//!
//! assert!(TargetKind::parse("k8s").is_kubernetes());
//! assert_eq!(TargetKind::parse("k8s").segment(), Some("k8s"));
//! assert_eq!(TargetKind::parse("staging"), TargetKind::Named("staging".into()));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Annotation key holding a node's routing target.
pub const TARGET_ANNOTATION: &str = "target";

/// Errors from node construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NodeError {
    #[error("invalid command name: {0}")]
    InvalidName(String),

    #[error("invalid use line: {0}")]
    InvalidUseLine(String),

    #[error("invalid flag: {0}")]
    InvalidFlag(#[from] super::flags::FlagError),

    #[error("duplicate command '{name}' under '{parent}'")]
    DuplicateChild { parent: String, name: String },
}

/// A validated command name.
///
/// Command names are the first word of a use line: non-empty, without
/// whitespace, and not starting with `-` (that would read as a flag).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommandName(String);

impl CommandName {
    /// Create a new validated command name.
    ///
    /// # Errors
    ///
    /// Returns `NodeError::InvalidName` if the name is empty, contains
    /// whitespace, or starts with `-`.
    pub fn new(name: impl Into<String>) -> Result<Self, NodeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(NodeError::InvalidName("name cannot be empty".into()));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(NodeError::InvalidName(format!(
                "'{name}' cannot contain whitespace"
            )));
        }
        if name.starts_with('-') {
            return Err(NodeError::InvalidName(format!(
                "'{name}' cannot start with '-'"
            )));
        }
        Ok(Self(name))
    }

    /// Derive a name from a use line (its first word).
    pub fn from_use_line(use_line: &str) -> Result<Self, NodeError> {
        let first = use_line.split_whitespace().next().ok_or_else(|| {
            NodeError::InvalidUseLine("use line cannot be empty".into())
        })?;
        Self::new(first)
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CommandName {
    type Error = NodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CommandName> for String {
    fn from(name: CommandName) -> Self {
        name.0
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CommandName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Routing domain of a command, classified from its `target` annotation.
///
/// | annotation value        | kind          |
/// |-------------------------|---------------|
/// | absent or empty         | `None`        |
/// | `global`                | `Global`      |
/// | `kubernetes`, `k8s`     | `Kubernetes(v)` |
/// | anything else           | `Named(v)`    |
///
/// Both Kubernetes spellings are one class; the spelling is kept so the
/// target segment prints as written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum TargetKind {
    #[default]
    None,
    Global,
    Kubernetes(String),
    Named(String),
}

impl TargetKind {
    /// Classify a raw annotation value.
    pub fn parse(value: &str) -> Self {
        match value {
            "" => TargetKind::None,
            "global" => TargetKind::Global,
            "kubernetes" | "k8s" => TargetKind::Kubernetes(value.to_string()),
            other => TargetKind::Named(other.to_string()),
        }
    }

    /// The segment inserted between the root token and the command path,
    /// if this target has one.
    pub fn segment(&self) -> Option<&str> {
        match self {
            TargetKind::None | TargetKind::Global => None,
            TargetKind::Kubernetes(name) | TargetKind::Named(name) => Some(name),
        }
    }

    /// Whether this is the Kubernetes target.
    pub fn is_kubernetes(&self) -> bool {
        matches!(self, TargetKind::Kubernetes(_))
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::None => f.write_str("none"),
            TargetKind::Global => f.write_str("global"),
            TargetKind::Kubernetes(name) | TargetKind::Named(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_name_valid() {
        assert_eq!(CommandName::new("login").unwrap().as_str(), "login");
        assert_eq!(CommandName::new("get-credentials").unwrap().as_str(), "get-credentials");
    }

    #[test]
    fn command_name_rejects_invalid() {
        assert!(CommandName::new("").is_err());
        assert!(CommandName::new("a b").is_err());
        assert!(CommandName::new("--help").is_err());
    }

    #[test]
    fn command_name_from_use_line_takes_first_word() {
        let name = CommandName::from_use_line("create CLUSTER_NAME [flags]").unwrap();
        assert_eq!(name.as_str(), "create");
    }

    #[test]
    fn command_name_from_blank_use_line_fails() {
        assert!(matches!(
            CommandName::from_use_line("   "),
            Err(NodeError::InvalidUseLine(_))
        ));
    }

    #[test]
    fn command_name_serde_validates() {
        let ok: Result<CommandName, _> = serde_json::from_str("\"apply\"");
        assert!(ok.is_ok());
        let bad: Result<CommandName, _> = serde_json::from_str("\"two words\"");
        assert!(bad.is_err());
    }

    #[test]
    fn target_kind_classification() {
        assert_eq!(TargetKind::parse(""), TargetKind::None);
        assert_eq!(TargetKind::parse("global"), TargetKind::Global);
        assert!(TargetKind::parse("kubernetes").is_kubernetes());
        assert!(TargetKind::parse("k8s").is_kubernetes());
        assert!(!TargetKind::parse("k8s-prod").is_kubernetes());
        assert_eq!(
            TargetKind::parse("mission-control"),
            TargetKind::Named("mission-control".into())
        );
    }

    #[test]
    fn target_kind_classification_is_case_sensitive() {
        assert_eq!(TargetKind::parse("Global"), TargetKind::Named("Global".into()));
    }

    #[test]
    fn target_segment() {
        assert_eq!(TargetKind::None.segment(), None);
        assert_eq!(TargetKind::Global.segment(), None);
        assert_eq!(TargetKind::parse("kubernetes").segment(), Some("kubernetes"));
        assert_eq!(TargetKind::parse("k8s").segment(), Some("k8s"));
        assert_eq!(TargetKind::Named("tmc".into()).segment(), Some("tmc"));
    }
}

//! core::flags
//!
//! Flag definitions and their usage text.
//!
//! # Layout
//!
//! Flag usage text is column-aligned:
//!
//! ```text
//!   -o, --output string      output format (default "table")
//!       --timeout duration   how long to wait
//! ```
//!
//! Flags with a shorthand start at column 2, flags without one are indented
//! so the long names line up. The usage column starts three spaces after
//! the widest flag column. Continuation lines of a multi-line usage are
//! indented to the usage column.
//!
//! Lines may carry trailing whitespace (a flag with empty usage still gets
//! its separator); callers that need clean output trim it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from flag definitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlagError {
    #[error("flag name cannot be empty")]
    EmptyName,

    #[error("invalid flag name '{0}'")]
    InvalidName(String),

    #[error("invalid shorthand '{shorthand}' for flag '{flag}'")]
    InvalidShorthand { flag: String, shorthand: char },

    #[error("flag '{0}' is defined more than once")]
    Duplicate(String),

    #[error("shorthand '-{shorthand}' of flag '{flag}' is already used by '{existing}'")]
    DuplicateShorthand {
        flag: String,
        shorthand: char,
        existing: String,
    },
}

/// Value type of a flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlagKind {
    #[default]
    Bool,
    String,
    Int,
    Uint,
    Float,
    Duration,
    #[serde(alias = "strings")]
    StringSlice,
    #[serde(alias = "ints")]
    IntSlice,
}

impl FlagKind {
    /// Variable name shown after the flag when the usage text names none.
    ///
    /// Booleans take no value, so they show nothing.
    pub fn type_name(self) -> &'static str {
        match self {
            FlagKind::Bool => "",
            FlagKind::String => "string",
            FlagKind::Int => "int",
            FlagKind::Uint => "uint",
            FlagKind::Float => "float",
            FlagKind::Duration => "duration",
            FlagKind::StringSlice => "strings",
            FlagKind::IntSlice => "ints",
        }
    }

    /// Whether `value` is the zero value for this kind.
    fn is_zero(self, value: &str) -> bool {
        match self {
            FlagKind::Bool => value == "false",
            FlagKind::Int | FlagKind::Uint | FlagKind::Float => value == "0",
            FlagKind::Duration => value == "0" || value == "0s",
            FlagKind::String => value.is_empty(),
            FlagKind::StringSlice | FlagKind::IntSlice => value.is_empty() || value == "[]",
        }
    }
}

/// A single command-line flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    name: String,
    shorthand: Option<char>,
    kind: FlagKind,
    usage: String,
    value_name: Option<String>,
    default: Option<String>,
    persistent: bool,
    hidden: bool,
    deprecated: Option<String>,
}

impl Flag {
    /// Create a flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty, starts with `-`, or contains
    /// whitespace or `=`.
    pub fn new(
        name: impl Into<String>,
        kind: FlagKind,
        usage: impl Into<String>,
    ) -> Result<Self, FlagError> {
        let name = name.into();
        if name.is_empty() {
            return Err(FlagError::EmptyName);
        }
        if name.starts_with('-') || name.contains('=') || name.chars().any(char::is_whitespace) {
            return Err(FlagError::InvalidName(name));
        }
        Ok(Self {
            name,
            shorthand: None,
            kind,
            usage: usage.into(),
            value_name: None,
            default: None,
            persistent: false,
            hidden: false,
            deprecated: None,
        })
    }

    /// Set the one-letter shorthand.
    ///
    /// # Errors
    ///
    /// Returns an error if the shorthand is not ASCII alphanumeric.
    pub fn with_shorthand(mut self, shorthand: char) -> Result<Self, FlagError> {
        if !shorthand.is_ascii_alphanumeric() {
            return Err(FlagError::InvalidShorthand {
                flag: self.name,
                shorthand,
            });
        }
        self.shorthand = Some(shorthand);
        Ok(self)
    }

    /// Name the flag's value explicitly, e.g. `FILE`.
    ///
    /// A back-quoted word in the usage text still takes precedence.
    pub fn with_value_name(mut self, value_name: impl Into<String>) -> Self {
        self.value_name = Some(value_name.into());
        self
    }

    /// Set the default value, as it should be displayed.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Mark the flag as inherited by all descendant commands.
    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }

    /// Hide the flag from usage text.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Mark the flag deprecated with a message.
    pub fn deprecated(mut self, message: impl Into<String>) -> Self {
        self.deprecated = Some(message.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shorthand(&self) -> Option<char> {
        self.shorthand
    }

    pub fn kind(&self) -> FlagKind {
        self.kind
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn deprecation(&self) -> Option<&str> {
        self.deprecated.as_deref()
    }

    /// Split the usage text into a variable name and the displayed usage.
    ///
    /// A back-quoted word in the usage names the variable and is shown
    /// without quotes; otherwise the variable is the explicit value name, or
    /// the kind's type name.
    ///
    /// ```
    /// use cmdusage::core::flags::{Flag, FlagKind};
    ///
    /// let flag = Flag::new("config", FlagKind::String, "load `file` at startup").unwrap();
    /// assert_eq!(flag.unquote_usage(), ("file".to_string(), "load file at startup".to_string()));
    /// ```
    pub fn unquote_usage(&self) -> (String, String) {
        if let Some(start) = self.usage.find('`') {
            let rest = &self.usage[start + 1..];
            if let Some(len) = rest.find('`') {
                let name = &rest[..len];
                let usage = format!("{}{}{}", &self.usage[..start], name, &rest[len + 1..]);
                return (name.to_string(), usage);
            }
        }
        let varname = match &self.value_name {
            Some(name) => name.clone(),
            None => self.kind.type_name().to_string(),
        };
        (varname, self.usage.clone())
    }

    /// Whether the default should be shown in usage text.
    fn shows_default(&self) -> bool {
        match &self.default {
            Some(value) => !self.kind.is_zero(value),
            None => false,
        }
    }

    /// The flag column, e.g. `  -o, --output string`.
    fn flag_column(&self) -> String {
        let mut column = match self.shorthand {
            Some(short) => format!("  -{short}, --{}", self.name),
            None => format!("      --{}", self.name),
        };
        let (varname, _) = self.unquote_usage();
        if !varname.is_empty() {
            column.push(' ');
            column.push_str(&varname);
        }
        column
    }

    /// The usage column with default and deprecation notes appended.
    fn usage_column(&self) -> String {
        let (_, mut usage) = self.unquote_usage();
        if self.shows_default() {
            if let Some(default) = &self.default {
                if self.kind == FlagKind::String {
                    usage.push_str(&format!(" (default {default:?})"));
                } else {
                    usage.push_str(&format!(" (default {default})"));
                }
            }
        }
        if let Some(message) = &self.deprecated {
            usage.push_str(&format!(" (DEPRECATED: {message})"));
        }
        usage
    }
}

/// An ordered set of flags, kept sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet {
    flags: Vec<Flag>,
}

impl FlagSet {
    /// Create an empty flag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or shorthand is already used.
    pub fn add(&mut self, flag: Flag) -> Result<(), FlagError> {
        if self.lookup(&flag.name).is_some() {
            return Err(FlagError::Duplicate(flag.name));
        }
        if let Some(short) = flag.shorthand {
            if let Some(existing) = self.lookup_shorthand(short) {
                return Err(FlagError::DuplicateShorthand {
                    flag: flag.name.clone(),
                    shorthand: short,
                    existing: existing.name.clone(),
                });
            }
        }
        let index = self
            .flags
            .binary_search_by(|f| f.name.as_str().cmp(flag.name.as_str()))
            .unwrap_or_else(|i| i);
        self.flags.insert(index, flag);
        Ok(())
    }

    /// Add a flag unless its name or shorthand is already taken.
    ///
    /// Returns whether the flag was added.
    pub fn add_if_absent(&mut self, flag: &Flag) -> bool {
        self.add(flag.clone()).is_ok()
    }

    /// Find a flag by long name.
    pub fn lookup(&self, name: &str) -> Option<&Flag> {
        self.flags.iter().find(|f| f.name == name)
    }

    /// Find a flag by shorthand.
    pub fn lookup_shorthand(&self, shorthand: char) -> Option<&Flag> {
        self.flags.iter().find(|f| f.shorthand == Some(shorthand))
    }

    /// Iterate over all flags in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.iter()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Whether any flag would appear in usage text.
    pub fn has_available(&self) -> bool {
        self.flags.iter().any(|f| !f.hidden)
    }

    /// Render usage text for all visible flags.
    ///
    /// Returns an empty string when no flag is visible.
    pub fn usages(&self) -> String {
        let rows: Vec<(String, String)> = self
            .flags
            .iter()
            .filter(|f| !f.hidden)
            .map(|f| (f.flag_column(), f.usage_column()))
            .collect();

        let width = rows
            .iter()
            .map(|(column, _)| column.chars().count())
            .max()
            .unwrap_or(0);
        let continuation = format!("\n{}", " ".repeat(width + 3));

        let mut out = String::new();
        for (column, usage) in rows {
            let pad = width - column.chars().count();
            out.push_str(&column);
            out.push_str(&" ".repeat(pad + 3));
            out.push_str(&usage.replace('\n', &continuation));
            out.push('\n');
        }
        out
    }
}

impl<'a> IntoIterator for &'a FlagSet {
    type Item = &'a Flag;
    type IntoIter = std::slice::Iter<'a, Flag>;

    fn into_iter(self) -> Self::IntoIter {
        self.flags.iter()
    }
}

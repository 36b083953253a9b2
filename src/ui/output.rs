//! ui::output
//!
//! Status output and display helpers.
//!
//! # Design
//!
//! Status messages respect the quiet flag; errors are always shown.
//! Diagnostics for developers go through `tracing`, not through here.

use std::fmt::Display;

use owo_colors::OwoColorize;

use crate::render::format::Style;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Print a success message (respects quiet mode).
pub fn success(message: impl Display, verbosity: Verbosity, style: Style) {
    if verbosity != Verbosity::Quiet {
        println!("{}", paint_success(&message.to_string(), style));
    }
}

/// Green text when styling is on.
pub fn paint_success(text: &str, style: Style) -> String {
    match style {
        Style::Ansi => text.green().to_string(),
        Style::Plain => text.to_string(),
    }
}

/// Dimmed text when styling is on.
pub fn paint_dim(text: &str, style: Style) -> String {
    match style {
        Style::Ansi => text.dimmed().to_string(),
        Style::Plain => text.to_string(),
    }
}

/// `1 command`, `3 commands`.
pub fn format_count(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Join an error and its causes with `: `.
///
/// Causes whose text already appears in the message so far are skipped,
/// since most error types here embed their source in their own message.
pub fn error_chain(err: &anyhow::Error) -> String {
    let mut message = String::new();
    for cause in err.chain() {
        let text = cause.to_string();
        if message.contains(&text) {
            continue;
        }
        if !message.is_empty() {
            message.push_str(": ");
        }
        message.push_str(&text);
    }
    message
}

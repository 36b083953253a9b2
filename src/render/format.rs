//! render::format
//!
//! Pure text helpers used while composing usage text.
//!
//! None of these hold state; styling is decided by the [`Style`] passed in.

use owo_colors::OwoColorize;

/// How section headers are styled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Style {
    /// No escape sequences.
    #[default]
    Plain,
    /// ANSI escape sequences.
    Ansi,
}

impl Style {
    /// Pick a style for a sink, honouring `NO_COLOR`.
    pub fn detect(is_terminal: bool) -> Self {
        if is_terminal && std::env::var_os("NO_COLOR").is_none() {
            Style::Ansi
        } else {
            Style::Plain
        }
    }
}

/// Render `text` in bold.
pub fn bold(text: &str, style: Style) -> String {
    match style {
        Style::Plain => text.to_string(),
        Style::Ansi => text.bold().to_string(),
    }
}

/// Render `text` underlined.
pub fn underline(text: &str, style: Style) -> String {
    match style {
        Style::Plain => text.to_string(),
        Style::Ansi => text.underline().to_string(),
    }
}

/// Pad `text` with trailing spaces to `width` characters.
///
/// ```
/// use cmdusage::render::format::rpad;
///
/// assert_eq!(rpad("build", 10), "build     ");
/// assert_eq!(rpad("builder-long-name", 5), "builder-long-name");
/// ```
pub fn rpad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{text}{}", " ".repeat(width - len))
}

/// Remove trailing whitespace from every line, keeping the line breaks.
///
/// ```
/// use cmdusage::render::format::trim_right_space;
///
/// assert_eq!(trim_right_space("a  \nb   \n"), "a\nb\n");
/// ```
pub fn trim_right_space(text: &str) -> String {
    text.split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Case-sensitive prefix test.
pub fn begins_with(text: &str, prefix: &str) -> bool {
    text.starts_with(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpad_pads_to_width() {
        assert_eq!(rpad("build", 10), "build     ");
        assert_eq!(rpad("build", 10).len(), 10);
    }

    #[test]
    fn rpad_leaves_long_text_alone() {
        assert_eq!(rpad("builder-long-name", 5), "builder-long-name");
        assert_eq!(rpad("exact", 5), "exact");
    }

    #[test]
    fn rpad_counts_characters() {
        assert_eq!(rpad("héllo", 6), "héllo ");
    }

    #[test]
    fn trim_right_space_per_line() {
        assert_eq!(trim_right_space("a  \nb   \n"), "a\nb\n");
        assert_eq!(trim_right_space("  keep leading  "), "  keep leading");
        assert_eq!(trim_right_space("x\t\n\ny \n"), "x\n\ny\n");
    }

    #[test]
    fn trim_right_space_empty() {
        assert_eq!(trim_right_space(""), "");
    }

    #[test]
    fn begins_with_is_case_sensitive() {
        assert!(begins_with("tanzu cluster", "tanzu "));
        assert!(!begins_with("Tanzu cluster", "tanzu "));
        assert!(!begins_with("tanzucluster", "tanzu "));
    }

    #[test]
    fn plain_style_is_identity() {
        assert_eq!(bold("Usage:", Style::Plain), "Usage:");
        assert_eq!(underline("Usage:", Style::Plain), "Usage:");
    }

    #[test]
    fn ansi_style_wraps_text() {
        assert_eq!(bold("Usage:", Style::Ansi), "\x1b[1mUsage:\x1b[0m");
        assert_eq!(underline("Usage:", Style::Ansi), "\x1b[4mUsage:\x1b[0m");
    }

    #[test]
    fn detect_without_terminal_is_plain() {
        assert_eq!(Style::detect(false), Style::Plain);
    }
}

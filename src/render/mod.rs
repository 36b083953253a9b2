//! render
//!
//! Usage text for a single command.
//!
//! # Layout
//!
//! ```text
//! Usage:
//!   tanzu cluster create NAME [flags]
//!
//! Aliases:
//!   create, c
//!
//! Examples:
//!   tanzu cluster create my-cluster
//!
//! Flags:
//!   -h, --help   help for create
//! ```
//!
//! Sections appear in a fixed order and are omitted entirely when empty:
//! usage, aliases, examples, available commands, flags, global flags,
//! additional help topics, and the closing `Use "..." --help` hint.
//!
//! # Routing prefix
//!
//! Invocation lines are prefixed with the root token and, depending on the
//! node's [`TargetKind`], a target segment:
//!
//! | target       | lines                                   |
//! |--------------|-----------------------------------------|
//! | none, global | `tanzu <body>`                          |
//! | named `t`    | `tanzu t <body>`                        |
//! | kubernetes   | `tanzu <body>` and `tanzu <spelling> <body>` |
//!
//! The Kubernetes segment is the annotation as written (`kubernetes` or
//! `k8s`). A body whose first word is already the root token is used as is.

pub mod format;

use std::io::Write;

use thiserror::Error;
use tracing::debug;

use crate::core::node::CommandRef;
use crate::core::types::TargetKind;
use format::{begins_with, bold, rpad, trim_right_space, Style};

/// Root token used when none is configured.
pub const DEFAULT_ROOT_TOKEN: &str = "tanzu";

/// Errors from rendering usage text.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A section was selected but produced no content.
    #[error("malformed usage layout: {0}")]
    Template(String),

    /// A value could not be formatted.
    #[error("failed to format usage: {0}")]
    Execution(String),

    /// The sink rejected a write.
    #[error("failed to write usage: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders usage text for command nodes.
///
/// The renderer holds configuration only; every call builds its own
/// [`RenderContext`], so one renderer can be shared across threads.
///
/// # Example
///
/// ```
/// use cmdusage::core::node::{CommandNode, CommandRef};
/// use cmdusage::render::HelpRenderer;
///
/// let node = CommandNode::new("version").unwrap().runnable();
/// let text = HelpRenderer::default()
///     .render_to_string(&CommandRef::root(&node))
///     .unwrap();
/// assert_eq!(text, "Usage:\n  tanzu version\n");
/// ```
#[derive(Debug, Clone)]
pub struct HelpRenderer {
    root_token: String,
    style: Style,
}

impl Default for HelpRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_TOKEN)
    }
}

impl HelpRenderer {
    /// Create a renderer with plain styling.
    pub fn new(root_token: impl Into<String>) -> Self {
        Self {
            root_token: root_token.into(),
            style: Style::Plain,
        }
    }

    /// Set the header style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn root_token(&self) -> &str {
        &self.root_token
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// Write usage text for `cmd` to `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be composed or the sink rejects
    /// the write. Bytes already accepted by the sink are not rolled back.
    pub fn render<W: Write + ?Sized>(
        &self,
        cmd: &CommandRef<'_>,
        sink: &mut W,
    ) -> Result<(), RenderError> {
        let text = self.render_to_string(cmd)?;
        sink.write_all(text.as_bytes())?;
        sink.flush()?;
        Ok(())
    }

    /// Compose usage text for `cmd`.
    pub fn render_to_string(&self, cmd: &CommandRef<'_>) -> Result<String, RenderError> {
        let ctx = RenderContext::new(self, cmd.target_kind())?;
        debug!(
            command = %cmd.command_path(),
            target = %cmd.target_kind(),
            "rendering usage"
        );

        let mut doc = Document::default();
        doc.push(ctx.usage_section(cmd));

        if !cmd.aliases().is_empty() {
            doc.section(&ctx, "Aliases:", format!("  {}", cmd.name_and_aliases()))?;
        }
        if cmd.has_example() {
            doc.section(&ctx, "Examples:", format!("  {}", cmd.example_text()))?;
        }
        if cmd.has_available_subcommands() {
            doc.section(&ctx, "Available Commands:", available_commands(cmd))?;
        }
        if cmd.has_available_local_flags() {
            doc.section(&ctx, "Flags:", flag_block(&cmd.local_flags().usages()))?;
        }
        let inherited = cmd.inherited_flags();
        if inherited.has_available() {
            doc.section(&ctx, "Global Flags:", flag_block(&inherited.usages()))?;
        }
        if cmd.has_help_subcommands() {
            doc.section(&ctx, "Additional help topics:", help_topics(cmd))?;
        }
        if cmd.has_available_subcommands() {
            doc.push(ctx.closing_lines(&cmd.command_path()));
        }

        Ok(doc.finish())
    }
}

/// Per-call rendering state.
struct RenderContext<'r> {
    root_token: &'r str,
    rooted_prefix: String,
    style: Style,
    target: TargetKind,
}

impl<'r> RenderContext<'r> {
    fn new(renderer: &'r HelpRenderer, target: &TargetKind) -> Result<Self, RenderError> {
        let root = renderer.root_token.as_str();
        if root.is_empty() || root.chars().any(char::is_whitespace) {
            return Err(RenderError::Execution(format!(
                "root token must be a single word, got '{root}'"
            )));
        }
        Ok(Self {
            root_token: root,
            rooted_prefix: format!("{root} "),
            style: renderer.style,
            target: target.clone(),
        })
    }

    fn header(&self, title: &str) -> String {
        bold(title, self.style)
    }

    /// Invocation lines for `body`, prefixed by root token and target.
    fn invocations(&self, body: &str) -> Vec<String> {
        if body == self.root_token || begins_with(body, &self.rooted_prefix) {
            return vec![body.to_string()];
        }
        let root = self.root_token;
        let mut lines = Vec::with_capacity(2);
        if self.target.is_kubernetes() {
            lines.push(format!("{root} {body}"));
        }
        match self.target.segment() {
            Some(segment) => lines.push(format!("{root} {segment} {body}")),
            None => lines.push(format!("{root} {body}")),
        }
        lines
    }

    fn usage_section(&self, cmd: &CommandRef<'_>) -> String {
        let mut block = self.header("Usage:");
        let mut bodies = Vec::new();
        if cmd.is_runnable() {
            bodies.push(cmd.use_line());
        }
        if cmd.has_available_subcommands() {
            bodies.push(format!("{} [command]", cmd.command_path()));
        }
        for body in bodies {
            for line in self.invocations(&body) {
                block.push_str("\n  ");
                block.push_str(&line);
            }
        }
        block
    }

    fn closing_lines(&self, command_path: &str) -> String {
        self.invocations(command_path)
            .into_iter()
            .map(|line| {
                format!("Use \"{line} [command] --help\" for more information about a command.")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Blocks of output separated by blank lines.
#[derive(Default)]
struct Document {
    blocks: Vec<String>,
}

impl Document {
    fn push(&mut self, block: String) {
        self.blocks.push(block);
    }

    fn section(
        &mut self,
        ctx: &RenderContext<'_>,
        title: &str,
        body: String,
    ) -> Result<(), RenderError> {
        if body.is_empty() {
            return Err(RenderError::Template(format!(
                "section '{title}' has no content"
            )));
        }
        self.blocks.push(format!("{}\n{body}", ctx.header(title)));
        Ok(())
    }

    fn finish(self) -> String {
        let mut out = self.blocks.join("\n\n");
        out.push('\n');
        out
    }
}

fn available_commands(cmd: &CommandRef<'_>) -> String {
    cmd.children()
        .filter(|child| child.is_available_command())
        .map(|child| {
            let line = format!(
                "  {} {}",
                rpad(child.name().as_str(), child.name_padding()),
                child.short_text()
            );
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn help_topics(cmd: &CommandRef<'_>) -> String {
    cmd.children()
        .filter(|child| child.is_additional_help_topic())
        .map(|child| {
            let line = format!(
                "  {} {}",
                rpad(&child.command_path(), child.command_path_padding()),
                child.short_text()
            );
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn flag_block(usages: &str) -> String {
    trim_right_space(usages).trim_end_matches('\n').to_string()
}

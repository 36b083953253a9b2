//! tree command - Print the structure of a manifest

use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cli::Context;
use crate::core::manifest;
use crate::core::node::CommandRef;
use crate::core::types::TargetKind;
use crate::render::format::Style;
use crate::ui::output::{self, paint_dim};

/// One command in the JSON dump.
#[derive(Debug, Serialize)]
pub struct TreeEntry {
    pub name: String,
    pub path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub short: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub runnable: bool,
    pub hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<TreeEntry>,
}

/// Print the tree in a manifest, as an outline or as JSON.
pub fn tree(ctx: &Context, manifest_path: &Path, json: bool) -> Result<()> {
    let root = manifest::load(manifest_path, ctx.load_options())?;
    let cursor = CommandRef::root(&root);

    if json {
        let entry = summarize(&cursor);
        let text = serde_json::to_string_pretty(&entry).context("Failed to serialize tree")?;
        println!("{}", text);
    } else {
        let mut lines = Vec::new();
        outline(&cursor, ctx.style(), &mut lines);
        output::print(lines.join("\n"), ctx.verbosity);
    }
    Ok(())
}

/// Serializable summary of `cmd` and its descendants.
pub fn summarize(cmd: &CommandRef<'_>) -> TreeEntry {
    let target = match cmd.target_kind() {
        TargetKind::None => None,
        other => Some(other.to_string()),
    };
    TreeEntry {
        name: cmd.name().to_string(),
        path: cmd.command_path(),
        short: cmd.short_text().to_string(),
        aliases: cmd.aliases().to_vec(),
        target,
        runnable: cmd.is_runnable(),
        hidden: cmd.is_hidden(),
        deprecated: cmd.deprecation().map(String::from),
        flags: cmd
            .local_flags()
            .iter()
            .map(|flag| format!("--{}", flag.name()))
            .collect(),
        commands: cmd.children().map(|child| summarize(&child)).collect(),
    }
}

/// Indented outline of `cmd`, one line per command.
///
/// Commands that the help page would not list are marked.
pub fn outline(cmd: &CommandRef<'_>, style: Style, lines: &mut Vec<String>) {
    let mut line = format!("{}{}", "  ".repeat(cmd.depth()), cmd.name());
    let mut markers = Vec::new();
    if cmd.is_hidden() {
        markers.push("[hidden]");
    }
    if cmd.deprecation().is_some() {
        markers.push("[deprecated]");
    }
    if cmd.is_additional_help_topic() {
        markers.push("[help topic]");
    }
    if !markers.is_empty() {
        line.push(' ');
        line.push_str(&paint_dim(&markers.join(" "), style));
    }
    lines.push(line);

    for child in cmd.children() {
        outline(&child, style, lines);
    }
}

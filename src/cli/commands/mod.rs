//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Builds a command tree (from a manifest or from clap)
//! 2. Resolves the requested command path
//! 3. Formats and displays output
//!
//! Handlers return `anyhow::Result`; `main` prints the error chain.

mod check;
mod completion;
mod config_cmd;
mod render;
mod tree;
mod usage;

// Re-export command functions for testing and direct invocation
pub use check::{check, flag_count};
pub use completion::completion;
pub use render::render;
pub use tree::{outline, summarize, tree, TreeEntry};
pub use usage::usage;

use anyhow::{bail, Result};

use super::args::{Command, ConfigAction};
use super::Context;
use crate::core::node::{CommandNode, CommandRef};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Render { manifest, path } => render::render(ctx, &manifest, &path),
        Command::Tree { manifest, json } => tree::tree(ctx, &manifest, json),
        Command::Check { manifest } => check::check(ctx, &manifest),
        Command::Usage { path } => usage::usage(ctx, &path),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Set { key, value } => config_cmd::set(ctx, &key, &value),
            ConfigAction::List => config_cmd::list(ctx),
            ConfigAction::Path => config_cmd::path(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Descend from `root` by command names or aliases.
///
/// # Errors
///
/// Fails on the first word that names no child of the current command.
pub fn resolve<'a>(root: &'a CommandNode, path: &[String]) -> Result<CommandRef<'a>> {
    let mut cursor = CommandRef::root(root);
    for word in path {
        cursor = match cursor.child(word) {
            Some(next) => next,
            None => bail!(
                "unknown command \"{}\" for \"{}\"",
                word,
                cursor.command_path()
            ),
        };
    }
    Ok(cursor)
}

//! render command - Print the help page of a manifest command

use std::io;
use std::path::Path;

use anyhow::{Context as _, Result};

use super::resolve;
use crate::cli::Context;
use crate::core::manifest;
use crate::ui::output;

/// Render help for the command at `path` in `manifest_path`.
pub fn render(ctx: &Context, manifest_path: &Path, path: &[String]) -> Result<()> {
    let tree = manifest::load(manifest_path, ctx.load_options())?;
    let cursor = resolve(&tree, path)?;
    if let Some(message) = cursor.deprecation() {
        output::warn(
            format!("command \"{}\" is deprecated, {}", cursor.name(), message),
            ctx.verbosity,
        );
    }

    let mut stdout = io::stdout().lock();
    ctx.renderer()
        .render(&cursor, &mut stdout)
        .context("Failed to render usage")?;
    Ok(())
}

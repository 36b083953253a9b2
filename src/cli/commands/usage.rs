//! usage command - Render cmdusage's own help through the renderer

use std::io;

use anyhow::{Context as _, Result};
use clap::CommandFactory;

use super::resolve;
use crate::cli::{Cli, Context};
use crate::core::clap_tree;
use crate::render::HelpRenderer;

/// Render help for one of cmdusage's commands.
///
/// The root token defaults to the program's own name, so lines read
/// `cmdusage render ...` rather than being prefixed twice.
pub fn usage(ctx: &Context, path: &[String]) -> Result<()> {
    let tree =
        clap_tree::from_clap(&Cli::command()).context("Failed to convert command definitions")?;
    let cursor = resolve(&tree, path)?;

    let token = match &ctx.root_token_flag {
        Some(token) => token.clone(),
        None => tree.name().to_string(),
    };
    let mut stdout = io::stdout().lock();
    HelpRenderer::new(token)
        .with_style(ctx.style())
        .render(&cursor, &mut stdout)
        .context("Failed to render usage")?;
    Ok(())
}

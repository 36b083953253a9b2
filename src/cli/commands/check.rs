//! check command - Validate a manifest

use std::path::Path;

use anyhow::Result;

use crate::cli::Context;
use crate::core::manifest;
use crate::core::node::CommandNode;
use crate::ui::output::{self, format_count};

/// Load a manifest and report its size.
pub fn check(ctx: &Context, manifest_path: &Path) -> Result<()> {
    let tree = manifest::load(manifest_path, ctx.load_options())?;
    let summary = format!(
        "ok: {}, {}",
        format_count(tree.count(), "command"),
        format_count(flag_count(&tree), "flag")
    );
    output::success(summary, ctx.verbosity, ctx.style());
    Ok(())
}

/// Number of flags defined anywhere in the tree, hidden ones included.
pub fn flag_count(node: &CommandNode) -> usize {
    node.local_flags().len() + node.children().iter().map(flag_count).sum::<usize>()
}

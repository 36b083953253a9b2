//! config command - Get, set, or list configuration values

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::config::{Config, KEYS};
use crate::ui::output;

/// Get a configuration value.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let value = ctx.config.get(key)?;
    println!("{}", value);
    Ok(())
}

/// Set a configuration value.
///
/// Writes back to the file the config was loaded from, or to the default
/// write location when none was found.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut config = ctx.config.clone();
    config.set(key, value)?;

    let path = match config.loaded_from() {
        Some(path) => path.to_path_buf(),
        None => Config::write_path()?,
    };
    Config::write(&path, &config.user).context("Failed to write config")?;

    output::success(
        format!("Set {} = {}", key, value),
        ctx.verbosity,
        ctx.style(),
    );
    Ok(())
}

/// List all configuration values, defaults included.
pub fn list(ctx: &Context) -> Result<()> {
    for key in KEYS {
        println!("{} = {}", key, ctx.config.get(key)?);
    }
    Ok(())
}

/// Print the config file path.
pub fn path(ctx: &Context) -> Result<()> {
    let path = match ctx.config.loaded_from() {
        Some(path) => path.to_path_buf(),
        None => Config::write_path()?,
    };
    println!("{}", path.display());
    Ok(())
}

//! cli
//!
//! Command-line interface layer for cmdusage.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Merge flags over the user config into a [`Context`]
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Trees come from [`crate::core::manifest`] or
//! [`crate::core::clap_tree`]; text comes from [`crate::render`]. Handlers
//! only glue them to stdout.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::io::IsTerminal;

use anyhow::{Context as _, Result};
use tracing::debug;

use crate::core::config::schema::{validate_root_token, ColorChoice};
use crate::core::config::Config;
use crate::core::manifest::LoadOptions;
use crate::render::format::Style;
use crate::render::HelpRenderer;
use crate::ui::output::Verbosity;

/// Settings shared by all command handlers.
///
/// Precedence: built-in defaults < config file < command-line flags.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub verbosity: Verbosity,
    pub color: ColorChoice,
    /// Root token given on the command line, if any.
    pub root_token_flag: Option<String>,
}

impl Context {
    /// Build a context from parsed flags and loaded config.
    ///
    /// # Errors
    ///
    /// Returns an error if `--root-token` is not a single word.
    pub fn new(cli: &Cli, config: Config) -> Result<Self> {
        if let Some(token) = &cli.root_token {
            validate_root_token(token).context("Invalid --root-token")?;
        }
        let color = cli.color.unwrap_or_else(|| config.color());
        Ok(Self {
            verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
            color,
            root_token_flag: cli.root_token.clone(),
            config,
        })
    }

    /// Effective root token.
    pub fn root_token(&self) -> &str {
        self.root_token_flag
            .as_deref()
            .unwrap_or_else(|| self.config.root_token())
    }

    /// Style for text written to stdout.
    pub fn style(&self) -> Style {
        self.color.style(std::io::stdout().is_terminal())
    }

    /// Manifest loading defaults.
    pub fn load_options(&self) -> LoadOptions {
        self.config.load_options()
    }

    /// A renderer using the effective root token and style.
    pub fn renderer(&self) -> HelpRenderer {
        HelpRenderer::new(self.root_token()).with_style(self.style())
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load().context("Failed to load config")?;
    debug!(path = ?config.loaded_from(), "config resolved");

    let ctx = Context::new(&cli, config)?;

    // Dispatch to command handler
    commands::dispatch(cli.command, &ctx)
}

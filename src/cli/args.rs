//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--color <WHEN>`: Style headers with ANSI escapes
//! - `--root-token <TOKEN>`: Program name prefixed to invocation lines

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config::schema::ColorChoice;

/// cmdusage - Usage text for hierarchical command trees
#[derive(Parser, Debug)]
#[command(name = "cmdusage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// When to style output
    #[arg(long, global = true, value_enum, value_name = "WHEN")]
    pub color: Option<ColorChoice>,

    /// Program name prefixed to invocation lines
    #[arg(long, global = true, value_name = "TOKEN")]
    pub root_token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the help page of a command in a manifest
    #[command(
        name = "render",
        long_about = "Render the help page of a command in a manifest.\n\n\
            Loads the command tree described by MANIFEST (TOML, or JSON when the \
            file ends in .json), descends by PATH, and prints that command's usage \
            text. PATH words may be command names or aliases. With no PATH the \
            root command is rendered.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Help for the root command
    cmdusage render tanzu.toml

    # Help for a nested command
    cmdusage render tanzu.toml cluster create

    # Render as if the program were called kubectl
    cmdusage --root-token kubectl render kubectl.toml get"
    )]
    Render {
        /// Manifest file describing the command tree
        manifest: PathBuf,

        /// Command path below the root
        path: Vec<String>,
    },

    /// Print the structure of a manifest
    #[command(
        name = "tree",
        long_about = "Print the command tree described by a manifest.\n\n\
            Each command is shown on its own line, indented under its parent. \
            Hidden, deprecated, and help-topic commands are marked. Use --json \
            for a machine-readable dump.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Outline of all commands
    cmdusage tree tanzu.toml

    # Full structure for scripting
    cmdusage tree tanzu.toml --json"
    )]
    Tree {
        /// Manifest file describing the command tree
        manifest: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a manifest
    #[command(
        name = "check",
        long_about = "Load and validate a manifest without rendering it.\n\n\
            Reports the first problem found (unknown fields, duplicate commands \
            or flags, invalid names) and exits non-zero. On success prints the \
            number of commands and flags."
    )]
    Check {
        /// Manifest file describing the command tree
        manifest: PathBuf,
    },

    /// Render help for cmdusage's own commands
    #[command(
        name = "usage",
        long_about = "Render help for cmdusage's own commands.\n\n\
            Converts cmdusage's command definitions into a command tree and renders \
            the command at PATH with the same renderer used for manifests.",
        after_help = "\
WORKFLOW EXAMPLES:
    cmdusage usage
    cmdusage usage config set"
    )]
    Usage {
        /// Command path below cmdusage
        path: Vec<String>,
    },

    /// Get, set, or list configuration values
    #[command(
        name = "config",
        long_about = "Manage the user configuration.\n\n\
            Keys: root_token, color, sort_commands, help_flag. Values are written to \
            $CMDUSAGE_CONFIG when set, otherwise ~/.cmdusage/config.toml.",
        after_help = "\
WORKFLOW EXAMPLES:
    cmdusage config list
    cmdusage config set root_token kubectl
    cmdusage config get color"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for cmdusage commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    cmdusage completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    cmdusage completion zsh >> ~/.zshrc

    # Fish
    cmdusage completion fish > ~/.config/fish/completions/cmdusage.fish

    # PowerShell
    cmdusage completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// List all configuration values
    List,
    /// Show the config file path
    Path,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

//! core
//!
//! Core domain types for command trees.
//!
//! # Modules
//!
//! - [`types`] - Strong types: CommandName, TargetKind, NodeError
//! - [`flags`] - Flag definitions and aligned flag usage text
//! - [`node`] - The command tree and the cursor used to walk it
//! - [`manifest`] - Declarative TOML/JSON command trees
//! - [`clap_tree`] - Command trees built from clap definitions
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Trees are validated as they are built, so rendering cannot fail on them
//! - Schemas are strict and reject unknown fields
//! - Parent-dependent values are computed from a cursor, not stored

pub mod clap_tree;
pub mod config;
pub mod flags;
pub mod manifest;
pub mod node;
pub mod types;

//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Status messages and list formatting
//!
//! # Design
//!
//! Rendered usage text is written straight to stdout by the commands.
//! Everything else a user reads (status lines, warnings, errors) goes
//! through this module so quiet mode is honoured in one place.

pub mod output;

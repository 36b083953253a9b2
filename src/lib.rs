//! cmdusage - usage text for hierarchical command trees
//!
//! cmdusage renders the help ("usage") page of one command in a command
//! tree: invocation lines, aliases, examples, subcommands grouped by
//! availability, and column-aligned local and inherited flags. Invocation
//! lines are prefixed with a root program token and, for commands annotated
//! with a target, the target's segment (`tanzu kubernetes cluster list`).
//!
//! # Architecture
//!
//! - [`core`] - Command tree, flags, manifests, clap adapter, configuration
//! - [`render`] - The help renderer and its text helpers
//! - [`cli`] - Command-line interface layer
//! - [`ui`] - User-facing output utilities
//!
//! # Example
//!
//! ```
//! use cmdusage::core::node::{CommandNode, CommandRef};
//! use cmdusage::render::HelpRenderer;
//!
//! let root = CommandNode::new("cluster")
//!     .unwrap()
//!     .subcommand(CommandNode::new("list").unwrap().short("List clusters").runnable())
//!     .unwrap();
//! let text = HelpRenderer::default()
//!     .render_to_string(&CommandRef::root(&root))
//!     .unwrap();
//! assert!(text.starts_with("Usage:\n  tanzu cluster [command]"));
//! ```

pub mod cli;
pub mod core;
pub mod render;
pub mod ui;

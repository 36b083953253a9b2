//! core::clap_tree
//!
//! Build a command tree from a clap command definition.
//!
//! # Mapping
//!
//! | clap                     | command tree                          |
//! |--------------------------|---------------------------------------|
//! | name + positionals       | use line (`<NAME>` / `[NAME]`)        |
//! | `about` / `long_about`   | short / long description              |
//! | `after_help`             | example text                          |
//! | visible aliases          | aliases                               |
//! | `hide`                   | hidden                                |
//! | named args               | flags (`global` args are persistent)  |
//! | subcommands              | children                              |
//!
//! The definition is built before conversion, so clap's generated `help`
//! subcommand and `-h, --help` / `-V, --version` flags show up as ordinary
//! entries. A command is runnable unless clap requires a subcommand.

use std::collections::BTreeSet;

use clap::{Arg, ArgAction, Command};
use tracing::debug;

use super::flags::{Flag, FlagError, FlagKind};
use super::node::CommandNode;
use super::types::NodeError;

/// Convert a clap command (and its subcommands) into a command tree.
///
/// # Errors
///
/// Returns an error if clap defines something the tree cannot hold, such as
/// a shorthand that is not alphanumeric.
pub fn from_clap(command: &Command) -> Result<CommandNode, NodeError> {
    let mut command = command.clone();
    command.build();
    let root = convert(&command, &BTreeSet::new())?;
    debug!(root = %root.name(), commands = root.count(), "converted clap command");
    Ok(root)
}

fn convert(command: &Command, inherited: &BTreeSet<String>) -> Result<CommandNode, NodeError> {
    let mut node = CommandNode::new(use_line(command))?;
    if let Some(about) = command.get_about() {
        node = node.short(about.to_string());
    }
    if let Some(long) = command.get_long_about() {
        node = node.long(long.to_string());
    }
    if let Some(after) = command.get_after_help() {
        node = node.example(after.to_string().trim_end());
    }
    for alias in command.get_visible_aliases() {
        node = node.alias(alias);
    }
    if command.is_hide_set() {
        node = node.hidden();
    }
    if !command.has_subcommands() || !command.is_subcommand_required_set() {
        node = node.runnable();
    }

    // Global args are copied into every subcommand when clap builds; only
    // the defining command keeps them.
    let mut globals = inherited.clone();
    for arg in command.get_arguments().filter(|a| !a.is_positional()) {
        let id = arg.get_id().as_str().to_string();
        if arg.is_global_set() {
            if inherited.contains(&id) {
                continue;
            }
            globals.insert(id);
        }
        node.add_flag(to_flag(arg)?)?;
    }

    for sub in command.get_subcommands() {
        node.add_subcommand(convert(sub, &globals)?)?;
    }
    Ok(node)
}

fn use_line(command: &Command) -> String {
    let mut words = vec![command.get_name().to_string()];
    for arg in command.get_positionals().filter(|a| !a.is_hide_set()) {
        let name = value_name(arg).unwrap_or_else(|| arg.get_id().as_str().to_uppercase());
        let repeated = matches!(arg.get_action(), ArgAction::Append)
            || arg.get_num_args().is_some_and(|range| range.max_values() > 1);
        let dots = if repeated { "..." } else { "" };
        if arg.is_required_set() {
            words.push(format!("<{name}>{dots}"));
        } else {
            words.push(format!("[{name}]{dots}"));
        }
    }
    words.join(" ")
}

fn value_name(arg: &Arg) -> Option<String> {
    arg.get_value_names()
        .and_then(|names| names.first())
        .map(|name| name.to_string())
}

fn to_flag(arg: &Arg) -> Result<Flag, FlagError> {
    let name = match arg.get_long() {
        Some(long) => long.to_string(),
        None => arg.get_id().as_str().to_string(),
    };
    let kind = match arg.get_action() {
        ArgAction::Set => FlagKind::String,
        ArgAction::Append => FlagKind::StringSlice,
        ArgAction::Count => FlagKind::Int,
        _ => FlagKind::Bool,
    };
    let usage = arg.get_help().map(|h| h.to_string()).unwrap_or_default();

    let mut flag = Flag::new(name, kind, usage)?;
    if let Some(short) = arg.get_short() {
        flag = flag.with_shorthand(short)?;
    }
    if kind != FlagKind::Bool {
        if let Some(name) = value_name(arg) {
            flag = flag.with_value_name(name);
        }
    }

    let defaults: Vec<String> = arg
        .get_default_values()
        .iter()
        .map(|v| v.to_string_lossy().into_owned())
        .collect();
    if !defaults.is_empty() {
        let shown = if kind == FlagKind::StringSlice {
            format!("[{}]", defaults.join(","))
        } else {
            defaults.join(",")
        };
        flag = flag.with_default(shown);
    }
    if arg.is_global_set() {
        flag = flag.persistent();
    }
    if arg.is_hide_set() {
        flag = flag.hidden();
    }
    Ok(flag)
}

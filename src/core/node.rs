//! core::node
//!
//! Command tree representation.
//!
//! # Architecture
//!
//! A [`CommandNode`] owns its children exclusively, so the tree cannot share
//! nodes or form cycles. Values that depend on a node's position (command
//! path, use line, inherited flags, padding) are computed through a
//! [`CommandRef`], a borrowed cursor holding the node and its ancestors.
//!
//! # Invariants
//!
//! - Every node has a valid [`CommandName`]
//! - Sibling names and aliases are unique
//! - The target classification is computed when the `target` annotation is
//!   set, never at render time

use std::collections::BTreeMap;
use std::ops::Deref;

use super::flags::{Flag, FlagSet};
use super::types::{CommandName, NodeError, TargetKind, TARGET_ANNOTATION};

/// Minimum width used when padding command names and paths.
pub const MIN_NAME_PADDING: usize = 11;

/// One command in a command tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandNode {
    name: CommandName,
    use_line: String,
    short: String,
    long: String,
    aliases: Vec<String>,
    example: String,
    annotations: BTreeMap<String, String>,
    target: TargetKind,
    runnable: bool,
    hidden: bool,
    deprecated: Option<String>,
    disable_flags_in_use_line: bool,
    flags: FlagSet,
    children: Vec<CommandNode>,
}

impl CommandNode {
    /// Create a node from its use line.
    ///
    /// The name is the first word of the use line.
    ///
    /// # Errors
    ///
    /// Returns an error if the use line is blank or its first word is not a
    /// valid command name.
    ///
    /// # Example
    ///
    /// ```
    /// use cmdusage::core::node::CommandNode;
    ///
    /// let node = CommandNode::new("create NAME").unwrap().short("Create a cluster");
    /// assert_eq!(node.name().as_str(), "create");
    /// assert!(CommandNode::new("").is_err());
    /// ```
    pub fn new(use_line: impl Into<String>) -> Result<Self, NodeError> {
        let use_line = use_line.into().trim().to_string();
        let name = CommandName::from_use_line(&use_line)?;
        Ok(Self {
            name,
            use_line,
            short: String::new(),
            long: String::new(),
            aliases: Vec::new(),
            example: String::new(),
            annotations: BTreeMap::new(),
            target: TargetKind::None,
            runnable: false,
            hidden: false,
            deprecated: None,
            disable_flags_in_use_line: false,
            flags: FlagSet::new(),
            children: Vec::new(),
        })
    }

    /// Override the name derived from the use line.
    pub fn with_name(mut self, name: impl Into<String>) -> Result<Self, NodeError> {
        self.name = CommandName::new(name)?;
        Ok(self)
    }

    /// Set the one-line description.
    pub fn short(mut self, short: impl Into<String>) -> Self {
        self.short = short.into();
        self
    }

    /// Set the long description.
    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = long.into();
        self
    }

    /// Add an alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Set the example text, shown verbatim.
    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }

    /// Set an annotation. Setting `target` reclassifies the node.
    pub fn annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_annotation(key, value);
        self
    }

    /// Set the routing target (shorthand for the `target` annotation).
    pub fn target(self, target: impl Into<String>) -> Self {
        self.annotation(TARGET_ANNOTATION, target)
    }

    /// Mark the node as having an action.
    pub fn runnable(mut self) -> Self {
        self.runnable = true;
        self
    }

    /// Hide the node from command listings.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Mark the node deprecated with a message.
    pub fn deprecated(mut self, message: impl Into<String>) -> Self {
        self.deprecated = Some(message.into());
        self
    }

    /// Never append `[flags]` to the use line.
    pub fn disable_flags_in_use_line(mut self) -> Self {
        self.disable_flags_in_use_line = true;
        self
    }

    /// Add a flag.
    pub fn flag(mut self, flag: Flag) -> Result<Self, NodeError> {
        self.add_flag(flag)?;
        Ok(self)
    }

    /// Add a child command.
    pub fn subcommand(mut self, child: CommandNode) -> Result<Self, NodeError> {
        self.add_subcommand(child)?;
        Ok(self)
    }

    /// Set an annotation in place.
    pub fn set_annotation(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if key == TARGET_ANNOTATION {
            self.target = TargetKind::parse(&value);
        }
        self.annotations.insert(key, value);
    }

    /// Add a flag in place.
    pub fn add_flag(&mut self, flag: Flag) -> Result<(), NodeError> {
        self.flags.add(flag)?;
        Ok(())
    }

    /// Add a child command in place.
    ///
    /// # Errors
    ///
    /// Returns `NodeError::DuplicateChild` if the child's name or one of its
    /// aliases is already used by a sibling.
    pub fn add_subcommand(&mut self, child: CommandNode) -> Result<(), NodeError> {
        let taken = std::iter::once(child.name.as_str())
            .chain(child.aliases.iter().map(String::as_str));
        for word in taken {
            if self.child(word).is_some() {
                return Err(NodeError::DuplicateChild {
                    parent: self.name.to_string(),
                    name: word.to_string(),
                });
            }
        }
        self.children.push(child);
        Ok(())
    }

    /// Sort children by name, recursively.
    pub fn sort_subcommands(&mut self) {
        self.children.sort_by(|a, b| a.name.cmp(&b.name));
        for child in &mut self.children {
            child.sort_subcommands();
        }
    }

    /// Visit this node and every descendant, depth first.
    pub fn walk_mut<F>(&mut self, visit: &mut F) -> Result<(), NodeError>
    where
        F: FnMut(&mut CommandNode) -> Result<(), NodeError>,
    {
        visit(self)?;
        for child in &mut self.children {
            child.walk_mut(visit)?;
        }
        Ok(())
    }

    pub fn name(&self) -> &CommandName {
        &self.name
    }

    /// The use line as written, without the parent path.
    pub fn use_text(&self) -> &str {
        &self.use_line
    }

    pub fn short_text(&self) -> &str {
        &self.short
    }

    pub fn long_text(&self) -> &str {
        &self.long
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn example_text(&self) -> &str {
        &self.example
    }

    pub fn annotations(&self) -> &BTreeMap<String, String> {
        &self.annotations
    }

    pub fn target_kind(&self) -> &TargetKind {
        &self.target
    }

    pub fn is_runnable(&self) -> bool {
        self.runnable
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn deprecation(&self) -> Option<&str> {
        self.deprecated.as_deref()
    }

    pub fn flags_in_use_line_disabled(&self) -> bool {
        self.disable_flags_in_use_line
    }

    /// Flags defined on this node, persistent or not.
    pub fn local_flags(&self) -> &FlagSet {
        &self.flags
    }

    pub fn children(&self) -> &[CommandNode] {
        &self.children
    }

    /// Find a direct child by name or alias.
    pub fn child(&self, word: &str) -> Option<&CommandNode> {
        self.children
            .iter()
            .find(|c| c.name.as_str() == word || c.aliases.iter().any(|a| a == word))
    }

    /// Whether `word` is this node's name or one of its aliases.
    pub fn has_name_or_alias(&self, word: &str) -> bool {
        self.name.as_str() == word || self.aliases.iter().any(|a| a == word)
    }

    pub fn has_example(&self) -> bool {
        !self.example.is_empty()
    }

    /// Whether the command is listed under "Available Commands".
    pub fn is_available_command(&self) -> bool {
        if self.deprecated.is_some() || self.hidden {
            return false;
        }
        self.runnable || self.has_available_subcommands()
    }

    /// Whether the node exists only to carry documentation.
    pub fn is_additional_help_topic(&self) -> bool {
        if self.runnable || self.deprecated.is_some() || self.hidden {
            return false;
        }
        self.children.iter().all(CommandNode::is_additional_help_topic)
    }

    pub fn has_available_subcommands(&self) -> bool {
        self.children.iter().any(CommandNode::is_available_command)
    }

    pub fn has_help_subcommands(&self) -> bool {
        self.children.iter().any(CommandNode::is_additional_help_topic)
    }

    pub fn has_available_local_flags(&self) -> bool {
        self.flags.has_available()
    }

    /// Number of nodes in this subtree, including this one.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(CommandNode::count).sum::<usize>()
    }
}

/// A node together with its ancestors, root first.
///
/// # Example
///
/// ```
/// use cmdusage::core::node::{CommandNode, CommandRef};
///
/// let tree = CommandNode::new("cluster")
///     .unwrap()
///     .subcommand(CommandNode::new("create NAME").unwrap().runnable())
///     .unwrap();
///
/// let root = CommandRef::root(&tree);
/// let create = root.find(&["create"]).unwrap();
/// assert_eq!(create.command_path(), "cluster create");
/// assert_eq!(create.use_line(), "cluster create NAME");
/// ```
#[derive(Debug, Clone)]
pub struct CommandRef<'a> {
    node: &'a CommandNode,
    ancestors: Vec<&'a CommandNode>,
}

impl<'a> CommandRef<'a> {
    /// Start at the root of a tree.
    pub fn root(node: &'a CommandNode) -> Self {
        Self {
            node,
            ancestors: Vec::new(),
        }
    }

    pub fn node(&self) -> &'a CommandNode {
        self.node
    }

    /// Ancestors, root first.
    pub fn ancestors(&self) -> &[&'a CommandNode] {
        &self.ancestors
    }

    pub fn parent(&self) -> Option<&'a CommandNode> {
        self.ancestors.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    /// Descend to a direct child by name or alias.
    pub fn child(&self, word: &str) -> Option<CommandRef<'a>> {
        self.node.child(word).map(|child| self.descend(child))
    }

    /// Cursors over all direct children, in tree order.
    pub fn children(&self) -> impl Iterator<Item = CommandRef<'a>> + '_ {
        self.node.children.iter().map(move |child| self.descend(child))
    }

    /// Follow a path of names or aliases from this node.
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<CommandRef<'a>> {
        let mut current = self.clone();
        for word in path {
            current = current.child(word.as_ref())?;
        }
        Some(current)
    }

    fn descend(&self, child: &'a CommandNode) -> CommandRef<'a> {
        let mut ancestors = self.ancestors.clone();
        ancestors.push(self.node);
        CommandRef {
            node: child,
            ancestors,
        }
    }

    /// Full path from the root, e.g. `tanzu cluster create`.
    pub fn command_path(&self) -> String {
        self.ancestors
            .iter()
            .map(|n| n.name.as_str())
            .chain(std::iter::once(self.node.name.as_str()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The invocation syntax including the parent path.
    ///
    /// `[flags]` is appended when the command has any visible flag, unless
    /// the use line already mentions it or the node disables it.
    pub fn use_line(&self) -> String {
        let mut line = match self.parent_path() {
            Some(parent) => format!("{parent} {}", self.node.use_line),
            None => self.node.use_line.clone(),
        };
        if !self.node.disable_flags_in_use_line
            && self.has_available_flags()
            && !line.contains("[flags]")
        {
            line.push_str(" [flags]");
        }
        line
    }

    fn parent_path(&self) -> Option<String> {
        if self.ancestors.is_empty() {
            return None;
        }
        Some(
            self.ancestors
                .iter()
                .map(|n| n.name.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        )
    }

    /// Name followed by aliases, comma separated.
    pub fn name_and_aliases(&self) -> String {
        std::iter::once(self.node.name.as_str())
            .chain(self.node.aliases.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Persistent flags of all ancestors that this node does not shadow.
    ///
    /// The nearest ancestor wins when two ancestors define the same name.
    pub fn inherited_flags(&self) -> FlagSet {
        let mut inherited = FlagSet::new();
        for ancestor in self.ancestors.iter().rev() {
            for flag in ancestor.flags.iter().filter(|f| f.is_persistent()) {
                if self.node.flags.lookup(flag.name()).is_some() {
                    continue;
                }
                inherited.add_if_absent(flag);
            }
        }
        inherited
    }

    pub fn has_available_inherited_flags(&self) -> bool {
        self.inherited_flags().has_available()
    }

    /// Whether any local or inherited flag is visible.
    pub fn has_available_flags(&self) -> bool {
        self.node.has_available_local_flags() || self.has_available_inherited_flags()
    }

    /// Width used to align this node's name among its siblings.
    pub fn name_padding(&self) -> usize {
        self.sibling_width(|sibling| sibling.name.as_str().chars().count())
    }

    /// Width used to align this node's command path among its siblings.
    pub fn command_path_padding(&self) -> usize {
        let prefix = self.parent_path().map_or(0, |p| p.chars().count() + 1);
        self.sibling_width(|sibling| prefix + sibling.name.as_str().chars().count())
    }

    fn sibling_width(&self, width: impl Fn(&CommandNode) -> usize) -> usize {
        let widest = self
            .parent()
            .map(|parent| parent.children.iter().map(width).max().unwrap_or(0))
            .unwrap_or(0);
        widest.max(MIN_NAME_PADDING)
    }
}

impl Deref for CommandRef<'_> {
    type Target = CommandNode;

    fn deref(&self) -> &Self::Target {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::flags::FlagKind;

    fn sample_tree() -> CommandNode {
        CommandNode::new("cluster")
            .unwrap()
            .flag(
                Flag::new("context", FlagKind::String, "kube context")
                    .unwrap()
                    .persistent(),
            )
            .unwrap()
            .flag(Flag::new("local-only", FlagKind::Bool, "not inherited").unwrap())
            .unwrap()
            .subcommand(
                CommandNode::new("create NAME")
                    .unwrap()
                    .alias("c")
                    .runnable()
                    .short("Create a cluster"),
            )
            .unwrap()
            .subcommand(
                CommandNode::new("delete-everything")
                    .unwrap()
                    .runnable()
                    .hidden(),
            )
            .unwrap()
            .subcommand(CommandNode::new("concepts").unwrap().short("Cluster concepts"))
            .unwrap()
    }

    #[test]
    fn name_comes_from_use_line() {
        let node = CommandNode::new("  get NAME [flags]").unwrap();
        assert_eq!(node.name().as_str(), "get");
        assert_eq!(node.use_text(), "get NAME [flags]");
    }

    #[test]
    fn with_name_overrides() {
        let node = CommandNode::new("get NAME").unwrap().with_name("fetch").unwrap();
        assert_eq!(node.name().as_str(), "fetch");
    }

    #[test]
    fn target_annotation_sets_kind() {
        let node = CommandNode::new("apply").unwrap().target("k8s");
        assert_eq!(node.target_kind(), &TargetKind::Kubernetes("k8s".into()));
        assert_eq!(node.annotations().get("target").map(String::as_str), Some("k8s"));

        let other = CommandNode::new("apply").unwrap().annotation("owner", "team");
        assert_eq!(other.target_kind(), &TargetKind::None);
    }

    #[test]
    fn duplicate_children_rejected() {
        let tree = sample_tree();
        let err = tree
            .clone()
            .subcommand(CommandNode::new("create").unwrap())
            .unwrap_err();
        assert!(matches!(err, NodeError::DuplicateChild { .. }));

        let alias_clash = tree.subcommand(CommandNode::new("copy").unwrap().alias("c"));
        assert!(alias_clash.is_err());
    }

    #[test]
    fn availability_predicates() {
        let tree = sample_tree();
        let create = tree.child("create").unwrap();
        let hidden = tree.child("delete-everything").unwrap();
        let topic = tree.child("concepts").unwrap();

        assert!(create.is_available_command());
        assert!(!hidden.is_available_command());
        assert!(!topic.is_available_command());
        assert!(topic.is_additional_help_topic());
        assert!(!create.is_additional_help_topic());

        assert!(tree.has_available_subcommands());
        assert!(tree.has_help_subcommands());
        assert!(!tree.is_runnable());
    }

    #[test]
    fn deprecated_child_is_not_available() {
        let node = CommandNode::new("old").unwrap().runnable().deprecated("use new");
        assert!(!node.is_available_command());
        assert!(!node.is_additional_help_topic());
    }

    #[test]
    fn find_by_alias() {
        let tree = sample_tree();
        let root = CommandRef::root(&tree);
        let create = root.find(&["c"]).unwrap();
        assert_eq!(create.name().as_str(), "create");
        assert!(root.find(&["missing"]).is_none());
    }

    #[test]
    fn command_path_and_use_line() {
        let tree = sample_tree();
        let root = CommandRef::root(&tree);
        let create = root.child("create").unwrap();

        assert_eq!(root.command_path(), "cluster");
        assert_eq!(create.command_path(), "cluster create");
        // Inherits --context, so [flags] is appended.
        assert_eq!(create.use_line(), "cluster create NAME [flags]");
        assert_eq!(root.use_line(), "cluster [flags]");
    }

    #[test]
    fn use_line_without_flags() {
        let node = CommandNode::new("version").unwrap();
        assert_eq!(CommandRef::root(&node).use_line(), "version");

        let disabled = CommandNode::new("run")
            .unwrap()
            .disable_flags_in_use_line()
            .flag(Flag::new("all", FlagKind::Bool, "").unwrap())
            .unwrap();
        assert_eq!(CommandRef::root(&disabled).use_line(), "run");
    }

    #[test]
    fn use_line_keeps_explicit_flags_marker() {
        let node = CommandNode::new("run [flags] ARGS")
            .unwrap()
            .flag(Flag::new("all", FlagKind::Bool, "").unwrap())
            .unwrap();
        assert_eq!(CommandRef::root(&node).use_line(), "run [flags] ARGS");
    }

    #[test]
    fn inherited_flags_are_persistent_and_unshadowed() {
        let tree = sample_tree();
        let root = CommandRef::root(&tree);
        let create = root.child("create").unwrap();

        let inherited = create.inherited_flags();
        let names: Vec<_> = inherited.iter().map(Flag::name).collect();
        assert_eq!(names, vec!["context"]);
        assert!(root.inherited_flags().is_empty());
    }

    #[test]
    fn local_flag_shadows_inherited() {
        let tree = CommandNode::new("root")
            .unwrap()
            .flag(Flag::new("output", FlagKind::String, "").unwrap().persistent())
            .unwrap()
            .subcommand(
                CommandNode::new("get")
                    .unwrap()
                    .flag(Flag::new("output", FlagKind::String, "get output").unwrap())
                    .unwrap(),
            )
            .unwrap();
        let get = CommandRef::root(&tree).child("get").unwrap();
        assert!(get.inherited_flags().is_empty());
        assert!(!get.has_available_inherited_flags());
    }

    #[test]
    fn nearest_ancestor_wins() {
        let tree = CommandNode::new("root")
            .unwrap()
            .flag(Flag::new("verbose", FlagKind::Bool, "root verbose").unwrap().persistent())
            .unwrap()
            .subcommand(
                CommandNode::new("mid")
                    .unwrap()
                    .flag(Flag::new("verbose", FlagKind::Bool, "mid verbose").unwrap().persistent())
                    .unwrap()
                    .subcommand(CommandNode::new("leaf").unwrap())
                    .unwrap(),
            )
            .unwrap();
        let leaf = CommandRef::root(&tree).find(&["mid", "leaf"]).unwrap();
        let inherited = leaf.inherited_flags();
        assert_eq!(inherited.lookup("verbose").unwrap().usage(), "mid verbose");
    }

    #[test]
    fn padding_has_minimum() {
        let tree = sample_tree();
        let root = CommandRef::root(&tree);
        assert_eq!(root.name_padding(), MIN_NAME_PADDING);

        let create = root.child("create").unwrap();
        // "delete-everything" is hidden but still counts.
        assert_eq!(create.name_padding(), "delete-everything".len());
        assert_eq!(
            create.command_path_padding(),
            "cluster delete-everything".len()
        );
    }

    #[test]
    fn name_and_aliases() {
        let tree = sample_tree();
        let create = CommandRef::root(&tree).child("create").unwrap();
        assert_eq!(create.name_and_aliases(), "create, c");
    }

    #[test]
    fn sort_subcommands_recursively() {
        let mut tree = CommandNode::new("root")
            .unwrap()
            .subcommand(CommandNode::new("b").unwrap())
            .unwrap()
            .subcommand(
                CommandNode::new("a")
                    .unwrap()
                    .subcommand(CommandNode::new("z").unwrap())
                    .unwrap()
                    .subcommand(CommandNode::new("y").unwrap())
                    .unwrap(),
            )
            .unwrap();
        tree.sort_subcommands();
        let names: Vec<_> = tree.children().iter().map(|c| c.name().as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        let nested: Vec<_> = tree.children()[0]
            .children()
            .iter()
            .map(|c| c.name().as_str())
            .collect();
        assert_eq!(nested, vec!["y", "z"]);
        assert_eq!(tree.count(), 5);
    }
}

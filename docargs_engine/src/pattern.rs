use std::collections::HashSet;

use crate::model::Value;

mod fix;

/// The closed set of pattern node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Kind {
    Argument,
    Command,
    Option,
    Required,
    Optional,
    OptionsShortcut,
    OneOrMore,
    Either,
}

impl Kind {
    pub(crate) const LEAVES: [Kind; 3] = [Kind::Argument, Kind::Command, Kind::Option];
    pub(crate) const BRANCHES: [Kind; 5] = [
        Kind::Required,
        Kind::Optional,
        Kind::OptionsShortcut,
        Kind::OneOrMore,
        Kind::Either,
    ];

    pub(crate) fn is_branch(self) -> bool {
        Self::BRANCHES.contains(&self)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Kind::Argument => "argument",
            Kind::Command => "command",
            Kind::Option => "option",
            Kind::Required => "required",
            Kind::Optional => "optional",
            Kind::OptionsShortcut => "options-shortcut",
            Kind::OneOrMore => "one-or-more",
            Kind::Either => "either",
        };
        write!(f, "{name}")
    }
}

/// A terminal pattern element.
///
/// The same type serves both the usage grammar (where `value` is the declared default)
/// and the classified argument vector (where `value` is what the user supplied).
/// Positional tokens from the argument vector have an empty name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Leaf {
    kind: Kind,
    name: String,
    short: Option<String>,
    long: Option<String>,
    arg_count: usize,
    value: Value,
}

impl Leaf {
    pub(crate) fn argument(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            kind: Kind::Argument,
            name: name.into(),
            short: None,
            long: None,
            arg_count: 0,
            value: Value::Plain(value),
        }
    }

    pub(crate) fn command(name: impl Into<String>, value: bool) -> Self {
        Self {
            kind: Kind::Command,
            name: name.into(),
            short: None,
            long: None,
            arg_count: 0,
            value: Value::Switch(value),
        }
    }

    /// The option is named by its long form, falling back to the short form.
    /// An argument-taking option never defaults to `false`; it defaults to absent instead.
    pub(crate) fn option(
        short: Option<String>,
        long: Option<String>,
        arg_count: usize,
        value: Value,
    ) -> Self {
        let name = long.clone().or_else(|| short.clone()).unwrap_or_default();
        let value = match value {
            Value::Switch(false) if arg_count > 0 => Value::Plain(None),
            value => value,
        };

        Self {
            kind: Kind::Option,
            name,
            short,
            long,
            arg_count,
            value,
        }
    }

    pub(crate) fn kind(&self) -> Kind {
        self.kind
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn short(&self) -> Option<&str> {
        self.short.as_deref()
    }

    pub(crate) fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub(crate) fn arg_count(&self) -> usize {
        self.arg_count
    }

    pub(crate) fn value(&self) -> &Value {
        &self.value
    }

    pub(crate) fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    /// Convert the default into a counter or list, so that repeated matches gather rather than overwrite.
    pub(crate) fn make_accumulating(&mut self) {
        let takes_values = match self.kind {
            Kind::Argument => true,
            Kind::Option => self.arg_count > 0,
            _ => false,
        };

        self.value = if takes_values {
            match std::mem::replace(&mut self.value, Value::Plain(None)) {
                Value::Plain(Some(default)) => {
                    Value::List(default.split_whitespace().map(str::to_string).collect())
                }
                Value::List(items) => Value::List(items),
                _ => Value::List(Vec::default()),
            }
        } else {
            Value::Counted(0)
        };
    }
}

pub(crate) type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Leaf(Leaf),
    Branch { kind: Kind, children: Vec<NodeId> },
}

impl Node {
    pub(crate) fn kind(&self) -> Kind {
        match self {
            Node::Leaf(leaf) => leaf.kind(),
            Node::Branch { kind, .. } => *kind,
        }
    }
}

/// Backing storage for a pattern tree.
/// Branches refer to their children by index, so a leaf may be shared by any number of branches.
#[derive(Debug, Clone, Default)]
pub(crate) struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    pub(crate) fn leaf(&mut self, leaf: Leaf) -> NodeId {
        self.nodes.push(Node::Leaf(leaf));
        self.nodes.len() - 1
    }

    pub(crate) fn branch(&mut self, kind: Kind, children: Vec<NodeId>) -> NodeId {
        debug_assert!(kind.is_branch(), "internal error - {kind} is not a branch");
        self.nodes.push(Node::Branch { kind, children });
        self.nodes.len() - 1
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }
}

/// The usage grammar, rooted at a single `Required` node.
#[derive(Debug, Clone)]
pub(crate) struct Tree {
    arena: Arena,
    root: NodeId,
}

impl Tree {
    pub(crate) fn new(arena: Arena, root: NodeId) -> Self {
        Self { arena, root }
    }

    pub(crate) fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.arena.node(id)
    }

    pub(crate) fn leaf(&self, id: NodeId) -> Option<&Leaf> {
        match self.node(id) {
            Node::Leaf(leaf) => Some(leaf),
            Node::Branch { .. } => None,
        }
    }

    pub(crate) fn children(&self, id: NodeId) -> &[NodeId] {
        match self.node(id) {
            Node::Leaf(_) => &[],
            Node::Branch { children, .. } => children,
        }
    }

    /// Collect the nodes of the `wanted` kinds, in depth first order.
    /// A wanted branch is collected whole; its descendants are not visited.
    pub(crate) fn collect(&self, wanted: &[Kind]) -> Vec<NodeId> {
        let mut out = Vec::default();
        self.collect_into(self.root, wanted, &mut out);
        out
    }

    fn collect_into(&self, id: NodeId, wanted: &[Kind], out: &mut Vec<NodeId>) {
        if wanted.contains(&self.node(id).kind()) {
            out.push(id);
        } else {
            for child in self.children(id) {
                self.collect_into(*child, wanted, out);
            }
        }
    }

    /// Every leaf slot in the tree (a shared leaf appears once per slot).
    pub(crate) fn leaves(&self) -> Vec<NodeId> {
        self.collect(&Kind::LEAVES)
    }

    /// Replace every `[options]` placeholder's children with the `declared` options that the grammar does not mention explicitly.
    pub(crate) fn expand_shortcuts(&mut self, declared: &[Leaf]) {
        let mentioned: HashSet<Leaf> = self
            .collect(&[Kind::Option])
            .into_iter()
            .filter_map(|id| self.leaf(id).cloned())
            .collect();
        let mut seen = HashSet::new();
        let additions: Vec<Leaf> = declared
            .iter()
            .filter(|option| !mentioned.contains(*option) && seen.insert(*option))
            .cloned()
            .collect();

        for shortcut in self.collect(&[Kind::OptionsShortcut]) {
            let children: Vec<NodeId> = additions
                .iter()
                .map(|option| self.arena.leaf(option.clone()))
                .collect();

            if let Node::Branch {
                children: slot, ..
            } = &mut self.arena.nodes[shortcut]
            {
                *slot = children;
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    /// Render a tree as nested `kind(..)` terms, to assert on structure.
    pub(crate) fn render(tree: &Tree, id: NodeId) -> String {
        match tree.node(id) {
            Node::Leaf(leaf) => match leaf.kind() {
                Kind::Option => format!("option({}, {:?})", leaf.name(), leaf.value()),
                kind => format!("{kind}({}, {:?})", leaf.name(), leaf.value()),
            },
            Node::Branch { kind, children } => format!(
                "{kind}({})",
                children
                    .iter()
                    .map(|child| render(tree, *child))
                    .collect::<Vec<String>>()
                    .join(", ")
            ),
        }
    }
}

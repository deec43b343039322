use std::collections::{HashMap, VecDeque};

use crate::pattern::*;

impl Tree {
    /// Normalize the tree once it is fully built.
    ///
    /// Structurally equal leaves are unified into a single node, and every leaf that may match more than once
    /// within a single alternative is converted to accumulate (see [`Leaf::make_accumulating`]).
    pub(crate) fn fix(&mut self) {
        self.fix_identities();
        self.fix_repeating_arguments();
    }

    fn fix_identities(&mut self) {
        let mut canonical: HashMap<Leaf, NodeId> = HashMap::default();

        for id in self.leaves() {
            if let Some(leaf) = self.leaf(id) {
                canonical.entry(leaf.clone()).or_insert(id);
            }
        }

        for index in 0..self.arena.nodes.len() {
            let children: Vec<NodeId> = match &self.arena.nodes[index] {
                Node::Leaf(_) => continue,
                Node::Branch { children, .. } => children
                    .iter()
                    .map(|child| match self.leaf(*child) {
                        Some(leaf) => canonical.get(leaf).copied().unwrap_or(*child),
                        None => *child,
                    })
                    .collect(),
            };

            if let Node::Branch { children: slot, .. } = &mut self.arena.nodes[index] {
                *slot = children;
            }
        }
    }

    fn fix_repeating_arguments(&mut self) {
        for case in self.transform() {
            let mut counts: HashMap<NodeId, usize> = HashMap::default();

            for id in &case {
                *counts.entry(*id).or_default() += 1;
            }

            for (id, count) in counts {
                if count > 1 {
                    if let Node::Leaf(leaf) = &mut self.arena.nodes[id] {
                        leaf.make_accumulating();
                    }
                }
            }
        }
    }

    /// Expand the tree into disjunctive normal form: a list of alternatives, each a flat sequence of leaves.
    ///
    /// `OneOrMore` is expanded to exactly two repetitions, and optional groups are treated as required.
    /// For example: `((-a | -b) (-c | -d))` expands to `-a -c | -a -d | -b -c | -b -d`.
    pub(crate) fn transform(&self) -> Vec<Vec<NodeId>> {
        let mut result = Vec::default();
        let mut groups: VecDeque<Vec<NodeId>> = VecDeque::from([vec![self.root]]);

        while let Some(mut group) = groups.pop_front() {
            let position = group
                .iter()
                .position(|id| self.node(*id).kind().is_branch());

            let Some(position) = position else {
                result.push(group);
                continue;
            };

            let branch = group.remove(position);
            let kind = self.node(branch).kind();
            let children = self.children(branch);

            match kind {
                Kind::Either => {
                    for child in children {
                        let mut expanded = vec![*child];
                        expanded.extend(group.iter().copied());
                        groups.push_back(expanded);
                    }
                }
                Kind::OneOrMore => {
                    let mut expanded = children.to_vec();
                    expanded.extend(children.iter().copied());
                    expanded.extend(group);
                    groups.push_back(expanded);
                }
                _ => {
                    let mut expanded = children.to_vec();
                    expanded.extend(group);
                    groups.push_back(expanded);
                }
            }
        }

        result
    }
}

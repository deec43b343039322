use thiserror::Error;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::model::Value;
use crate::pattern::{Kind, Leaf, Node, NodeId, Tree};

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum MatchError {
    #[error("{}", .0.join("\n"))]
    Unknown(Vec<String>),

    #[error("missing required arguments.")]
    Incomplete,
}

/// A value bound to a name by a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Binding {
    pub(crate) name: String,
    pub(crate) value: Value,
}

/// The state of one matching attempt: the argument vector leaves not yet consumed (as indices), and the bindings so far.
/// Trials are never shared, so an abandoned alternative leaves no trace.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Trial {
    left: Vec<usize>,
    collected: Vec<Binding>,
}

/// Matches the classified argument vector against the (fixed) pattern tree.
pub(crate) struct Matcher<'a> {
    tree: &'a Tree,
    argv: &'a [Leaf],
}

impl<'a> Matcher<'a> {
    pub(crate) fn new(tree: &'a Tree, argv: &'a [Leaf]) -> Self {
        Self { tree, argv }
    }

    /// Match the whole tree, requiring every argument vector leaf to be consumed.
    pub(crate) fn run(&self) -> Result<Vec<Binding>, MatchError> {
        let start = Trial {
            left: (0..self.argv.len()).collect(),
            collected: Vec::default(),
        };
        let outcome = self.match_node(self.tree.root(), &start);

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Match outcome: {outcome:?}");
        }

        let left = match outcome {
            Some(trial) if trial.left.is_empty() => return Ok(trial.collected),
            Some(trial) => trial.left,
            None => start.left,
        };

        if left.is_empty() {
            Err(MatchError::Incomplete)
        } else {
            Err(MatchError::Unknown(
                left.into_iter()
                    .map(|index| {
                        let unknown = &self.argv[index];

                        match unknown.kind() {
                            Kind::Option => format!("unknown option: {}", unknown.name()),
                            _ => format!("unknown argument: {}", unknown.value()),
                        }
                    })
                    .collect(),
            ))
        }
    }

    fn match_node(&self, id: NodeId, trial: &Trial) -> Option<Trial> {
        let children = match self.tree.node(id) {
            Node::Leaf(leaf) => return self.match_leaf(leaf, trial),
            Node::Branch { children, .. } => children,
        };

        match self.tree.node(id).kind() {
            Kind::Required => {
                let mut current = trial.clone();

                for child in children {
                    current = self.match_node(*child, &current)?;
                }

                Some(current)
            }
            Kind::Optional | Kind::OptionsShortcut => {
                let mut current = trial.clone();

                for child in children {
                    if let Some(next) = self.match_node(*child, &current) {
                        current = next;
                    }
                }

                Some(current)
            }
            Kind::OneOrMore => {
                let [child] = children.as_slice() else {
                    unreachable!("internal error - one-or-more must have exactly one child");
                };
                let mut current = trial.clone();
                let mut times = 0;

                while let Some(next) = self.match_node(*child, &current) {
                    times += 1;
                    // Stop once a repetition no longer consumes anything.
                    let stalled = next.left.len() == current.left.len();
                    current = next;

                    if stalled {
                        break;
                    }
                }

                if times > 0 {
                    Some(current)
                } else {
                    None
                }
            }
            Kind::Either => {
                // Fewest leftovers wins; ties go to the earliest alternative.
                let mut best: Option<(usize, Trial)> = None;

                for (index, child) in children.iter().enumerate() {
                    if let Some(outcome) = self.match_node(*child, trial) {
                        if best
                            .as_ref()
                            .map_or(true, |(_, b)| outcome.left.len() < b.left.len())
                        {
                            best.replace((index, outcome));
                        }
                    }
                }

                #[cfg(feature = "tracing_debug")]
                {
                    if let Some((index, _)) = &best {
                        debug!("Either selected alternative {index} of {}.", children.len());
                    }
                }

                best.map(|(_, outcome)| outcome)
            }
            Kind::Argument | Kind::Command | Kind::Option => {
                unreachable!("internal error - leaf kinds are never branches")
            }
        }
    }

    fn match_leaf(&self, leaf: &Leaf, trial: &Trial) -> Option<Trial> {
        let (position, matched) = self.single_match(leaf, &trial.left)?;
        let mut next = trial.clone();
        next.left.remove(position);

        if leaf.value().is_accumulating() {
            let increment = match leaf.value() {
                Value::Counted(_) => Value::Counted(1),
                _ => Value::List(matched.into_list()),
            };

            match next
                .collected
                .iter_mut()
                .find(|binding| binding.name == leaf.name())
            {
                Some(binding) => binding.value.accumulate(increment),
                None => next.collected.push(Binding {
                    name: leaf.name().to_string(),
                    value: increment,
                }),
            }
        } else {
            next.collected.push(Binding {
                name: leaf.name().to_string(),
                value: matched,
            });
        }

        Some(next)
    }

    /// Find the first unconsumed argument vector leaf that the `leaf` can match.
    /// Returns its position within `left`, and the value it binds.
    fn single_match(&self, leaf: &Leaf, left: &[usize]) -> Option<(usize, Value)> {
        let first_argument = || {
            left.iter()
                .position(|index| self.argv[*index].kind() == Kind::Argument)
        };

        match leaf.kind() {
            Kind::Argument => {
                let position = first_argument()?;
                Some((position, self.argv[left[position]].value().clone()))
            }
            Kind::Command => {
                let position = first_argument()?;

                if self.argv[left[position]].value().as_str() == Some(leaf.name()) {
                    Some((position, Value::Switch(true)))
                } else {
                    None
                }
            }
            Kind::Option => {
                let position = left.iter().position(|index| {
                    let candidate = &self.argv[*index];
                    candidate.kind() == Kind::Option && candidate.name() == leaf.name()
                })?;
                Some((position, self.argv[left[position]].value().clone()))
            }
            _ => unreachable!("internal error - only leaves are matched"),
        }
    }
}

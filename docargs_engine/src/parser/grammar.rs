#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::constant::*;
use crate::error::Error;
use crate::parser::argv::{parse_long, parse_shorts};
use crate::parser::options::OptionTable;
use crate::pattern::{Arena, Kind, Leaf, NodeId, Tree};
use crate::tokens::TokenStream;

/// Parse the formal usage into a pattern tree, rooted at a `Required` node.
/// Options mentioned in the usage but not declared in the `options` table are registered into it.
pub(crate) fn parse_pattern(source: &str, options: &mut OptionTable) -> Result<Tree, Error> {
    let mut parser = GrammarParser {
        tokens: TokenStream::from_pattern(source),
        options,
        arena: Arena::default(),
    };
    let children = parser.expr()?;

    if parser.tokens.current().is_some() {
        return Err(parser.tokens.error(format!(
            "unexpected ending: '{}'",
            parser.tokens.remaining().join(" ")
        )));
    }

    let GrammarParser { mut arena, .. } = parser;
    let root = arena.branch(Kind::Required, children);
    let tree = Tree::new(arena, root);

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Grammar tree: {tree:?}");
    }

    Ok(tree)
}

/// Recursive descent over the grammar:
/// ```ignore
/// expr ::= seq ( '|' seq )* ;
/// seq  ::= ( atom [ '...' ] )* ;
/// atom ::= '(' expr ')' | '[' expr ']' | 'options' | long | shorts | argument | command ;
/// ```
struct GrammarParser<'a> {
    tokens: TokenStream,
    options: &'a mut OptionTable,
    arena: Arena,
}

impl<'a> GrammarParser<'a> {
    fn expr(&mut self) -> Result<Vec<NodeId>, Error> {
        let seq = self.seq()?;

        if !self.tokens.is_current(ALTERNATIVE) {
            return Ok(seq);
        }

        let mut alternatives = vec![self.group(seq)];

        while self.tokens.is_current(ALTERNATIVE) {
            self.tokens.advance();
            let seq = self.seq()?;
            alternatives.push(self.group(seq));
        }

        Ok(vec![self.arena.branch(Kind::Either, alternatives)])
    }

    /// A sequence of exactly one element stands for itself; otherwise it is grouped as `Required`.
    fn group(&mut self, mut seq: Vec<NodeId>) -> NodeId {
        if seq.len() == 1 {
            seq.remove(0)
        } else {
            self.arena.branch(Kind::Required, seq)
        }
    }

    fn seq(&mut self) -> Result<Vec<NodeId>, Error> {
        let mut result = Vec::default();

        while !self
            .tokens
            .current_is_any(true, &[CLOSE_OPTIONAL, CLOSE_REQUIRED, ALTERNATIVE])
        {
            let atom = self.atom()?;

            if self.tokens.is_current(ELLIPSIS) {
                self.tokens.advance();
                let repeated = self.group(atom);
                result.push(self.arena.branch(Kind::OneOrMore, vec![repeated]));
            } else {
                result.extend(atom);
            }
        }

        Ok(result)
    }

    fn atom(&mut self) -> Result<Vec<NodeId>, Error> {
        let Some(token) = self.tokens.current() else {
            unreachable!("internal error - atom requires a current token");
        };

        if token == OPEN_REQUIRED || token == OPEN_OPTIONAL {
            let (kind, closing) = if token == OPEN_REQUIRED {
                (Kind::Required, CLOSE_REQUIRED)
            } else {
                (Kind::Optional, CLOSE_OPTIONAL)
            };
            let opening = token.to_string();
            self.tokens.advance();
            let children = self.expr()?;

            match self.tokens.advance() {
                Some(moved) if moved == closing => {
                    Ok(vec![self.arena.branch(kind, children)])
                }
                moved => Err(self.tokens.error(format!(
                    "unmatched '{opening}', expected: '{closing}' got: '{}'",
                    moved.unwrap_or_default()
                ))),
            }
        } else if token == OPTIONS_SHORTCUT {
            self.tokens.advance();
            Ok(vec![self.arena.branch(Kind::OptionsShortcut, Vec::default())])
        } else if self.tokens.current_starts_with("--") && token != END_OF_OPTIONS {
            let leaves = parse_long(&mut self.tokens, self.options)?;
            Ok(self.leaves(leaves))
        } else if self.tokens.current_starts_with("-") && token != "-" && token != END_OF_OPTIONS {
            let leaves = parse_shorts(&mut self.tokens, self.options)?;
            Ok(self.leaves(leaves))
        } else if (self.tokens.current_starts_with("<") && self.tokens.current_ends_with(">"))
            || self.tokens.current_is_upper()
        {
            let name = token.to_string();
            self.tokens.advance();
            Ok(vec![self.arena.leaf(Leaf::argument(name, None))])
        } else {
            let name = token.to_string();
            self.tokens.advance();
            Ok(vec![self.arena.leaf(Leaf::command(name, false))])
        }
    }

    fn leaves(&mut self, leaves: Vec<Leaf>) -> Vec<NodeId> {
        leaves
            .into_iter()
            .map(|leaf| self.arena.leaf(leaf))
            .collect()
    }
}

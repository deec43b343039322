use regex::Regex;
use std::collections::VecDeque;
use std::sync::LazyLock;

use crate::error::Error;

static DELIMITERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\[\]()|]|\.\.\.)").expect("static regex must compile")
});

// Whitespace separates tokens, except anything carrying an `<..>` placeholder stays whole.
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+|(\S*<.*?>)").expect("static regex must compile"));

/// Where the tokens came from.
/// Errors raised while consuming a stream are attributed to its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Origin {
    /// The runtime argument vector.
    User,
    /// The doc string.
    Grammar,
}

/// An ordered, consumable sequence of tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TokenStream {
    tokens: VecDeque<String>,
    origin: Origin,
}

impl TokenStream {
    pub(crate) fn from_argv(argv: &[&str]) -> Self {
        Self {
            tokens: argv.iter().map(|token| token.to_string()).collect(),
            origin: Origin::User,
        }
    }

    /// Plain mode: split on whitespace.
    pub(crate) fn from_words(source: &str, origin: Origin) -> Self {
        Self {
            tokens: source.split_whitespace().map(str::to_string).collect(),
            origin,
        }
    }

    /// Grammar mode: the usage delimiters `[ ] ( ) | ...` always stand alone, and `<..>` placeholders are atomic.
    pub(crate) fn from_pattern(source: &str) -> Self {
        let padded = DELIMITERS.replace_all(source, " ${1} ");
        let mut tokens = VecDeque::default();
        let mut push = |token: &str| {
            if !token.is_empty() {
                tokens.push_back(token.to_string());
            }
        };
        let mut last = 0;

        for captures in SEPARATORS.captures_iter(&padded) {
            let Some(separator) = captures.get(0) else {
                continue;
            };
            push(&padded[last..separator.start()]);

            if let Some(placeholder) = captures.get(1) {
                push(placeholder.as_str());
            }

            last = separator.end();
        }

        push(&padded[last..]);

        Self {
            tokens,
            origin: Origin::Grammar,
        }
    }

    pub(crate) fn is_user(&self) -> bool {
        self.origin == Origin::User
    }

    /// Peek at the next token.
    pub(crate) fn current(&self) -> Option<&str> {
        self.tokens.front().map(String::as_str)
    }

    /// Consume the next token.
    pub(crate) fn advance(&mut self) -> Option<String> {
        self.tokens.pop_front()
    }

    /// Consume every remaining token.
    pub(crate) fn drain(&mut self) -> impl Iterator<Item = String> + '_ {
        self.tokens.drain(..)
    }

    pub(crate) fn remaining(&self) -> Vec<&str> {
        self.tokens.iter().map(String::as_str).collect()
    }

    pub(crate) fn is_current(&self, literal: &str) -> bool {
        self.current() == Some(literal)
    }

    pub(crate) fn current_starts_with(&self, prefix: &str) -> bool {
        self.current().is_some_and(|token| token.starts_with(prefix))
    }

    pub(crate) fn current_ends_with(&self, suffix: &str) -> bool {
        self.current().is_some_and(|token| token.ends_with(suffix))
    }

    /// Whether the next token is one of the `literals`.
    /// When `or_end` is set, an exhausted stream also counts as a match.
    pub(crate) fn current_is_any(&self, or_end: bool, literals: &[&str]) -> bool {
        match self.current() {
            Some(token) => literals.contains(&token),
            None => or_end,
        }
    }

    pub(crate) fn current_is_upper(&self) -> bool {
        self.current().is_some_and(is_upper)
    }

    /// Build an error attributed to this stream's origin.
    pub(crate) fn error(&self, message: impl Into<String>) -> Error {
        match self.origin {
            Origin::User => Error::User(message.into()),
            Origin::Grammar => Error::Grammar(message.into()),
        }
    }
}

/// True when every cased character is uppercase, and there is at least one of them.
pub(crate) fn is_upper(text: &str) -> bool {
    text.to_uppercase() == text && text.chars().any(char::is_uppercase)
}

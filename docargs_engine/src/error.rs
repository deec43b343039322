use thiserror::Error;

/// The failure modes of building and running a [`GeneralParser`](crate::GeneralParser).
///
/// The variants are distinguished by *origin*, so that a caller can decide its exit policy.
/// A `Grammar` error is a defect in the program's static doc string; it is never the fault of whoever invoked the program.
/// A `User` error means the argument vector could not be matched against the usage patterns.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// The doc string violates the usage/options convention.
    #[error("Doc string error: {0}")]
    Grammar(String),

    /// The argument vector does not match any usage pattern.
    #[error("{0}")]
    User(String),
}

impl Error {
    /// The error message, without any display prefix.
    pub fn message(&self) -> &str {
        match self {
            Error::Grammar(message) | Error::User(message) => message,
        }
    }

    /// Whether this error originates from the argument vector (rather than the doc string).
    pub fn is_user(&self) -> bool {
        matches!(self, Error::User(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            Error::Grammar("section 'usage' not found".to_string()).to_string(),
            "Doc string error: section 'usage' not found"
        );
        assert_eq!(
            Error::User("unknown option: --foo".to_string()).to_string(),
            "unknown option: --foo"
        );
    }

    #[test]
    fn message() {
        let error = Error::Grammar("abc".to_string());
        assert_eq!(error.message(), "abc");
        assert!(!error.is_user());

        let error = Error::User("def".to_string());
        assert_eq!(error.message(), "def");
        assert!(error.is_user());
    }
}

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::Error;
use crate::model::Value;

/// The successful result of parsing an argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The argument vector matched; every name in the usage grammar is bound.
    Matched(ArgMap),
    /// Help was requested; carries the doc string (trimmed of surrounding newlines).
    Help(String),
    /// The version was requested; carries the version text.
    Version(String),
}

impl Outcome {
    /// The bound values, when the argument vector matched.
    pub fn into_args(self) -> Option<ArgMap> {
        match self {
            Outcome::Matched(args) => Some(args),
            Outcome::Help(_) | Outcome::Version(_) => None,
        }
    }
}

/// The parsed values, keyed by name and ordered by name.
///
/// Names keep their usage spelling: `--long` or `-s` for options, `<arg>` or `ARG` for arguments, and the bare word for commands.
///
/// ### Example
/// ```
/// # use docargs_engine as docargs;
/// use docargs::{ArgMap, Value};
///
/// let args: ArgMap = vec![
///     ("--speed".to_string(), Value::Plain(Some("10".to_string()))),
///     ("-v".to_string(), Value::Counted(2)),
///     ("<name>".to_string(), Value::List(vec!["a".to_string(), "b".to_string()])),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(args.get_parsed::<u32>("--speed").unwrap(), Some(10));
/// assert_eq!(args.get_count("-v"), 2);
/// assert_eq!(args.get_vec("<name>"), vec!["a", "b"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgMap {
    values: BTreeMap<String, Value>,
}

impl ArgMap {
    /// The value bound to `name`, if `name` is known.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Whether `name` is known (regardless of whether it was matched).
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Whether `name` was present; unknown names are `false`.
    pub fn get_bool(&self, name: &str) -> bool {
        self.get(name).is_some_and(Value::as_bool)
    }

    /// How many times `name` was present; unknown names are `0`.
    pub fn get_count(&self, name: &str) -> u64 {
        self.get(name).map_or(0, Value::as_count)
    }

    /// The single string value of `name`.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// The string values of `name`.
    pub fn get_vec(&self, name: &str) -> Vec<&str> {
        self.get(name).map_or_else(Vec::default, Value::as_list)
    }

    /// Convert the single string value of `name`.
    /// Results in `Ok(None)` when there is no value, and a user error when the conversion fails.
    pub fn get_parsed<T: FromStr>(&self, name: &str) -> Result<Option<T>, Error> {
        match self.get_str(name) {
            Some(value) => T::from_str(value).map(Some).map_err(|_| {
                Error::User(format!(
                    "cannot convert '{value}' to {}.",
                    std::any::type_name::<T>()
                ))
            }),
            None => Ok(None),
        }
    }

    /// Iterate over the names and values, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// The number of names.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no names at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Take the underlying map.
    pub fn into_map(self) -> BTreeMap<String, Value> {
        self.values
    }
}

impl FromIterator<(String, Value)> for ArgMap {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for ArgMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.values.keys().map(String::len).max().unwrap_or(0);

        for (index, (name, value)) in self.values.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }

            write!(f, "{name:>width$} {value}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn args() -> ArgMap {
        vec![
            ("--speed".to_string(), Value::Plain(Some("10".to_string()))),
            ("--drifting".to_string(), Value::Switch(false)),
            ("--moored".to_string(), Value::Switch(true)),
            ("-v".to_string(), Value::Counted(3)),
            ("<name>".to_string(), Value::List(vec!["a".to_string(), "b".to_string()])),
            ("<x>".to_string(), Value::Plain(None)),
            ("<y>".to_string(), Value::Plain(Some("abc".to_string()))),
        ]
        .into_iter()
        .collect()
    }

    #[rstest]
    #[case("--speed", true, 1)]
    #[case("--drifting", false, 0)]
    #[case("--moored", true, 1)]
    #[case("-v", true, 3)]
    #[case("<name>", true, 2)]
    #[case("<x>", false, 0)]
    #[case("--unknown", false, 0)]
    fn get_bool_count(#[case] name: &str, #[case] expected_bool: bool, #[case] expected_count: u64) {
        let args = args();
        assert_eq!(args.get_bool(name), expected_bool);
        assert_eq!(args.get_count(name), expected_count);
    }

    #[test]
    fn get_values() {
        let args = args();
        assert_eq!(args.get_str("--speed"), Some("10"));
        assert_eq!(args.get_str("<x>"), None);
        assert_eq!(args.get_str("<name>"), None);
        assert_eq!(args.get_vec("<name>"), vec!["a", "b"]);
        assert_eq!(args.get_vec("--speed"), vec!["10"]);
        assert!(args.get_vec("--unknown").is_empty());
        assert!(args.contains("<x>"));
        assert!(!args.contains("--unknown"));
        assert_eq!(args.get("-v"), Some(&Value::Counted(3)));
        assert_eq!(args.len(), 7);
        assert!(!args.is_empty());
        assert!(ArgMap::default().is_empty());
    }

    #[test]
    fn get_parsed() {
        let args = args();
        assert_eq!(args.get_parsed::<u32>("--speed"), Ok(Some(10)));
        assert_eq!(args.get_parsed::<u32>("<x>"), Ok(None));
        assert_matches!(
            args.get_parsed::<u32>("<y>"),
            Err(Error::User(message)) if message == "cannot convert 'abc' to u32."
        );
    }

    #[test]
    fn iter() {
        let args = args();
        let names: Vec<&str> = args.iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec!["--drifting", "--moored", "--speed", "-v", "<name>", "<x>", "<y>"]
        );
    }

    #[test]
    fn display() {
        // Setup
        let args: ArgMap = vec![
            ("--speed".to_string(), Value::Plain(Some("10".to_string()))),
            ("-v".to_string(), Value::Counted(3)),
            ("<x>".to_string(), Value::Plain(None)),
        ]
        .into_iter()
        .collect();

        // Execute
        let output = args.to_string();

        // Verify
        assert_eq!(output, "--speed 10\n     -v 3\n    <x> none");
    }

    #[test]
    fn outcome_into_args() {
        assert_eq!(Outcome::Matched(args()).into_args(), Some(args()));
        assert_eq!(Outcome::Help("help".to_string()).into_args(), None);
        assert_eq!(Outcome::Version("0.1".to_string()).into_args(), None);
    }
}

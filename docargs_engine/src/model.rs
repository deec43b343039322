/// The value bound to a name after parsing.
///
/// Which shape a name receives depends on how it is declared and whether it may repeat:
/// * Commands and argument-less options are `Switch`, or `Counted` when they may repeat.
/// * Positional arguments and argument-taking options are `Plain`, or `List` when they may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// A flag or command that was (`true`) or was not (`false`) present.
    Switch(bool),
    /// The number of times a repeatable flag or command was present.
    Counted(u64),
    /// A single value; `None` when absent and without a default.
    Plain(Option<String>),
    /// The values of a repeatable argument or option, in the order given.
    List(Vec<String>),
}

impl Value {
    /// Interpret the value as a boolean (present/absent).
    pub fn as_bool(&self) -> bool {
        match self {
            Value::Switch(b) => *b,
            Value::Counted(n) => *n > 0,
            Value::Plain(s) => s.is_some(),
            Value::List(items) => !items.is_empty(),
        }
    }

    /// Interpret the value as a count of occurrences.
    pub fn as_count(&self) -> u64 {
        match self {
            Value::Switch(b) => u64::from(*b),
            Value::Counted(n) => *n,
            Value::Plain(s) => u64::from(s.is_some()),
            Value::List(items) => items.len() as u64,
        }
    }

    /// The single string value, if there is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Plain(Some(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The string values; a single `Plain` value becomes a one item list.
    pub fn as_list(&self) -> Vec<&str> {
        match self {
            Value::Plain(Some(s)) => vec![s.as_str()],
            Value::List(items) => items.iter().map(String::as_str).collect(),
            _ => Vec::default(),
        }
    }

    /// Counters and lists gather every occurrence, rather than only the latest.
    pub(crate) fn is_accumulating(&self) -> bool {
        matches!(self, Value::Counted(_) | Value::List(_))
    }

    pub(crate) fn into_list(self) -> Vec<String> {
        match self {
            Value::Plain(Some(s)) => vec![s],
            Value::List(items) => items,
            _ => Vec::default(),
        }
    }

    /// Fold another occurrence into this value.
    /// Mismatched shapes are left untouched.
    pub(crate) fn accumulate(&mut self, increment: Value) {
        match (self, increment) {
            (Value::Counted(n), Value::Counted(k)) => *n += k,
            (Value::List(items), Value::List(more)) => items.extend(more),
            _ => {}
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Switch(b) => write!(f, "{b}"),
            Value::Counted(n) => write!(f, "{n}"),
            Value::Plain(Some(s)) => write!(f, "{s}"),
            Value::Plain(None) => write!(f, "none"),
            Value::List(items) => write!(f, "{:?}", items),
        }
    }
}

mod argv;
mod grammar;
mod options;
mod section;

pub(crate) use argv::parse_argv;
pub(crate) use grammar::parse_pattern;
pub(crate) use options::OptionTable;
pub(crate) use section::{extract_usage, formal_usage};

use regex::Regex;
use std::sync::LazyLock;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::model::Value;
use crate::parser::section::{parse_section, OPTIONS};
use crate::pattern::Leaf;

// Each option description starts on a new line, with its first dash-token.
static DESCRIPTION_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*(-\S+?)").expect("static regex must compile"));

static DEFAULT_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[default: ([^\]]*)\]").expect("static regex must compile")
});

/// The declared options, in declaration order.
///
/// Options first seen in the usage grammar or the argument vector are registered as they are encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct OptionTable {
    options: Vec<Leaf>,
}

impl OptionTable {
    /// Build the table from every `options:` section of the `doc`.
    pub(crate) fn from_doc(doc: &str) -> Self {
        let mut table = OptionTable::default();

        for option in parse_defaults(doc) {
            if !table.options.contains(&option) {
                table.register(option);
            }
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Option table: {:?}", table.options);
        }

        table
    }

    pub(crate) fn options(&self) -> &[Leaf] {
        &self.options
    }

    pub(crate) fn register(&mut self, option: Leaf) {
        self.options.push(option);
    }

    pub(crate) fn with_long(&self, long: &str) -> Vec<&Leaf> {
        self.options
            .iter()
            .filter(|option| option.long() == Some(long))
            .collect()
    }

    pub(crate) fn with_long_prefix(&self, prefix: &str) -> Vec<&Leaf> {
        self.options
            .iter()
            .filter(|option| option.long().is_some_and(|long| long.starts_with(prefix)))
            .collect()
    }

    pub(crate) fn with_short(&self, short: &str) -> Vec<&Leaf> {
        self.options
            .iter()
            .filter(|option| option.short() == Some(short))
            .collect()
    }
}

/// Parse the option descriptions out of every `options:` section.
fn parse_defaults(doc: &str) -> Vec<Leaf> {
    let mut defaults = Vec::default();

    for section in parse_section(&OPTIONS, doc) {
        let body = section
            .split_once(':')
            .map_or(section.as_str(), |(_, after)| after);
        let body = format!("\n{body}");
        let starts: Vec<(usize, usize, &str)> = DESCRIPTION_START
            .captures_iter(&body)
            .filter_map(|captures| {
                let whole = captures.get(0)?;
                let dash = captures.get(1)?;
                Some((whole.start(), whole.end(), dash.as_str()))
            })
            .collect();

        for (index, (_, end, dash)) in starts.iter().enumerate() {
            let until = starts
                .get(index + 1)
                .map_or(body.len(), |(start, _, _)| *start);
            let description = format!("{dash}{}", &body[*end..until]);

            if description.starts_with('-') {
                defaults.push(parse_option(&description));
            }
        }
    }

    defaults
}

/// Parse a single option description, such as `-s KN, --speed=KN  Speed in knots [default: 10].`
///
/// The option forms and the free text description are separated by (at least) two spaces.
pub(crate) fn parse_option(description: &str) -> Leaf {
    let (forms, text) = description
        .trim()
        .split_once("  ")
        .unwrap_or((description.trim(), ""));
    let forms = forms.replace(&[',', '='][..], " ");
    let mut short = None;
    let mut long = None;
    let mut arg_count = 0;

    for form in forms.split_whitespace() {
        if form.starts_with("--") {
            long.replace(form.to_string());
        } else if form.starts_with('-') {
            short.replace(form.to_string());
        } else {
            arg_count = 1;
        }
    }

    let value = if arg_count > 0 {
        Value::Plain(
            DEFAULT_VALUE
                .captures(text)
                .and_then(|captures| captures.get(1))
                .map(|default| default.as_str().to_string()),
        )
    } else {
        Value::Switch(false)
    };

    Leaf::option(short, long, arg_count, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn option(short: Option<&str>, long: Option<&str>, arg_count: usize, value: Value) -> Leaf {
        Leaf::option(
            short.map(str::to_string),
            long.map(str::to_string),
            arg_count,
            value,
        )
    }

    #[rstest]
    #[case("-h", option(Some("-h"), None, 0, Value::Switch(false)))]
    #[case("--help", option(None, Some("--help"), 0, Value::Switch(false)))]
    #[case("-h --help", option(Some("-h"), Some("--help"), 0, Value::Switch(false)))]
    #[case("-h, --help", option(Some("-h"), Some("--help"), 0, Value::Switch(false)))]
    #[case("-h TOPIC", option(Some("-h"), None, 1, Value::Plain(None)))]
    #[case("--help TOPIC", option(None, Some("--help"), 1, Value::Plain(None)))]
    #[case("-h TOPIC --help TOPIC", option(Some("-h"), Some("--help"), 1, Value::Plain(None)))]
    #[case("-h TOPIC, --help TOPIC", option(Some("-h"), Some("--help"), 1, Value::Plain(None)))]
    #[case("-h TOPIC, --help=TOPIC", option(Some("-h"), Some("--help"), 1, Value::Plain(None)))]
    #[case("-h  Description...", option(Some("-h"), None, 0, Value::Switch(false)))]
    #[case("-h --help  Description...", option(Some("-h"), Some("--help"), 0, Value::Switch(false)))]
    #[case("-h TOPIC  Description...", option(Some("-h"), None, 1, Value::Plain(None)))]
    #[case("    -h", option(Some("-h"), None, 0, Value::Switch(false)))]
    #[case(
        "-h TOPIC  Description... [default: 2]",
        option(Some("-h"), None, 1, Value::Plain(Some("2".to_string())))
    )]
    #[case(
        "-h TOPIC  Descripton... [default: topic-1]",
        option(Some("-h"), None, 1, Value::Plain(Some("topic-1".to_string())))
    )]
    #[case(
        "--help=TOPIC  ... [default: 3.14]",
        option(None, Some("--help"), 1, Value::Plain(Some("3.14".to_string())))
    )]
    #[case(
        "-h, --help=DIR  ... [default: ./]",
        option(Some("-h"), Some("--help"), 1, Value::Plain(Some("./".to_string())))
    )]
    #[case(
        "-h TOPIC  Descripton... [dEfAuLt: 2]",
        option(Some("-h"), None, 1, Value::Plain(Some("2".to_string())))
    )]
    #[case(
        "-v  Verbose [default: ignored]",
        option(Some("-v"), None, 0, Value::Switch(false))
    )]
    fn parse_option_forms(#[case] description: &str, #[case] expected: Leaf) {
        assert_eq!(parse_option(description), expected);
    }

    #[test]
    fn from_doc() {
        // Setup
        let doc = "Usage: prog [options]

Options:
  -h --help     Show this screen.
  --speed=<kn>  Speed in knots [default: 10].
  --moored      Moored (anchored) mine.
  -o FILE       Output file.

More options:
  -h --help     Show this screen.
  -q            Quiet.
";

        // Execute
        let table = OptionTable::from_doc(doc);

        // Verify
        assert_eq!(
            table.options(),
            &[
                option(Some("-h"), Some("--help"), 0, Value::Switch(false)),
                option(None, Some("--speed"), 1, Value::Plain(Some("10".to_string()))),
                option(None, Some("--moored"), 0, Value::Switch(false)),
                option(Some("-o"), None, 1, Value::Plain(None)),
                option(Some("-q"), None, 0, Value::Switch(false)),
            ]
        );
    }

    #[test]
    fn from_doc_multiline_description() {
        // Setup
        let doc = "usage: prog

options:
    -a        Add
    -r        Remote
              spanning lines [default: x]
    -m <msg>  Message
              continued [default: hello]
";

        // Execute
        let table = OptionTable::from_doc(doc);

        // Verify
        assert_eq!(
            table.options(),
            &[
                option(Some("-a"), None, 0, Value::Switch(false)),
                option(Some("-r"), None, 0, Value::Switch(false)),
                option(Some("-m"), None, 1, Value::Plain(Some("hello".to_string()))),
            ]
        );
    }

    #[test]
    fn from_doc_no_options() {
        assert!(OptionTable::from_doc("usage: prog <x>").options().is_empty());
    }

    #[test]
    fn lookup() {
        // Setup
        let mut table = OptionTable::default();
        table.register(option(None, Some("--format"), 1, Value::Plain(None)));
        table.register(option(Some("-f"), Some("--formal"), 0, Value::Switch(false)));

        // Execute & verify
        assert_eq!(table.with_long("--format").len(), 1);
        assert_eq!(table.with_long("--for").len(), 0);
        assert_eq!(table.with_long_prefix("--for").len(), 2);
        assert_eq!(table.with_long_prefix("--formal").len(), 1);
        assert_eq!(table.with_short("-f").len(), 1);
        assert_eq!(table.with_short("-x").len(), 0);
    }
}

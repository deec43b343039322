use regex::Regex;
use std::sync::LazyLock;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::constant::*;
use crate::error::Error;
use crate::tokens::{Origin, TokenStream};

/// The header line of a section contains its label (case insensitive).
/// A section runs from its header line through the indented lines that directly follow it.
fn section_pattern(label: &str) -> String {
    format!(
        r"(?im)^([^\n]*{label}[^\n]*\n?(?:[ \t].*?(?:\n|$))*)",
        label = regex::escape(label)
    )
}

pub(crate) static USAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&section_pattern(USAGE_SECTION)).expect("static regex must compile")
});

pub(crate) static OPTIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&section_pattern(OPTIONS_SECTION)).expect("static regex must compile")
});

/// Find every section of the `source` matched by the `section` pattern.
pub(crate) fn parse_section(section: &Regex, source: &str) -> Vec<String> {
    section
        .find_iter(source)
        .map(|found| found.as_str().trim().to_string())
        .collect()
}

/// Find the one and only usage section.
pub(crate) fn extract_usage(doc: &str) -> Result<String, Error> {
    let mut sections = parse_section(&USAGE, doc);

    match sections.len() {
        0 => Err(Error::Grammar("section 'usage' not found".to_string())),
        1 => Ok(sections.remove(0)),
        _ => Err(Error::Grammar("more than one section 'usage'".to_string())),
    }
}

/// Rewrite the usage section into a single expression, with one alternative per program invocation.
///
/// For example:
/// ```ignore
/// Usage:
///   prog go <x>
///   prog stop
/// ```
/// becomes `( go <x> ) | ( stop )`.
pub(crate) fn formal_usage(section: &str) -> Result<String, Error> {
    let body = section
        .split_once(':')
        .map_or(section, |(_, after)| after);
    let mut words = TokenStream::from_words(body, Origin::Grammar);
    let program = words.advance().ok_or_else(|| {
        words.error("no fields found in section 'usage' (perhaps a spacing error)")
    })?;
    let mut formal = String::from("( ");

    for word in words.drain() {
        if word == program {
            formal.push_str(") | ( ");
        } else {
            formal.push_str(&word);
            formal.push(' ');
        }
    }

    formal.push(')');

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Formal usage for '{program}': {formal}");
    }

    Ok(formal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parse_section_empty() {
        assert!(parse_section(&USAGE, "").is_empty());
        assert!(parse_section(&USAGE, "just some text\n  indented").is_empty());
    }

    #[test]
    fn parse_section_multiple() {
        // Setup
        let doc = "
usage: this

usage:hai
usage: this that

usage: foo
       bar

PROGRAM USAGE:
 foo
 bar
usage:
\ttoo
\ttar
Usage: eggs spam
BAZZ
usage: pit stop";

        // Execute
        let sections = parse_section(&USAGE, doc);

        // Verify
        assert_eq!(
            sections,
            vec![
                "usage: this",
                "usage:hai",
                "usage: this that",
                "usage: foo\n       bar",
                "PROGRAM USAGE:\n foo\n bar",
                "usage:\n\ttoo\n\ttar",
                "Usage: eggs spam",
                "usage: pit stop",
            ]
        );
    }

    #[test]
    fn parse_section_options() {
        // Setup
        let doc = "Usage: prog [options]

Options:
  -h --help  Show help.
  -v         Verbose.

Other options:
  --speed=<kn>  Speed.
";

        // Execute
        let sections = parse_section(&OPTIONS, doc);

        // Verify
        assert_eq!(
            sections,
            vec![
                "Options:\n  -h --help  Show help.\n  -v         Verbose.",
                "Other options:\n  --speed=<kn>  Speed.",
            ]
        );
    }

    #[test]
    fn extract_usage_single() {
        let usage = extract_usage("Naval Fate.\n\nUsage:\n  prog ship new <name>\n  prog --version\n\nOptions:\n  --version  Show version.\n").unwrap();
        assert_eq!(usage, "Usage:\n  prog ship new <name>\n  prog --version");
    }

    #[rstest]
    #[case("no usage here", "section 'usage' not found")]
    #[case("Usage: prog\n\nusage: prog", "more than one section 'usage'")]
    fn extract_usage_invalid(#[case] doc: &str, #[case] expected: &str) {
        assert_matches!(extract_usage(doc), Err(Error::Grammar(message)) if message == expected);
    }

    #[rstest]
    #[case("usage: prog", "( )")]
    #[case("usage: prog go <x>", "( go <x> )")]
    #[case("Usage:\n  prog go <x>\n  prog stop", "( go <x> ) | ( stop )")]
    #[case("usage: prog [-a] | -b\n       prog --c", "( [-a] | -b ) | ( --c )")]
    fn formal_usage_valid(#[case] section: &str, #[case] expected: &str) {
        assert_eq!(formal_usage(section).unwrap(), expected);
    }

    #[test]
    fn formal_usage_empty() {
        assert_matches!(
            formal_usage("usage:"),
            Err(Error::Grammar(message)) if message.contains("no fields found")
        );
    }
}

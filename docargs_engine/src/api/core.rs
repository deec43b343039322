use std::collections::BTreeMap;
use std::env;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::{ArgMap, Outcome};
use crate::constant::*;
use crate::error::Error;
use crate::matcher::{Binding, Matcher};
use crate::model::Value;
use crate::parser::{extract_usage, formal_usage, parse_argv, parse_pattern, OptionTable};
use crate::pattern::{Leaf, Tree};
use crate::tokens::TokenStream;
use crate::ui::{ConsoleInterface, UserInterface};

/// The command line parser configuration.
///
/// The doc string is both the help message and the grammar of the command line.
///
/// ### Example
/// ```
/// # use docargs_engine as docargs;
/// use docargs::{CommandLineParser, Value};
///
/// let doc = "
/// Usage: program [-v] <file>
///
/// Options:
///   -v  Be verbose.
/// ";
/// let parser = CommandLineParser::new(doc)
///     .build()
///     .unwrap();
///
/// let args = parser.parse_tokens(vec!["a.txt"].as_slice()).unwrap().into_args().unwrap();
///
/// assert_eq!(args.get_str("<file>"), Some("a.txt"));
/// assert_eq!(args.get("-v"), Some(&Value::Switch(false)));
/// ```
#[derive(Debug, Clone)]
pub struct CommandLineParser {
    doc: String,
    version: Option<String>,
    options_first: bool,
    help: bool,
}

impl CommandLineParser {
    /// Create a command line parser from its doc string.
    pub fn new(doc: impl Into<String>) -> Self {
        Self {
            doc: doc.into(),
            version: None,
            options_first: false,
            help: true,
        }
    }

    /// Respond to `--version` with the `version` text.
    /// An empty `version` disables the response.
    ///
    /// ### Example
    /// ```
    /// # use docargs_engine as docargs;
    /// use docargs::{CommandLineParser, Outcome};
    ///
    /// let parser = CommandLineParser::new("Usage: program [--version]")
    ///     .version("program 1.0")
    ///     .build()
    ///     .unwrap();
    ///
    /// let outcome = parser.parse_tokens(vec!["--version"].as_slice()).unwrap();
    ///
    /// assert_eq!(outcome, Outcome::Version("program 1.0".to_string()));
    /// ```
    pub fn version(mut self, version: impl Into<String>) -> Self {
        let version = version.into();

        if version.is_empty() {
            self.version = None;
        } else {
            self.version.replace(version);
        }

        self
    }

    /// Stop scanning for options at the first positional argument.
    /// Everything from there on is taken as arguments, which suits programs that delegate to sub-commands.
    pub fn options_first(mut self, options_first: bool) -> Self {
        self.options_first = options_first;
        self
    }

    /// Do not respond to `-h`/`--help` with the doc string.
    pub fn skip_help_flags(mut self, skip: bool) -> Self {
        self.help = !skip;
        self
    }

    /// Build the parser.
    ///
    /// Fails with [`Error::Grammar`] when the doc string does not follow the usage/options convention.
    pub fn build(self) -> Result<GeneralParser, Error> {
        let CommandLineParser {
            doc,
            version,
            options_first,
            help,
        } = self;
        let usage = extract_usage(&doc)?;
        let formal = formal_usage(&usage)?;
        let mut options = OptionTable::from_doc(&doc);
        let mut tree = parse_pattern(&formal, &mut options)?;
        tree.expand_shortcuts(OptionTable::from_doc(&doc).options());
        tree.fix();

        Ok(GeneralParser {
            doc,
            usage,
            version,
            options_first,
            help,
            options,
            tree,
        })
    }
}

/// The built command line parser.
///
/// Parsing does not modify the parser, so the same instance may be used any number of times.
#[derive(Debug, Clone)]
pub struct GeneralParser {
    doc: String,
    usage: String,
    version: Option<String>,
    options_first: bool,
    help: bool,
    options: OptionTable,
    tree: Tree,
}

impl GeneralParser {
    /// The usage section of the doc string.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Parse the `tokens` (which exclude the program name).
    ///
    /// User errors carry the reason, followed by the usage section on a new line.
    ///
    /// ### Example
    /// ```
    /// # use docargs_engine as docargs;
    /// use docargs::{CommandLineParser, Error};
    ///
    /// let parser = CommandLineParser::new("Usage: program <x>")
    ///     .build()
    ///     .unwrap();
    ///
    /// let error = parser.parse_tokens(vec!["a", "b"].as_slice()).unwrap_err();
    ///
    /// assert_eq!(error, Error::User("unknown argument: b\nUsage: program <x>".to_string()));
    /// ```
    pub fn parse_tokens(&self, tokens: &[&str]) -> Result<Outcome, Error> {
        let mut options = self.options.clone();
        let argv = parse_argv(
            TokenStream::from_argv(tokens),
            &mut options,
            self.options_first,
        )
        .map_err(|error| self.with_usage(error))?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Argument vector: {argv:?}");
        }

        if let Some(outcome) = self.extras(&argv) {
            return Ok(outcome);
        }

        let bindings = Matcher::new(&self.tree, &argv)
            .run()
            .map_err(|error| self.with_usage(Error::User(error.to_string())))?;

        Ok(Outcome::Matched(self.assemble(bindings)))
    }

    /// Parse the `tokens`, printing the help, version, or error through the `user_interface`.
    ///
    /// Results in the exit code when the program should stop: `0` after help/version, and `1` after an error.
    pub fn parse_with_interface(
        &self,
        tokens: &[&str],
        user_interface: &dyn UserInterface,
    ) -> Result<ArgMap, i32> {
        match self.parse_tokens(tokens) {
            Ok(Outcome::Matched(args)) => Ok(args),
            Ok(Outcome::Help(message)) | Ok(Outcome::Version(message)) => {
                user_interface.print(message);
                Err(0)
            }
            Err(error) => {
                user_interface.print_error(error);
                Err(1)
            }
        }
    }

    /// Parse the command line arguments of this process.
    ///
    /// Exits the process after printing the help, version, or error.
    pub fn parse(&self) -> ArgMap {
        let command_input: Vec<String> = env::args().skip(1).collect();

        match self.parse_with_interface(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
            &ConsoleInterface::default(),
        ) {
            Ok(args) => args,
            Err(exit_code) => {
                std::process::exit(exit_code);
            }
        }
    }

    fn with_usage(&self, error: Error) -> Error {
        match error {
            Error::User(message) => Error::User(format!("{message}\n{}", self.usage)),
            Error::Grammar(_) => error,
        }
    }

    fn extras(&self, argv: &[Leaf]) -> Option<Outcome> {
        let requested = |names: &[&str]| {
            argv.iter()
                .any(|option| names.contains(&option.name()) && option.value() == &Value::Switch(true))
        };

        if self.help && requested(&[HELP_SHORT, HELP_LONG]) {
            return Some(Outcome::Help(self.doc.trim_matches('\n').to_string()));
        }

        match &self.version {
            Some(version) if requested(&[VERSION_LONG]) => Some(Outcome::Version(version.clone())),
            _ => None,
        }
    }

    /// Every leaf of the grammar starts at its default, then the matched values are laid over.
    fn assemble(&self, bindings: Vec<Binding>) -> ArgMap {
        let mut values = BTreeMap::default();

        for id in self.tree.leaves() {
            if let Some(leaf) = self.tree.leaf(id) {
                values.insert(leaf.name().to_string(), leaf.value().clone());
            }
        }

        for Binding { name, value } in bindings {
            values.insert(name, value);
        }

        values.into_iter().collect()
    }
}

//! `docargs` is a command line parser whose grammar is the program's own help message.
//!
//! Rather than registering each option and argument through an Api, the program writes its usage text (the *doc string*).
//! `docargs` derives the formal grammar from that text, matches the command line against it, and hands back a map of names to values.
//! The help message can never drift from what the parser accepts, because they are the same text.
//!
//! # Usage
//! This page includes a demo on using `docargs`.
//! More examples are outlined in the `demos/` directory of the source.
//!
//! ```no_run
#![doc = include_str!("../demos/naval_fate.rs")]
//! ```
//!
//! ```console
//! $ naval_fate ship Guardian move 100 150 --speed=15
//! --drifting false
//!     --help false
//!   --moored false
//!    --speed 15
//!  --version false
//!     <name> ["Guardian"]
//!        <x> 100
//!        <y> 150
//!       mine false
//!       move true
//!        new false
//!     remove false
//!        set false
//!       ship true
//!      shoot false
//!
//! $ naval_fate ship Guardian move 100
//! unknown argument: ship
//! unknown argument: Guardian
//! unknown argument: move
//! unknown argument: 100
//! Usage:
//!   naval_fate ship new <name>...
//!   <truncated>
//! ```
//!
//! # Doc String
//! The doc string must contain exactly one *usage section*, and may contain any number of *options sections*.
//! A section starts at the first line containing its (case insensitive) label, and continues through the indented lines that follow.
//!
//! ### Usage Section
//! The usage section is labeled `usage:`.
//! Every appearance of the program name (the first word after the label) starts a new alternative way to invoke the program.
//! Each alternative is a sequence of the following elements:
//! * `<argument>` or `ARGUMENT`: a positional argument.
//! * `command`: any other word, which must appear verbatim.
//! * `--long`, `--long=<value>`, `-s`, `-abc`: options.
//! * `( .. )`: a required group.
//! * `[ .. ]`: an optional group.
//! * `.. | ..`: mutually exclusive alternatives; the alternative that consumes the most tokens wins.
//! * `..`&nbsp;`...`: one or more repetitions of the preceding element.
//! * `[options]`: every option from the options sections that the usage does not otherwise mention.
//!
//! ### Options Sections
//! An options section is labeled `options:`.
//! Each option description starts (on a new line) with a dash, and lists the forms of the option followed by *two spaces* and its description:
//! ```text
//! Options:
//!   -h --help           Show this screen.
//!   -s KN, --speed=KN   Speed in knots [default: 10].
//! ```
//! An option takes a value when any of its forms names a value (ex: `KN` or `<kn>`).
//! The default for an option's value is declared with `[default: VALUE]`, anywhere in its description.
//!
//! # Cli Semantics
//! * Long options may be abbreviated to any unique prefix (ex: `--spe` for `--speed`).
//! * The value of a long option follows either as the next token or after `=` (ex: `--speed 10` or `--speed=10`).
//! * Short options may be stacked (ex: `-abc`), and the value of a short option may be attached (ex: `-s10`).
//! * Options may appear anywhere relative to arguments, unless [`CommandLineParser::options_first`] is configured.
//! * The token `--` ends option scanning; it and everything after it are arguments.
//! * `-h`/`--help` and `--version` (when configured via [`CommandLineParser::version`]) produce [`Outcome::Help`] and [`Outcome::Version`].
//!
//! ### Values
//! Every name in the usage section appears in the parsed [`ArgMap`], whether or not it was matched.
//!
//! ```console
//! Element                          | Repeatable | Value
//! --------------------------------------------------------------------------
//! command, option without value    | no         | Value::Switch(bool)
//! command, option without value    | yes        | Value::Counted(u64)
//! argument, option with value      | no         | Value::Plain(Option<String>)
//! argument, option with value      | yes        | Value::List(Vec<String>)
//! ```
//!
//! An element is repeatable when it may match more than once within a single alternative (ex: `-v...`, or `go go`).
//!
//! # Errors
//! * [`Error::Grammar`]: the doc string does not follow the convention; returned by [`CommandLineParser::build`].
//! * [`Error::User`]: the command line does not match the usage; returned by [`GeneralParser::parse_tokens`].
//!
//! # Features
//! * `unit_test`: For features that help with unit testing.
//! * `tracing_debug`: Emit `tracing` debug events while deriving the grammar and matching.
pub use docargs_engine::*;

use crate::constant::*;
use crate::error::Error;
use crate::model::Value;
use crate::parser::options::OptionTable;
use crate::pattern::Leaf;
use crate::tokens::TokenStream;

/// Parse a long option, from either the usage grammar or the argument vector:
/// ```ignore
/// --name
/// --name=value
/// --name value
/// ```
///
/// Prefix abbreviations (ex: `--verb` for `--verbose`) are only resolved for the argument vector.
/// An option not yet in the table is registered.
pub(crate) fn parse_long(
    tokens: &mut TokenStream,
    options: &mut OptionTable,
) -> Result<Vec<Leaf>, Error> {
    let Some(token) = tokens.advance() else {
        unreachable!("internal error - long option parsing requires a current token");
    };
    let (long, mut value) = match token.split_once('=') {
        Some((long, value)) => (long.to_string(), Some(value.to_string())),
        None => (token, None),
    };

    let mut similar: Vec<Leaf> = options.with_long(&long).into_iter().cloned().collect();

    if tokens.is_user() && similar.is_empty() {
        similar = options
            .with_long_prefix(&long)
            .into_iter()
            .cloned()
            .collect();
    }

    let option = match similar.as_slice() {
        [] => {
            let arg_count = usize::from(value.is_some());
            let option = Leaf::option(None, Some(long.clone()), arg_count, Value::Switch(false));
            options.register(option.clone());

            if tokens.is_user() {
                let value = match value {
                    Some(value) => Value::Plain(Some(value)),
                    None => Value::Switch(true),
                };
                Leaf::option(None, Some(long), arg_count, value)
            } else {
                option
            }
        }
        [declared] => {
            let name = declared.long().unwrap_or(long.as_str()).to_string();

            if declared.arg_count() == 0 {
                if value.is_some() {
                    return Err(tokens.error(format!("{name} must not have an argument")));
                }
            } else if value.is_none() {
                if tokens.current_is_any(true, &[END_OF_OPTIONS]) {
                    return Err(tokens.error(format!("{name} requires argument")));
                }

                value = tokens.advance();
            }

            let mut option = declared.clone();

            if tokens.is_user() {
                option.set_value(match value {
                    Some(value) => Value::Plain(Some(value)),
                    None => Value::Switch(true),
                });
            }

            option
        }
        _ => {
            let candidates: Vec<&str> = similar.iter().filter_map(Leaf::long).collect();
            return Err(tokens.error(format!(
                "{long} is not a unique prefix: {}?",
                candidates.join(", ")
            )));
        }
    };

    Ok(vec![option])
}

/// Parse a cluster of short options, from either the usage grammar or the argument vector:
/// ```ignore
/// -a
/// -abc
/// -ovalue
/// -o value
/// ```
///
/// The first letter to take an argument consumes the rest of the cluster, or the next token when the cluster is exhausted.
pub(crate) fn parse_shorts(
    tokens: &mut TokenStream,
    options: &mut OptionTable,
) -> Result<Vec<Leaf>, Error> {
    let Some(token) = tokens.advance() else {
        unreachable!("internal error - short option parsing requires a current token");
    };
    let mut left = token.trim_start_matches('-');
    let mut parsed = Vec::default();

    while let Some(letter) = left.chars().next() {
        let short = format!("-{letter}");
        left = &left[letter.len_utf8()..];
        let similar: Vec<Leaf> = options.with_short(&short).into_iter().cloned().collect();

        let option = match similar.as_slice() {
            [] => {
                let option = Leaf::option(Some(short.clone()), None, 0, Value::Switch(false));
                options.register(option.clone());

                if tokens.is_user() {
                    Leaf::option(Some(short), None, 0, Value::Switch(true))
                } else {
                    option
                }
            }
            [declared] => {
                let mut value = None;

                if declared.arg_count() > 0 {
                    if left.is_empty() {
                        if tokens.current_is_any(true, &[END_OF_OPTIONS]) {
                            return Err(tokens.error(format!("{short} requires argument")));
                        }

                        value = tokens.advance();
                    } else {
                        value.replace(left.to_string());
                        left = "";
                    }
                }

                let mut option = declared.clone();

                if tokens.is_user() {
                    option.set_value(match value {
                        Some(value) => Value::Plain(Some(value)),
                        None => Value::Switch(true),
                    });
                }

                option
            }
            _ => {
                return Err(tokens.error(format!(
                    "{short} is specified ambiguously {} times",
                    similar.len()
                )));
            }
        };

        parsed.push(option);
    }

    Ok(parsed)
}

enum Step {
    Long,
    Shorts,
    Argument,
    Remaining,
}

/// Classify the argument vector into option and (nameless) argument leaves.
///
/// ```ignore
/// default:       argv ::= [ long | shorts | argument ]* [ '--' [ argument ]* ] ;
/// options first: argv ::= [ long | shorts ]* [ argument ]* [ '--' [ argument ]* ] ;
/// ```
/// Everything from `--` onwards (`--` included) is taken as arguments.
pub(crate) fn parse_argv(
    mut tokens: TokenStream,
    options: &mut OptionTable,
    options_first: bool,
) -> Result<Vec<Leaf>, Error> {
    let mut parsed = Vec::default();

    loop {
        let step = match tokens.current() {
            None => break,
            Some(END_OF_OPTIONS) => Step::Remaining,
            Some(token) if token.starts_with("--") => Step::Long,
            Some(token) if token.starts_with('-') && token != "-" => Step::Shorts,
            Some(_) if options_first => Step::Remaining,
            Some(_) => Step::Argument,
        };

        match step {
            Step::Long => parsed.extend(parse_long(&mut tokens, options)?),
            Step::Shorts => parsed.extend(parse_shorts(&mut tokens, options)?),
            Step::Argument => {
                parsed.extend(tokens.advance().map(|token| Leaf::argument("", Some(token))))
            }
            Step::Remaining => {
                parsed.extend(
                    tokens
                        .drain()
                        .map(|token| Leaf::argument("", Some(token))),
                );
            }
        }
    }

    Ok(parsed)
}

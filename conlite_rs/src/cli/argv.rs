//! Process argument tokenizer.
//!
//! Classifies raw argv into the command name, positional arguments, long
//! options and short-option aliases. Classification happens before any
//! command is known, so a long option without `=` always takes the next
//! token as its value, even when that token looks like another option:
//! `--verbose --force` yields `verbose = "--force"`.

use std::collections::BTreeMap;

/// `--<word...>`
fn is_long_option(arg: &str) -> bool {
    arg.strip_prefix("--")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}

/// `-<letters...>` (but not `--`)
fn is_short_alias(arg: &str) -> bool {
    arg.strip_prefix('-')
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_alphabetic())
}

/// Whether `arg` is shaped like a long option or a short alias.
pub fn is_option_like(arg: &str) -> bool {
    is_long_option(arg) || is_short_alias(arg)
}

/// Text after `--name=` or `-x` in `token`.
fn attached_value<'a>(token: &'a str, value: &str) -> Option<&'a str> {
    if value.is_empty() {
        return None;
    }
    if value.starts_with("--") {
        token.strip_prefix(value)?.strip_prefix('=')
    } else {
        token.strip_prefix(value)
    }
}

/// Tokenized process arguments. Built once per invocation, read-only after.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedArgv {
    /// `argv[0]`, used in usage lines.
    pub filename: String,
    pub command_name: Option<String>,
    pub positional: Vec<String>,
    /// `--name` -> value; `None` when nothing followed the option.
    pub long_options: BTreeMap<String, Option<String>>,
    /// `-x` -> value; combined flags (`-abc`) map each letter to `None`.
    pub short_aliases: BTreeMap<char, Option<String>>,
    /// The raw tokens after `argv[0]`, for parameter lookups.
    pub tokens: Vec<String>,
}

impl ParsedArgv {
    /// Tokenize a full argv, program name first.
    pub fn parse<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut iter = argv.into_iter().map(Into::into);
        let filename = iter.next().unwrap_or_default();
        let tokens: Vec<String> = iter.collect();

        let mut parsed = ParsedArgv {
            filename,
            tokens: tokens.clone(),
            ..Default::default()
        };

        let mut rest = tokens.into_iter().peekable();
        if rest.peek().is_some_and(|first| !is_option_like(first)) {
            parsed.command_name = rest.next();
        }

        while let Some(arg) = rest.next() {
            if is_long_option(&arg) {
                let body = arg.trim_start_matches('-');
                let (name, value) = match body.split_once('=') {
                    Some((name, value)) => (name.to_string(), Some(value.to_string())),
                    None => (body.to_string(), rest.next()),
                };
                parsed.long_options.insert(name, value);
            } else if is_short_alias(&arg) {
                let body = arg.trim_start_matches('-');
                let (letters, inline_value) = match body.split_once('=') {
                    Some((letters, value)) => (letters, Some(value.to_string())),
                    None => (body, None),
                };
                let mut chars = letters.chars();
                match (chars.next(), chars.next()) {
                    (Some(alias), None) => {
                        let value = match inline_value {
                            Some(value) => Some(value),
                            None => rest.next(),
                        };
                        parsed.short_aliases.insert(alias, value);
                    }
                    _ => {
                        for alias in letters.chars() {
                            parsed.short_aliases.insert(alias, None);
                        }
                    }
                }
            } else {
                parsed.positional.push(arg);
            }
        }

        parsed
    }

    /// Tokenize `std::env::args()`.
    pub fn from_env() -> Self {
        Self::parse(std::env::args())
    }

    pub fn has_long(&self, name: &str) -> bool {
        self.long_options.contains_key(name)
    }

    pub fn has_alias(&self, alias: char) -> bool {
        self.short_aliases.contains_key(&alias)
    }

    /// Whether any of `values` (`--name`, `-x`) appears in the raw tokens,
    /// bare or with an attached value (`--name=v`, `-xv`). With
    /// `only_params`, scanning stops at `--`.
    pub fn has_parameter_option(&self, values: &[&str], only_params: bool) -> bool {
        for token in &self.tokens {
            if only_params && token == "--" {
                return false;
            }
            if values
                .iter()
                .any(|value| token == value || attached_value(token, value).is_some())
            {
                return true;
            }
        }
        false
    }

    /// Value given for the first of `values` found in the raw tokens.
    ///
    /// A bare `--name` takes the following token; `--name=v` and `-xv`
    /// carry their own. Returns `default` when nothing matches.
    pub fn parameter_option(
        &self,
        values: &[&str],
        default: Option<&str>,
        only_params: bool,
    ) -> Option<String> {
        let mut tokens = self.tokens.iter();
        while let Some(token) = tokens.next() {
            if only_params && token == "--" {
                break;
            }
            for value in values {
                if token == value {
                    return tokens.next().cloned();
                }
                if let Some(rest) = attached_value(token, value) {
                    return Some(rest.to_string());
                }
            }
        }
        default.map(str::to_string)
    }

    /// Basename of `argv[0]`.
    pub fn binary_name(&self) -> &str {
        std::path::Path::new(&self.filename)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.filename)
    }
}

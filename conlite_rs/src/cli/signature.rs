//! Signature DSL parser.
//!
//! A signature declares a command's name, positional arguments and options
//! in one string:
//!
//! ```text
//! copy {source::File to copy} {dest?} {files*} {--f|force::Overwrite} {--mode=fast}
//! ```
//!
//! - `{name}` required argument, `{name?}` optional, `{name=default}` optional
//!   with default, `{name*}` array capture, `::text` description.
//! - `{--name}` boolean flag, `{--x|name}` with a one-letter alias,
//!   `{--name=}` takes a value, `{--name=default}` takes a value with default.
//!
//! Tokens matching neither form are ignored.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ARGUMENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\{(?P<name>\w+)(?P<arr>\*)?(?:(?:=(?P<default>[^}]+))|(?P<optional>\?))?(?:::(?P<desc>[^}]+))?\}",
    )
    .expect("valid argument regex")
});

static OPTION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\{--(?:(?P<alias>[a-zA-Z])\|)?(?P<name>\w+)(?:(?P<valuable>=)(?P<default>[^}]+)?)?(?:::(?P<desc>[^}]+))?\}",
    )
    .expect("valid option regex")
});

static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[^}]*\}").expect("valid token regex"));

/// A declared positional argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgumentSpec {
    pub name: String,
    pub is_array: bool,
    /// Always true when `default` is set.
    pub is_optional: bool,
    pub default: Option<String>,
    pub description: String,
}

/// A declared option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: String,
    pub alias: Option<char>,
    /// Declared with `=`: resolves to a string instead of a bool.
    pub is_valuable: bool,
    pub default: Option<String>,
    pub description: String,
}

/// Parsed form of a signature string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub arguments: Vec<ArgumentSpec>,
    pub options: Vec<OptionSpec>,
}

/// Split a captured default on the first `::`.
///
/// The default pattern also swallows a trailing `::description`, so the
/// right-hand side, when present, replaces the separately captured text.
fn default_and_description(caps: &Captures<'_>) -> (Option<String>, String) {
    let raw_default = caps.name("default").map(|m| m.as_str()).unwrap_or("");
    let captured_desc = caps.name("desc").map(|m| m.as_str()).unwrap_or("");

    let (default, description) = match raw_default.split_once("::") {
        Some((default, desc)) => (default, desc),
        None => (raw_default, captured_desc),
    };

    let default = (!default.is_empty()).then(|| default.to_string());
    (default, description.trim().to_string())
}

fn parse_argument(caps: &Captures<'_>) -> ArgumentSpec {
    let (default, description) = default_and_description(caps);
    ArgumentSpec {
        name: caps["name"].to_string(),
        is_array: caps.name("arr").is_some(),
        is_optional: caps.name("optional").is_some() || default.is_some(),
        default,
        description,
    }
}

fn parse_option(caps: &Captures<'_>) -> OptionSpec {
    let (default, description) = default_and_description(caps);
    OptionSpec {
        name: caps["name"].to_string(),
        alias: caps
            .name("alias")
            .and_then(|m| m.as_str().chars().next()),
        is_valuable: caps.name("valuable").is_some(),
        default,
        description,
    }
}

/// Parse a signature string into its name, arguments and options.
///
/// Declaration order is preserved for both arguments and options.
pub fn parse_signature(signature: &str) -> Signature {
    let trimmed = signature.trim();
    let (name, rest) = match trimmed.split_once(' ') {
        Some((name, rest)) => (name.trim(), rest),
        None => (trimmed, ""),
    };

    let mut parsed = Signature {
        name: name.to_string(),
        ..Default::default()
    };

    for token in TOKEN_REGEX.find_iter(rest) {
        let token = token.as_str();
        if let Some(caps) = OPTION_REGEX.captures(token) {
            parsed.options.push(parse_option(&caps));
        } else if let Some(caps) = ARGUMENT_REGEX.captures(token) {
            parsed.arguments.push(parse_argument(&caps));
        } else if cfg!(debug_assertions) {
            tracing::warn!(signature = %trimmed, token, "ignoring malformed signature token");
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_only() {
        let sig = parse_signature("  about  ");
        assert_eq!(sig.name, "about");
        assert!(sig.arguments.is_empty());
        assert!(sig.options.is_empty());
    }

    #[test]
    fn test_default_implies_optional() {
        let sig = parse_signature("greet {name=World}");
        let arg = &sig.arguments[0];
        assert_eq!(arg.name, "name");
        assert!(arg.is_optional);
        assert_eq!(arg.default.as_deref(), Some("World"));
    }

    #[test]
    fn test_argument_forms() {
        let sig = parse_signature("copy {source::File to copy} {dest?} {files*}");
        assert_eq!(sig.name, "copy");
        let names: Vec<&str> = sig.arguments.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["source", "dest", "files"]);

        assert!(!sig.arguments[0].is_optional);
        assert_eq!(sig.arguments[0].description, "File to copy");
        assert!(sig.arguments[1].is_optional);
        assert_eq!(sig.arguments[1].default, None);
        assert!(sig.arguments[2].is_array);
        assert!(!sig.arguments[2].is_optional);
    }

    #[test]
    fn test_default_with_description_splits_on_first_separator() {
        let sig = parse_signature("serve {port=8080::Port to listen on}");
        let arg = &sig.arguments[0];
        assert_eq!(arg.default.as_deref(), Some("8080"));
        assert_eq!(arg.description, "Port to listen on");
    }

    #[test]
    fn test_option_forms() {
        let sig = parse_signature(
            "copy {source} {--f|force::Overwrite files} {--mode=fast} {--out=} {--n|name=::Target name}",
        );
        assert_eq!(sig.options.len(), 4);

        let force = &sig.options[0];
        assert_eq!(force.name, "force");
        assert_eq!(force.alias, Some('f'));
        assert!(!force.is_valuable);
        assert_eq!(force.description, "Overwrite files");

        let mode = &sig.options[1];
        assert!(mode.is_valuable);
        assert_eq!(mode.default.as_deref(), Some("fast"));
        assert_eq!(mode.alias, None);

        let out = &sig.options[2];
        assert!(out.is_valuable);
        assert_eq!(out.default, None);

        let name = &sig.options[3];
        assert_eq!(name.alias, Some('n'));
        assert!(name.is_valuable);
        assert_eq!(name.default, None);
        assert_eq!(name.description, "Target name");
    }

    #[test]
    fn test_declaration_order_across_mixed_tokens() {
        let sig = parse_signature("x {--b} {one} {--a} {two?}");
        let args: Vec<&str> = sig.arguments.iter().map(|a| a.name.as_str()).collect();
        let opts: Vec<&str> = sig.options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(args, vec!["one", "two"]);
        assert_eq!(opts, vec!["b", "a"]);
    }

    #[test]
    fn test_malformed_tokens_are_ignored() {
        let sig = parse_signature("x {bad-name} {--} {} {ok}");
        assert_eq!(sig.arguments.len(), 1);
        assert_eq!(sig.arguments[0].name, "ok");
        assert!(sig.options.is_empty());
    }
}

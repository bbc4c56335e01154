//! Binding of tokenized argv against a command's declared parameters.

use std::collections::{BTreeMap, VecDeque};

use super::argv::ParsedArgv;
use super::signature::{ArgumentSpec, OptionSpec};
use crate::error::ConsoleError;
use crate::types::{ArgValue, OptionValue};

/// Argument values in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoundArguments {
    values: Vec<(String, ArgValue)>,
}

impl BoundArguments {
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values
            .iter()
            .find(|(arg, _)| arg == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Positional call arguments for the handler.
    pub fn into_positional(self) -> Vec<ArgValue> {
        self.values.into_iter().map(|(_, value)| value).collect()
    }
}

/// Bind positional tokens to `specs`, front to back.
///
/// An array spec takes every remaining token; specs declared after it are
/// bound to `Null`. A required spec with nothing left fails with
/// [`ConsoleError::MissingArgument`].
pub fn resolve_arguments(
    specs: &[ArgumentSpec],
    argv: &ParsedArgv,
) -> Result<BoundArguments, ConsoleError> {
    let mut remaining: VecDeque<String> = argv.positional.iter().cloned().collect();
    let mut bound = BoundArguments::default();
    let mut captured_all = false;

    for spec in specs {
        if captured_all {
            bound.values.push((spec.name.clone(), ArgValue::Null));
            continue;
        }
        if !spec.is_optional && remaining.is_empty() {
            return Err(ConsoleError::MissingArgument(spec.name.clone()));
        }

        let value = if spec.is_array {
            captured_all = true;
            ArgValue::List(remaining.drain(..).collect())
        } else {
            match remaining.pop_front().or_else(|| spec.default.clone()) {
                Some(value) => ArgValue::Single(value),
                None => ArgValue::Null,
            }
        };
        bound.values.push((spec.name.clone(), value));
    }

    Ok(bound)
}

/// Final option values for one execution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedOptions {
    values: BTreeMap<String, OptionValue>,
}

impl ResolvedOptions {
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.values.get(name).is_some_and(OptionValue::is_set)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Merge argv options with declared `specs`.
///
/// Undeclared long options pass through as given (`Flag(true)` when no
/// value followed them). For a declared option the alias wins over the long
/// name; flags resolve to presence, valuable options to the raw value or
/// the default.
pub fn resolve_options(specs: &[OptionSpec], argv: &ParsedArgv) -> ResolvedOptions {
    let mut values: BTreeMap<String, OptionValue> = argv
        .long_options
        .iter()
        .map(|(name, value)| {
            let value = match value {
                Some(v) => OptionValue::Text(Some(v.clone())),
                None => OptionValue::Flag(true),
            };
            (name.clone(), value)
        })
        .collect();

    for spec in specs {
        let alias_value = spec.alias.and_then(|a| argv.short_aliases.get(&a));
        let long_value = argv.long_options.get(&spec.name);

        let value = if !spec.is_valuable {
            OptionValue::Flag(alias_value.is_some() || long_value.is_some())
        } else {
            let raw = match (alias_value, long_value) {
                (Some(v), _) => v.clone(),
                (None, Some(v)) => v.clone(),
                (None, None) => spec.default.clone(),
            };
            OptionValue::Text(raw)
        };
        values.insert(spec.name.clone(), value);
    }

    ResolvedOptions { values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::signature::parse_signature;

    fn bind(signature: &str, argv: &[&str]) -> (Result<BoundArguments, ConsoleError>, ResolvedOptions) {
        let sig = parse_signature(signature);
        let parsed = ParsedArgv::parse(argv.iter().copied());
        (
            resolve_arguments(&sig.arguments, &parsed),
            resolve_options(&sig.options, &parsed),
        )
    }

    #[test]
    fn test_copy_with_only_source() {
        let (args, opts) = bind("copy {source} {dest?} {--f|force}", &["prog", "copy", "a.txt"]);
        let args = args.unwrap();
        assert_eq!(args.get("source"), Some(&ArgValue::Single("a.txt".into())));
        assert_eq!(args.get("dest"), Some(&ArgValue::Null));
        assert_eq!(opts.get("force"), Some(&OptionValue::Flag(false)));
    }

    #[test]
    fn test_copy_with_dest_and_force() {
        let (args, opts) = bind(
            "copy {source} {dest?} {--f|force}",
            &["prog", "copy", "a.txt", "b.txt", "--force"],
        );
        let args = args.unwrap();
        assert_eq!(args.get("source"), Some(&ArgValue::Single("a.txt".into())));
        assert_eq!(args.get("dest"), Some(&ArgValue::Single("b.txt".into())));
        assert_eq!(opts.get("force"), Some(&OptionValue::Flag(true)));
    }

    #[test]
    fn test_flag_via_alias_ignores_captured_value() {
        // `-f` swallows the next token as its value; the flag is still just true.
        let (args, opts) = bind(
            "copy {source} {dest?} {--f|force}",
            &["prog", "copy", "-f", "a.txt"],
        );
        assert!(matches!(args, Err(ConsoleError::MissingArgument(name)) if name == "source"));
        assert_eq!(opts.get("force"), Some(&OptionValue::Flag(true)));
    }

    #[test]
    fn test_missing_required_argument() {
        let (args, _) = bind("copy {source} {dest?}", &["prog", "copy"]);
        assert!(matches!(args, Err(ConsoleError::MissingArgument(name)) if name == "source"));
    }

    #[test]
    fn test_defaults_fill_absent_arguments() {
        let (args, _) = bind("greet {name=World}", &["prog", "greet"]);
        assert_eq!(
            args.unwrap().into_positional(),
            vec![ArgValue::Single("World".into())]
        );
    }

    #[test]
    fn test_array_argument_captures_remaining() {
        let (args, _) = bind(
            "stub {kind} {names*}",
            &["prog", "stub", "model", "User", "Post", "Tag"],
        );
        let args = args.unwrap();
        assert_eq!(args.get("kind"), Some(&ArgValue::Single("model".into())));
        assert_eq!(
            args.get("names"),
            Some(&ArgValue::List(vec!["User".into(), "Post".into(), "Tag".into()]))
        );
    }

    #[test]
    fn test_required_array_needs_at_least_one_token() {
        let (args, _) = bind("stub {names*}", &["prog", "stub"]);
        assert!(matches!(args, Err(ConsoleError::MissingArgument(_))));
        let (args, _) = bind("stub {names*?}", &["prog", "stub"]);
        assert_eq!(args.unwrap().get("names"), Some(&ArgValue::List(vec![])));
    }

    #[test]
    fn test_specs_after_array_are_unbound() {
        let mut sig = parse_signature("x {rest*}");
        sig.arguments.push(ArgumentSpec {
            name: "late".into(),
            is_array: false,
            is_optional: false,
            default: None,
            description: String::new(),
        });
        let parsed = ParsedArgv::parse(["prog", "x", "a", "b"]);
        let args = resolve_arguments(&sig.arguments, &parsed).unwrap();
        assert_eq!(args.len(), 2);
        assert_eq!(args.get("late"), Some(&ArgValue::Null));
    }

    #[test]
    fn test_valuable_option_sources() {
        let sig = "deploy {--e|env=staging} {--region=}";
        let (_, opts) = bind(sig, &["prog", "deploy"]);
        assert_eq!(opts.get("env"), Some(&OptionValue::Text(Some("staging".into()))));
        assert_eq!(opts.get("region"), Some(&OptionValue::Text(None)));

        let (_, opts) = bind(sig, &["prog", "deploy", "--env=prod", "--region", "eu"]);
        assert_eq!(opts.get("env"), Some(&OptionValue::Text(Some("prod".into()))));
        assert_eq!(opts.get("region"), Some(&OptionValue::Text(Some("eu".into()))));

        // alias takes precedence over the long name
        let (_, opts) = bind(sig, &["prog", "deploy", "--env=prod", "-e", "dev"]);
        assert_eq!(opts.get("env"), Some(&OptionValue::Text(Some("dev".into()))));
    }

    #[test]
    fn test_undeclared_options_pass_through() {
        let (_, opts) = bind("run", &["prog", "run", "--extra=1", "--loud"]);
        assert_eq!(opts.get("extra"), Some(&OptionValue::Text(Some("1".into()))));
        assert_eq!(opts.get("loud"), Some(&OptionValue::Flag(true)));
        assert!(opts.is_set("loud"));
        assert!(!opts.is_set("quiet"));
    }
}

//! Command registry: exact lookup, substring search and suggestions.

use std::collections::BTreeMap;

use strsim::levenshtein;

use super::command::CommandDefinition;
use crate::error::ConsoleError;

#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, CommandDefinition>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `definition` under its name. A second registration of the same
    /// name replaces the first.
    pub fn register(&mut self, definition: CommandDefinition) -> Result<(), ConsoleError> {
        if definition.name.is_empty() {
            return Err(ConsoleError::InvalidCommand(format!(
                "{:?} must have a name defined in signature",
                definition.handler
            )));
        }

        let last = definition.arguments.len().saturating_sub(1);
        if let Some((idx, arg)) = definition
            .arguments
            .iter()
            .enumerate()
            .find(|(_, arg)| arg.is_array)
            && idx != last
        {
            return Err(ConsoleError::InvalidCommand(format!(
                "array argument '{}' of command '{}' must be declared last",
                arg.name, definition.name
            )));
        }

        let name = definition.name.clone();
        if self.commands.insert(name.clone(), definition).is_some() {
            tracing::debug!(command = %name, "replaced existing command");
        } else {
            tracing::debug!(command = %name, "registered command");
        }
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<&CommandDefinition, ConsoleError> {
        self.commands
            .get(name)
            .ok_or_else(|| ConsoleError::CommandNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Every command whose name contains `keyword` (case-sensitive).
    pub fn find_like(&self, keyword: &str) -> Vec<&CommandDefinition> {
        self.commands
            .iter()
            .filter(|(name, _)| name.contains(keyword))
            .map(|(_, def)| def)
            .collect()
    }

    /// All commands, sorted by name.
    pub fn all(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Closest command name by Levenshtein distance (at most 2).
    pub fn closest(&self, input: &str) -> Option<&str> {
        let input_lower = input.to_lowercase();
        let mut best_match: Option<(&str, usize)> = None;

        for name in self.commands.keys() {
            let distance = levenshtein(&input_lower, name);
            if distance > 2 {
                continue;
            }
            match best_match {
                Some((_, best_dist)) if distance >= best_dist => {}
                _ => best_match = Some((name, distance)),
            }
        }

        best_match.map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Application, ParsedArgv};
    use crate::output::{Output, OutputConfig};
    use std::cell::Cell;
    use std::rc::Rc;

    fn noop(signature: &str) -> CommandDefinition {
        CommandDefinition::inline(signature, "", |_, _| Ok(()))
    }

    fn registry_of(signatures: &[&str]) -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        for sig in signatures {
            registry.register(noop(sig)).unwrap();
        }
        registry
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = registry_of(&["copy {source}"]);
        let def = registry.lookup("copy").unwrap();
        assert_eq!(def.arguments[0].name, "source");
        assert!(matches!(
            registry.lookup("move"),
            Err(ConsoleError::CommandNotFound(name)) if name == "move"
        ));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut registry = CommandRegistry::new();
        let err = registry.register(noop("   ")).unwrap_err();
        assert!(matches!(err, ConsoleError::InvalidCommand(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_array_argument_must_be_last() {
        let mut registry = CommandRegistry::new();
        let err = registry.register(noop("bad {files*} {target}")).unwrap_err();
        assert!(err.to_string().contains("files"));
        assert!(registry.register(noop("good {target} {files*}")).is_ok());
    }

    #[test]
    fn test_reregistering_overwrites() {
        let ran = Rc::new(Cell::new(""));
        let mut registry = CommandRegistry::new();
        for label in ["first", "second"] {
            let ran = Rc::clone(&ran);
            registry
                .register(CommandDefinition::inline("copy", label, move |_, _| {
                    ran.set(label);
                    Ok(())
                }))
                .unwrap();
        }
        assert_eq!(registry.len(), 1);

        let copy = registry.lookup("copy").unwrap();
        assert_eq!(copy.description, "second");
        let mut ctx = Application::new("Tools", "1.0.0")
            .with_argv(ParsedArgv::parse(["prog"]))
            .with_output(Output::capture(OutputConfig::default()).0);
        copy.handler.invoke(&mut ctx, &[]).unwrap();
        assert_eq!(ran.get(), "second");
    }

    #[test]
    fn test_find_like_substring() {
        let registry = registry_of(&["list", "limit", "about"]);
        let names: Vec<&str> = registry
            .find_like("li")
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["limit", "list"]);
        assert!(registry.find_like("cpy").is_empty());
        assert!(registry.find_like("LI").is_empty());
    }

    #[test]
    fn test_find_like_treats_keyword_literally() {
        let registry = registry_of(&["make:stub", "makestub"]);
        let names: Vec<&str> = registry
            .find_like("e:s")
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["make:stub"]);
        assert!(registry.find_like(".*").is_empty());
    }

    #[test]
    fn test_all_is_sorted() {
        let registry = registry_of(&["zeta", "alpha", "mid"]);
        let names: Vec<&str> = registry.all().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_closest() {
        let registry = registry_of(&["copy", "list"]);
        assert_eq!(registry.closest("cpy"), Some("copy"));
        assert_eq!(registry.closest("lst"), Some("list"));
        assert_eq!(registry.closest("zzzzzz"), None);
    }
}

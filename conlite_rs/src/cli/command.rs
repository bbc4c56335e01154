//! Command definitions and the capability interface handlers run against.

use std::fmt;
use std::rc::Rc;

use super::argv::ParsedArgv;
use super::registry::CommandRegistry;
use super::signature::{ArgumentSpec, OptionSpec, Signature, parse_signature};
use crate::error::{ConsoleError, Site};
use crate::output::Output;
use crate::types::{ArgValue, OptionValue};

/// What a running handler can do: write output, read resolved options,
/// prompt the user and inspect the registry.
pub trait CommandContext {
    fn output(&mut self) -> &mut Output;

    /// Truthy check: set flags and non-empty valued options.
    fn has_option(&self, name: &str) -> bool;

    /// Resolved value of `name`, declared or passed through from argv.
    fn option(&self, name: &str) -> Option<&OptionValue>;

    fn option_str(&self, name: &str) -> Option<&str> {
        self.option(name).and_then(OptionValue::as_str)
    }

    /// [`has_option`](Self::has_option) that rejects one-character names.
    fn check_option(&self, name: &str) -> Result<bool, ConsoleError> {
        if name.chars().count() <= 1 {
            return Err(ConsoleError::InvalidOption(name.to_string()));
        }
        Ok(self.has_option(name))
    }

    /// Whether short alias `x` (or `-x`) was passed.
    fn has_alias(&self, alias: &str) -> Result<bool, ConsoleError> {
        let key = alias.trim_start_matches('-');
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(self.argv().has_alias(c)),
            _ => Err(ConsoleError::InvalidAlias(alias.to_string())),
        }
    }

    /// Tokenized process arguments, for raw lookups.
    fn argv(&self) -> &ParsedArgv;

    /// Yes/no question; an empty answer picks `default`.
    fn confirm(&mut self, question: &str, default: bool) -> anyhow::Result<bool>;

    fn ask(&mut self, question: &str, default: Option<&str>) -> anyhow::Result<String>;

    fn registry(&self) -> &CommandRegistry;

    /// Basename of the running binary.
    fn filename(&self) -> &str {
        self.argv().binary_name()
    }

    fn app_name(&self) -> &str;

    fn version(&self) -> &str;

    fn is_verbose(&self) -> bool;
}

/// A command implemented as a type.
pub trait Command {
    fn signature(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Run with one bound value per declared argument, in declaration order.
    fn handle(&self, ctx: &mut dyn CommandContext, args: &[ArgValue]) -> anyhow::Result<()>;
}

pub type InlineFn = dyn Fn(&mut dyn CommandContext, &[ArgValue]) -> anyhow::Result<()>;

/// How a definition is invoked.
#[derive(Clone)]
pub enum HandlerRef {
    Named(Rc<dyn Command>),
    Inline(Rc<InlineFn>),
}

impl HandlerRef {
    pub fn invoke(&self, ctx: &mut dyn CommandContext, args: &[ArgValue]) -> anyhow::Result<()> {
        match self {
            HandlerRef::Named(command) => command.handle(ctx, args),
            HandlerRef::Inline(func) => func(ctx, args),
        }
    }
}

impl fmt::Debug for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerRef::Named(command) => write!(f, "Named({})", command.signature()),
            HandlerRef::Inline(_) => write!(f, "Inline(..)"),
        }
    }
}

/// A registered command: parsed signature plus handler.
#[derive(Clone, Debug)]
pub struct CommandDefinition {
    pub name: String,
    pub description: String,
    pub handler: HandlerRef,
    pub arguments: Vec<ArgumentSpec>,
    pub options: Vec<OptionSpec>,
    /// Where the command was declared.
    pub site: Site,
}

impl CommandDefinition {
    #[track_caller]
    pub fn from_signature(signature: &str, description: &str, handler: HandlerRef) -> Self {
        let Signature {
            name,
            arguments,
            options,
        } = parse_signature(signature);
        Self {
            name,
            description: description.to_string(),
            handler,
            arguments,
            options,
            site: Site::caller(),
        }
    }

    #[track_caller]
    pub fn from_command<C: Command + 'static>(command: C) -> Self {
        let command: Rc<dyn Command> = Rc::new(command);
        let signature = command.signature().to_string();
        let description = command.description().to_string();
        Self::from_signature(&signature, &description, HandlerRef::Named(command))
    }

    #[track_caller]
    pub fn inline<F>(signature: &str, description: &str, handler: F) -> Self
    where
        F: Fn(&mut dyn CommandContext, &[ArgValue]) -> anyhow::Result<()> + 'static,
    {
        Self::from_signature(signature, description, HandlerRef::Inline(Rc::new(handler)))
    }

    /// `ns` part of an `ns:name` command, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.name.rsplit_once(':').map(|(ns, _)| ns)
    }
}

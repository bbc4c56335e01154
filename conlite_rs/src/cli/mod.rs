//! Command registration and dispatch.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        argv (process)                        │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                ▼
//!        argv::ParsedArgv  (command name, positionals, options)
//!                                │
//!                                ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │ app::Application::execute                                    │
//! │   registry::CommandRegistry::lookup ──► miss: suggest/list   │
//! │   resolve::resolve_arguments / resolve_options               │
//! │   command::HandlerRef::invoke(&mut dyn CommandContext, args) │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                ▼
//!          report::report_error  (ConsoleError only)
//! ```
//!
//! # Module Structure
//!
//! - [`signature`] - signature DSL parser (`copy {source} {--f|force}`)
//! - [`argv`] - process argument tokenizer
//! - [`command`] - command definitions, handler kinds, `CommandContext`
//! - [`registry`] - name-keyed command store
//! - [`resolve`] - argument and option binding
//! - [`help`] - per-command help screen
//! - [`report`] - error report rendering
//! - [`app`] - the dispatcher

pub mod app;
pub mod argv;
pub mod command;
pub mod help;
pub mod registry;
pub mod report;
pub mod resolve;
pub mod signature;

pub use app::Application;
pub use argv::ParsedArgv;
pub use command::{Command, CommandContext, CommandDefinition, HandlerRef};
pub use registry::CommandRegistry;
pub use resolve::{BoundArguments, ResolvedOptions, resolve_arguments, resolve_options};
pub use signature::{ArgumentSpec, OptionSpec, Signature, parse_signature};

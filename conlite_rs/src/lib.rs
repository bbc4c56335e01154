//! # conlite
//!
//! **Lightweight command-line application toolkit** - declare commands with a
//! one-line signature, dispatch process arguments to them, and write styled
//! terminal output.
//!
//! ## Features
//!
//! - **Signature DSL** - `copy {source} {dest?} {files*} {--f|force} {--mode=fast}`
//! - **Dispatch** - default command, `--help` screens, "did you mean" suggestions
//! - **Option queries** - declared and pass-through options, short aliases, raw lookups
//! - **Styled output** - colors, blocks, word-wrapped columns, progress bars
//! - **Error report** - application errors are rendered, foreign errors propagate
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use conlite::cli::Application;
//!
//! let mut app = Application::new("Tools", "1.0.0");
//! app.command("greet {name=World}", "Say hello", |ctx, args| {
//!     let name = args[0].as_str().unwrap_or("World");
//!     ctx.output().success(&format!("Hello, {}!", name));
//!     Ok(())
//! })?;
//! app.run()?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! conlite                     # list commands
//! conlite copy a.txt --force  # run a command
//! conlite copy --help         # help for one command
//! conlite cpy                 # unknown: suggestions
//! ```

// ============================================================================
// Dispatch
// ============================================================================

/// Signature parsing, argv tokenizing, registry, resolvers and the dispatcher.
///
/// Start with [`Application`](cli::Application).
pub mod cli;
/// Builtin `list` and `about` commands.
pub mod commands;

// ============================================================================
// Terminal Services
// ============================================================================

/// ANSI styles and the [`Painter`](colors::Painter) that owns styling state.
pub mod colors;
/// Word wrapping, columns, tables and human-readable sizes.
pub mod format;
/// The styled output writer.
pub mod output;
/// Progress bars, spinners and countdowns.
pub mod progress;
/// Interactive line input.
pub mod prompt;

// ============================================================================
// Shared
// ============================================================================

/// Application configuration (TOML file + environment).
pub mod config;
pub mod error;
pub mod types;

pub use cli::{Application, Command, CommandContext, CommandDefinition, ParsedArgv};
pub use config::AppConfig;
pub use error::ConsoleError;
pub use output::{Output, OutputConfig};
pub use types::{ArgValue, ColorMode, OptionValue};

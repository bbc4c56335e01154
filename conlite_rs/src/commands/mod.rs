//! Builtin commands registered by every [`Application`](crate::cli::Application).

pub mod about;
pub mod list;

pub use about::AboutCommand;
pub use list::ListCommand;

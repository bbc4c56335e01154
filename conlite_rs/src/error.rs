//! Error types for conlite.

use std::fmt;
use std::panic::Location;

use thiserror::Error;

/// The application's own error kinds.
///
/// The dispatcher intercepts any handler error that downcasts to this type and
/// routes it to the error report; every other error propagates to the caller.
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// A command definition was rejected at registration time.
    #[error("Invalid command definition: {0}")]
    InvalidCommand(String),

    /// Registry lookup failed.
    #[error("The command \"{0}\" does not exist.")]
    CommandNotFound(String),

    /// A required positional argument was not supplied.
    #[error("Argument {0} is required")]
    MissingArgument(String),

    /// A removed option or flag was used.
    #[error("Using '{old}' is deprecated since last released version, use '{replacement}' instead.")]
    Deprecated {
        /// The removed spelling.
        old: String,
        /// What to use instead.
        replacement: String,
    },

    /// Option names must be longer than one character.
    #[error("\"{0}\" is not a valid option.")]
    InvalidOption(String),

    /// Short options must be exactly one character.
    #[error("Short options should be exactly one ASCII character, got \"{0}\"")]
    InvalidAlias(String),

    /// Unknown style or theme name.
    #[error("Invalid style type \"{0}\", this should either be a color or an option like \"bold\" or \"italic\"")]
    InvalidStyle(String),

    /// Column layout cannot be satisfied.
    #[error("{0}")]
    Layout(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConsoleError {
    /// Label shown in the error report headline.
    pub fn kind_label(&self) -> &'static str {
        match self {
            ConsoleError::Deprecated { .. } => "DeprecatedException",
            ConsoleError::InvalidCommand(_)
            | ConsoleError::CommandNotFound(_)
            | ConsoleError::InvalidAlias(_)
            | ConsoleError::InvalidStyle(_)
            | ConsoleError::Layout(_) => "Logical/ExpectedException",
            ConsoleError::MissingArgument(_)
            | ConsoleError::InvalidOption(_)
            | ConsoleError::Io(_) => "ApplicationException",
        }
    }

    pub fn deprecated(old: impl Into<String>, replacement: impl Into<String>) -> Self {
        ConsoleError::Deprecated {
            old: old.into(),
            replacement: replacement.into(),
        }
    }

    /// Tag this error with the position of the caller.
    #[track_caller]
    pub fn raise(self) -> Raised {
        Raised {
            error: self,
            site: Site::caller(),
        }
    }
}

/// A position in a source file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Site {
    pub file: &'static str,
    pub line: u32,
}

impl Site {
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A [`ConsoleError`] together with the [`Site`] that raised it.
///
/// Displays as the inner error, so reports and cause chains read the same
/// whether or not a site was recorded.
#[derive(Debug)]
pub struct Raised {
    pub error: ConsoleError,
    pub site: Site,
}

impl fmt::Display for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl std::error::Error for Raised {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.error)
    }
}

/// `.raised()` on results whose error converts into [`ConsoleError`].
pub trait RaiseExt<T> {
    fn raised(self) -> std::result::Result<T, Raised>;
}

impl<T, E: Into<ConsoleError>> RaiseExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn raised(self) -> std::result::Result<T, Raised> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(err.into().raise()),
        }
    }
}

/// The [`ConsoleError`] inside `err`, with or without a recorded site.
pub fn console_error(err: &anyhow::Error) -> Option<&ConsoleError> {
    err.downcast_ref::<ConsoleError>()
        .or_else(|| err.downcast_ref::<Raised>().map(|raised| &raised.error))
}

/// Where `err` was raised, when it carries a [`Site`].
pub fn raised_at(err: &anyhow::Error) -> Option<Site> {
    err.downcast_ref::<Raised>().map(|raised| raised.site)
}

/// Result type alias using [`ConsoleError`].
pub type Result<T> = std::result::Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deprecated_message() {
        let err = ConsoleError::deprecated("--loglevel", "--debug or -v");
        assert_eq!(
            err.to_string(),
            "Using '--loglevel' is deprecated since last released version, use '--debug or -v' instead."
        );
        assert_eq!(err.kind_label(), "DeprecatedException");
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(
            ConsoleError::CommandNotFound("x".into()).kind_label(),
            "Logical/ExpectedException"
        );
        assert_eq!(
            ConsoleError::MissingArgument("source".into()).kind_label(),
            "ApplicationException"
        );
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = ConsoleError::MissingArgument("source".into()).into();
        assert!(matches!(
            err.downcast_ref::<ConsoleError>(),
            Some(ConsoleError::MissingArgument(name)) if name == "source"
        ));
    }

    #[test]
    fn test_raise_records_caller() {
        let line = line!() + 1;
        let raised = ConsoleError::Layout("bad layout".into()).raise();
        assert_eq!(raised.site.file, file!());
        assert_eq!(raised.site.line, line);
        assert_eq!(raised.to_string(), "bad layout");
    }

    #[test]
    fn test_raised_result_keeps_kind() {
        let line = line!() + 1;
        let result = Err::<(), _>(std::io::Error::other("gone")).raised();
        let err = anyhow::Error::from(result.unwrap_err());

        assert!(matches!(console_error(&err), Some(ConsoleError::Io(_))));
        assert_eq!(raised_at(&err).map(|site| site.line), Some(line));
        assert_eq!(err.chain().nth(1).map(ToString::to_string), Some("gone".to_string()));
    }
}

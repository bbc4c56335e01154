use std::fmt;

use serde::Deserialize;

/// Default width used when the terminal size cannot be queried.
pub const DEFAULT_WIDTH: usize = 80;

/// Name of the command executed when argv carries no command name.
pub const DEFAULT_COMMAND: &str = "list";

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Parse color mode from string value.
pub fn parse_color_mode(value: &str) -> Result<ColorMode, String> {
    match value.to_lowercase().as_str() {
        "auto" => Ok(ColorMode::Auto),
        "always" | "yes" | "true" => Ok(ColorMode::Always),
        "never" | "no" | "false" => Ok(ColorMode::Never),
        _ => Err(format!(
            "Invalid color mode '{}'. Use: auto, always, or never.",
            value
        )),
    }
}

/// A value bound to a declared positional argument.
///
/// Handlers receive one `ArgValue` per declared argument, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ArgValue {
    /// Optional argument that was not given and has no default.
    #[default]
    Null,
    Single(String),
    /// Array-capture argument: every remaining positional token.
    List(Vec<String>),
}

impl ArgValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Single(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> &[String] {
        match self {
            ArgValue::List(items) => items,
            _ => &[],
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ArgValue::Null)
    }
}

/// Final value of an option after resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionValue {
    /// Boolean flag (options declared without `=`).
    Flag(bool),
    /// Valuable option; `None` when neither given nor defaulted.
    Text(Option<String>),
}

impl OptionValue {
    /// Truthiness used by `has_option`: set flags and non-empty values.
    pub fn is_set(&self) -> bool {
        match self {
            OptionValue::Flag(b) => *b,
            OptionValue::Text(v) => v.as_deref().is_some_and(|s| !s.is_empty()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Text(v) => v.as_deref(),
            OptionValue::Flag(_) => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Flag(b) => write!(f, "{}", b),
            OptionValue::Text(Some(v)) => write!(f, "{}", v),
            OptionValue::Text(None) => write!(f, "null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_mode() {
        assert!(matches!(parse_color_mode("auto"), Ok(ColorMode::Auto)));
        assert!(matches!(parse_color_mode("ALWAYS"), Ok(ColorMode::Always)));
        assert!(matches!(parse_color_mode("no"), Ok(ColorMode::Never)));
        assert!(parse_color_mode("sometimes").is_err());
    }

    #[test]
    fn test_option_value_truthiness() {
        assert!(OptionValue::Flag(true).is_set());
        assert!(!OptionValue::Flag(false).is_set());
        assert!(OptionValue::Text(Some("x".into())).is_set());
        assert!(!OptionValue::Text(Some(String::new())).is_set());
        assert!(!OptionValue::Text(None).is_set());
    }

    #[test]
    fn test_arg_value_accessors() {
        assert_eq!(ArgValue::Single("a".into()).as_str(), Some("a"));
        assert!(ArgValue::Null.is_null());
        let list = ArgValue::List(vec!["a".into(), "b".into()]);
        assert_eq!(list.as_list().len(), 2);
        assert_eq!(list.as_str(), None);
    }
}

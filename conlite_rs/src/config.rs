//! Application configuration.
//!
//! Built in code by the embedding binary, optionally read from a TOML file
//! and overridden from the environment (`NO_COLOR`, `CONLITE_COLOR`).

use serde::Deserialize;
use std::path::Path;

use crate::types::{ColorMode, DEFAULT_COMMAND, parse_color_mode};

pub const DEFAULT_TITLE: &str = "conlite Application - Version";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Shown in the banner and the `about` table.
    pub title: String,
    pub version: String,
    /// Executed when argv has no command name.
    pub default_command: String,
    pub color: ColorMode,
    /// Print the title/version banner before dispatching.
    pub show_banner: bool,
    /// Overrides the detected terminal width.
    pub max_width: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            default_command: DEFAULT_COMMAND.to_string(),
            color: ColorMode::Auto,
            show_banner: true,
            max_width: None,
        }
    }
}

impl AppConfig {
    pub fn new(title: &str, version: &str) -> Self {
        Self {
            title: title.to_string(),
            version: version.to_string(),
            ..Default::default()
        }
    }

    /// Load config from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to parse config");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read config");
                Self::default()
            }
        }
    }

    /// Apply `NO_COLOR` and `CONLITE_COLOR` overrides.
    pub fn apply_env(mut self) -> Self {
        if let Ok(value) = std::env::var("CONLITE_COLOR") {
            match parse_color_mode(&value) {
                Ok(mode) => self.color = mode,
                Err(e) => tracing::warn!(error = %e, "ignoring CONLITE_COLOR"),
            }
        }
        if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            self.color = ColorMode::Never;
        }
        self
    }
}

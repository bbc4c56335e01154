//! Terminal color utilities for CLI output.
//!
//! Provides the style palette and the [`Painter`] that every write goes
//! through. Styling state lives in the painter instance, never in a global.

use std::collections::HashMap;
use std::io::IsTerminal;
use std::str::FromStr;

use crate::error::ConsoleError;
use crate::types::ColorMode;

pub const RESET: &str = "\x1b[0m";

/// A single SGR style: text attribute, foreground or background color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    Bold,
    Dark,
    Italic,
    Underline,
    Blink,
    Reverse,
    Concealed,
    /// Foreground color by SGR code (30-39, 90-97).
    Fg(u8),
    /// Background color by SGR code (40-49, 100-107).
    Bg(u8),
    Fg256(u8),
    Bg256(u8),
}

const NAMED_STYLES: &[(&str, Style)] = &[
    ("bold", Style::Bold),
    ("dark", Style::Dark),
    ("italic", Style::Italic),
    ("underline", Style::Underline),
    ("blink", Style::Blink),
    ("reverse", Style::Reverse),
    ("concealed", Style::Concealed),
    ("default", Style::Fg(39)),
    ("black", Style::Fg(30)),
    ("red", Style::Fg(31)),
    ("green", Style::Fg(32)),
    ("yellow", Style::Fg(33)),
    ("blue", Style::Fg(34)),
    ("magenta", Style::Fg(35)),
    ("purple", Style::Fg(35)),
    ("cyan", Style::Fg(36)),
    ("light_gray", Style::Fg(37)),
    ("dark_gray", Style::Fg(90)),
    ("light_red", Style::Fg(91)),
    ("light_green", Style::Fg(92)),
    ("light_yellow", Style::Fg(93)),
    ("light_blue", Style::Fg(94)),
    ("light_magenta", Style::Fg(95)),
    ("light_cyan", Style::Fg(96)),
    ("white", Style::Fg(97)),
    ("bg_default", Style::Bg(49)),
    ("bg_black", Style::Bg(40)),
    ("bg_red", Style::Bg(41)),
    ("bg_green", Style::Bg(42)),
    ("bg_yellow", Style::Bg(43)),
    ("bg_blue", Style::Bg(44)),
    ("bg_magenta", Style::Bg(45)),
    ("bg_cyan", Style::Bg(46)),
    ("bg_light_gray", Style::Bg(47)),
    ("bg_dark_gray", Style::Bg(100)),
    ("bg_light_red", Style::Bg(101)),
    ("bg_light_green", Style::Bg(102)),
    ("bg_light_yellow", Style::Bg(103)),
    ("bg_light_blue", Style::Bg(104)),
    ("bg_light_magenta", Style::Bg(105)),
    ("bg_light_cyan", Style::Bg(106)),
    ("bg_white", Style::Bg(107)),
];

// Shorthands used throughout the crate.
pub const GREEN: Style = Style::Fg(32);
pub const YELLOW: Style = Style::Fg(33);
pub const PURPLE: Style = Style::Fg(35);
pub const CYAN: Style = Style::Fg(36);
pub const DARK_GRAY: Style = Style::Fg(90);
pub const LIGHT_RED: Style = Style::Fg(91);
pub const LIGHT_YELLOW: Style = Style::Fg(93);
pub const LIGHT_CYAN: Style = Style::Fg(96);
pub const WHITE: Style = Style::Fg(97);
pub const BG_RED: Style = Style::Bg(41);
pub const BG_GREEN: Style = Style::Bg(42);
pub const BG_BLUE: Style = Style::Bg(44);
pub const BG_MAGENTA: Style = Style::Bg(45);

impl Style {
    fn sequence(self) -> String {
        match self {
            Style::Bold => "1".into(),
            Style::Dark => "2".into(),
            Style::Italic => "3".into(),
            Style::Underline => "4".into(),
            Style::Blink => "5".into(),
            Style::Reverse => "7".into(),
            Style::Concealed => "8".into(),
            Style::Fg(code) | Style::Bg(code) => code.to_string(),
            Style::Fg256(n) => format!("38;5;{n}"),
            Style::Bg256(n) => format!("48;5;{n}"),
        }
    }

    /// Every style name accepted by [`Style::from_str`], except `color_N`.
    pub fn names() -> impl Iterator<Item = &'static str> {
        NAMED_STYLES.iter().map(|(name, _)| *name)
    }
}

impl FromStr for Style {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((_, style)) = NAMED_STYLES.iter().find(|(name, _)| *name == s) {
            return Ok(*style);
        }
        let (background, rest) = match s.strip_prefix("bg_") {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        rest.strip_prefix("color_")
            .and_then(|n| n.parse::<u8>().ok())
            .map(|n| {
                if background {
                    Style::Bg256(n)
                } else {
                    Style::Fg256(n)
                }
            })
            .ok_or_else(|| ConsoleError::InvalidStyle(s.to_string()))
    }
}

/// Parse a list of style names, failing on the first unknown one.
pub fn parse_styles(names: &[&str]) -> Result<Vec<Style>, ConsoleError> {
    names.iter().map(|n| n.parse()).collect()
}

/// Determines if colors should be used based on ColorMode and terminal detection.
pub fn is_enabled(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    }
}

/// Colorizer that owns the styling-enabled state.
///
/// `enabled` follows terminal support and the `--ansi`/`--no-ansi` flags;
/// `forced` (from `--ansi`) keeps styling on even when output is not a tty.
#[derive(Clone, Debug, Default)]
pub struct Painter {
    enabled: bool,
    forced: bool,
    themes: HashMap<String, Vec<Style>>,
}

impl Painter {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            enabled: is_enabled(mode),
            forced: false,
            themes: HashMap::new(),
        }
    }

    /// Whether writes are styled right now.
    pub fn enabled(&self) -> bool {
        self.enabled || self.forced
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
        self.forced = false;
    }

    pub fn set_forced(&mut self, forced: bool) {
        self.forced = forced;
    }

    pub fn is_forced(&self) -> bool {
        self.forced
    }

    /// Wrap `text` in one combined SGR sequence.
    pub fn apply(&self, styles: &[Style], text: &str) -> String {
        if !self.enabled() || styles.is_empty() {
            return text.to_string();
        }
        let codes: Vec<String> = styles.iter().map(|s| s.sequence()).collect();
        format!("\x1b[{}m{}{}", codes.join(";"), text, RESET)
    }

    pub fn paint(&self, style: Style, text: &str) -> String {
        self.apply(&[style], text)
    }

    // === Themes ===

    pub fn add_theme(&mut self, name: &str, styles: Vec<Style>) {
        self.themes.insert(name.to_string(), styles);
    }

    pub fn has_theme(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    pub fn remove_theme(&mut self, name: &str) {
        self.themes.remove(name);
    }

    pub fn apply_theme(&self, name: &str, text: &str) -> Result<String, ConsoleError> {
        let styles = self
            .themes
            .get(name)
            .ok_or_else(|| ConsoleError::InvalidStyle(name.to_string()))?;
        Ok(self.apply(styles, text))
    }

    // === Semantic colors ===

    /// Command and option names - GREEN
    pub fn name(&self, s: &str) -> String {
        self.paint(GREEN, s)
    }

    /// Section headers - PURPLE
    pub fn header(&self, s: &str) -> String {
        self.paint(PURPLE, s)
    }

    /// Secondary info, file/line hints - DARK_GRAY
    pub fn dim(&self, s: &str) -> String {
        self.paint(DARK_GRAY, s)
    }

    /// Error text - LIGHT_RED
    pub fn error(&self, s: &str) -> String {
        self.paint(LIGHT_RED, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painter(enabled: bool) -> Painter {
        Painter {
            enabled,
            ..Default::default()
        }
    }

    #[test]
    fn test_painter_disabled() {
        let p = painter(false);
        assert_eq!(p.name("test"), "test");
        assert_eq!(p.apply(&[Style::Bold, GREEN], "test"), "test");
    }

    #[test]
    fn test_painter_enabled_combines_sequences() {
        let p = painter(true);
        assert_eq!(p.name("test"), "\x1b[32mtest\x1b[0m");
        assert_eq!(
            p.apply(&[WHITE, BG_RED, Style::Bold], "x"),
            "\x1b[97;41;1mx\x1b[0m"
        );
    }

    #[test]
    fn test_forced_survives_disabled_terminal() {
        let mut p = painter(false);
        p.set_forced(true);
        assert!(p.enabled());
        assert_eq!(p.dim("a"), "\x1b[90ma\x1b[0m");
        p.disable();
        assert!(!p.enabled());
    }

    #[test]
    fn test_style_from_name() {
        assert_eq!("purple".parse::<Style>().unwrap(), Style::Fg(35));
        assert_eq!("bg_light_red".parse::<Style>().unwrap(), Style::Bg(101));
        assert_eq!("color_208".parse::<Style>().unwrap(), Style::Fg256(208));
        assert_eq!("bg_color_17".parse::<Style>().unwrap(), Style::Bg256(17));
        assert!(matches!(
            "sparkly".parse::<Style>(),
            Err(ConsoleError::InvalidStyle(name)) if name == "sparkly"
        ));
        assert!("color_300".parse::<Style>().is_err());
    }

    #[test]
    fn test_themes() {
        let mut p = painter(true);
        p.add_theme("alert", parse_styles(&["white", "bg_red"]).unwrap());
        assert!(p.has_theme("alert"));
        assert_eq!(p.apply_theme("alert", "!").unwrap(), "\x1b[97;41m!\x1b[0m");
        p.remove_theme("alert");
        assert!(p.apply_theme("alert", "!").is_err());
    }

    #[test]
    fn test_color_mode_detection() {
        assert!(is_enabled(ColorMode::Always));
        assert!(!is_enabled(ColorMode::Never));
        // Auto depends on terminal, can't reliably test
    }
}

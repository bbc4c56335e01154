//! Styled output writer.
//!
//! Every user-facing line goes through [`Output`], which owns the writer and
//! the [`OutputConfig`] (styling state, verbosity, width). Commands reach it
//! through their `CommandContext`; nothing here is process-global.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use crate::colors::{
    BG_GREEN, BG_RED, CYAN, DARK_GRAY, GREEN, LIGHT_RED, LIGHT_YELLOW, Painter, Style, WHITE,
    YELLOW,
};
use crate::format::{self, text_width};
use crate::progress;
use crate::types::{ColorMode, DEFAULT_WIDTH};

/// Width of the terminal attached to stdout, or [`DEFAULT_WIDTH`].
pub fn terminal_width() -> usize {
    console::Term::stdout()
        .size_checked()
        .map(|(_, cols)| cols as usize)
        .filter(|cols| *cols > 0)
        .unwrap_or(DEFAULT_WIDTH)
}

/// Shared styling and verbosity state for one application run.
#[derive(Clone, Debug)]
pub struct OutputConfig {
    pub painter: Painter,
    /// Enables the debug channel (`--debug` / `-v`).
    pub verbose: bool,
    pub max_width: usize,
}

impl OutputConfig {
    pub fn new(color: ColorMode) -> Self {
        Self {
            painter: Painter::new(color),
            verbose: false,
            max_width: terminal_width(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            painter: Painter::default(),
            verbose: false,
            max_width: DEFAULT_WIDTH,
        }
    }
}

/// In-memory sink returned by [`Output::capture`].
#[derive(Clone, Default)]
pub struct Captured(Rc<RefCell<Vec<u8>>>);

impl Captured {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub struct Output {
    writer: Box<dyn Write>,
    config: OutputConfig,
}

impl Output {
    pub fn new(writer: Box<dyn Write>, config: OutputConfig) -> Self {
        Self { writer, config }
    }

    pub fn stdout(config: OutputConfig) -> Self {
        Self::new(Box::new(io::stdout()), config)
    }

    /// Output writing into memory, plus a handle to read what was written.
    pub fn capture(config: OutputConfig) -> (Self, Captured) {
        let captured = Captured::default();
        (Self::new(Box::new(captured.clone()), config), captured)
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut OutputConfig {
        &mut self.config
    }

    pub fn painter(&self) -> &Painter {
        &self.config.painter
    }

    pub fn painter_mut(&mut self) -> &mut Painter {
        &mut self.config.painter
    }

    pub fn is_verbose(&self) -> bool {
        self.config.verbose
    }

    pub fn width(&self) -> usize {
        self.config.max_width
    }

    pub fn style(&self, text: &str, styles: &[Style]) -> String {
        self.config.painter.apply(styles, text)
    }

    fn emit(&mut self, text: &str) {
        if let Err(err) = self.writer.write_all(text.as_bytes()) {
            tracing::debug!(error = %err, "output write failed");
        }
    }

    pub fn flush(&mut self) {
        if let Err(err) = self.writer.flush() {
            tracing::debug!(error = %err, "output flush failed");
        }
    }

    // === Plain writes ===

    pub fn write(&mut self, text: &str) {
        self.emit(text);
    }

    pub fn writeln(&mut self, text: &str) {
        self.emit(text);
        self.emit("\n");
    }

    pub fn write_styled(&mut self, text: &str, styles: &[Style]) {
        let styled = self.style(text, styles);
        self.emit(&styled);
    }

    pub fn writeln_styled(&mut self, text: &str, styles: &[Style]) {
        self.write_styled(text, styles);
        self.emit("\n");
    }

    pub fn new_line(&mut self, count: usize) {
        for _ in 0..count {
            self.emit("\n");
        }
    }

    /// Full-width horizontal line made of `ch`.
    pub fn rule(&mut self, ch: char) {
        let line = ch.to_string().repeat(self.width());
        self.writeln(&line);
    }

    pub fn beep(&mut self, count: usize) {
        self.emit(&"\x07".repeat(count));
    }

    /// Written only when the debug channel is on.
    pub fn debug(&mut self, message: &str) {
        if self.config.verbose {
            self.writeln_styled(message, &[DARK_GRAY]);
        }
    }

    /// Write one line cut down to the terminal width.
    pub fn write_short(&mut self, message: &str) {
        let width = if self.width() > 80 { 85 } else { self.width() };
        let line = format::shorten(message.trim(), width);
        self.writeln(&line);
    }

    // === Blocks ===

    /// Three-line padded block; a plain line when styling is off.
    pub fn block(&mut self, message: &str, styles: &[Style]) {
        if !self.config.painter.enabled() {
            self.writeln(message);
            return;
        }
        let spaces = " ".repeat(text_width(message));
        self.new_line(1);
        self.writeln_styled(&format!("  {}  ", spaces), styles);
        self.writeln_styled(&format!("  {}  ", message), styles);
        self.writeln_styled(&format!("  {}  ", spaces), styles);
        self.new_line(1);
    }

    pub fn error_block(&mut self, message: &str) {
        self.block(message, &[WHITE, BG_RED, Style::Blink]);
    }

    pub fn success_block(&mut self, message: &str) {
        self.block(message, &[WHITE, BG_GREEN, Style::Bold]);
    }

    /// Two-column listing: names padded to the longest name + 3.
    pub fn help_block(&mut self, rows: &[(String, String)]) {
        let pad = rows.iter().map(|(name, _)| text_width(name)).max().unwrap_or(0) + 3;
        for (name, description) in rows {
            let styled = self.style(name, &[GREEN]);
            self.write(&format!(" {}{}", styled, " ".repeat(pad - text_width(name))));
            self.write_short(description);
        }
        self.new_line(1);
    }

    // === Log-level helpers ===

    pub fn error(&mut self, message: &str) {
        self.writeln_styled(message, &[LIGHT_RED]);
    }

    pub fn warning(&mut self, message: &str) {
        self.writeln_styled(message, &[LIGHT_YELLOW]);
    }

    pub fn notice(&mut self, message: &str) {
        self.writeln_styled(message, &[YELLOW]);
    }

    pub fn alert(&mut self, message: &str) {
        self.writeln_styled(message, &[CYAN]);
    }

    pub fn critical(&mut self, message: &str) {
        self.writeln_styled(message, &[LIGHT_RED, Style::Bold]);
    }

    pub fn success(&mut self, message: &str) {
        self.writeln_styled(message, &[GREEN]);
    }

    // === Progress ===

    /// Redraw the progress line in place; a newline follows the final step.
    pub fn show_progress(&mut self, step: u64, total: u64, info: &str) {
        let fancy = self.config.painter.enabled();
        let line = progress::render_bar(step, total, 50, info, fancy);
        let styled = if fancy {
            self.style(&line, &[GREEN])
        } else {
            line
        };
        self.emit("\r");
        self.emit(&styled);
        if step >= total {
            self.emit("\n");
        }
        self.flush();
    }

    /// The mascot banner shown by the builtin commands.
    pub fn robot(&mut self, message: &str) {
        let eye = self.style("*", &[GREEN]);
        let art = format!(
            "        {message}\n      _____     /\n     /_____\\\n____[\\{eye}---{eye}/]____\n\
             /\\ #\\ \\_____/ /# /\\\n/  \\# \\_.---._/ #/  \\\n"
        );
        self.writeln(&art);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> (Output, Captured) {
        Output::capture(OutputConfig::default())
    }

    fn colored() -> (Output, Captured) {
        let mut config = OutputConfig::default();
        config.painter.enable();
        Output::capture(config)
    }

    #[test]
    fn test_debug_only_when_verbose() {
        let (mut out, captured) = plain();
        out.debug("hidden");
        assert_eq!(captured.contents(), "");
        out.config_mut().verbose = true;
        out.debug("shown");
        assert_eq!(captured.contents(), "shown\n");
    }

    #[test]
    fn test_block_degrades_without_styling() {
        let (mut out, captured) = plain();
        out.error_block("Argument source is required");
        assert_eq!(captured.contents(), "Argument source is required\n");
    }

    #[test]
    fn test_block_with_styling() {
        let (mut out, captured) = colored();
        out.success_block("ok");
        let text = captured.contents();
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("\x1b[97;42;1m  ok  \x1b[0m"));
    }

    #[test]
    fn test_help_block_pads_names() {
        let (mut out, captured) = plain();
        out.help_block(&[
            ("-h, --help".to_string(), "Show help".to_string()),
            ("--ansi".to_string(), "Force color".to_string()),
        ]);
        assert_eq!(
            captured.contents(),
            " -h, --help   Show help\n --ansi       Force color\n\n"
        );
    }

    #[test]
    fn test_write_short_truncates() {
        let mut config = OutputConfig::default();
        config.max_width = 10;
        let (mut out, captured) = Output::capture(config);
        out.write_short("  0123456789abcdef  ");
        assert_eq!(captured.contents(), "0123456789...\n");
    }

    #[test]
    fn test_rule_spans_width() {
        let mut config = OutputConfig::default();
        config.max_width = 5;
        let (mut out, captured) = Output::capture(config);
        out.rule('-');
        assert_eq!(captured.contents(), "-----\n");
    }

    #[test]
    fn test_show_progress_plain() {
        let (mut out, captured) = plain();
        out.show_progress(10, 10, "done");
        let text = captured.contents();
        assert!(text.starts_with("\r100% [="));
        assert!(text.ends_with("]  done\n"));
    }
}

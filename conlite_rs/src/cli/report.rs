//! Error report for failures intercepted by the dispatcher.

use std::backtrace::BacktraceStatus;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::colors::{DARK_GRAY, LIGHT_RED};
use crate::error::{ConsoleError, Site, console_error, raised_at};
use crate::format::wordwrap;
use crate::output::Output;
use crate::types::ArgValue;

/// Quote `s` and backslash-escape quotes, backslashes and NUL.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' | '"' | '\'' => {
                out.push('\\');
                out.push(c);
            }
            '\0' => out.push_str("\\0"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Short display form of a bound argument.
///
/// Strings are quoted, `null` for unset values, lists of more than three
/// items collapse to `Array`.
pub fn summarize(value: &ArgValue) -> String {
    match value {
        ArgValue::Null => "null".to_string(),
        ArgValue::Single(s) => quote(s),
        ArgValue::List(items) if items.len() > 3 => "Array".to_string(),
        ArgValue::List(items) => {
            let inner: Vec<String> = items.iter().map(|s| quote(s)).collect();
            format!("[{}]", inner.join(", "))
        }
    }
}

/// The handler invocation that failed: `copy("a.txt", null)`.
#[derive(Clone, Debug)]
pub struct Frame {
    pub command: String,
    pub args: Vec<ArgValue>,
    /// Where the handler was declared.
    pub site: Option<Site>,
}

impl Frame {
    pub fn new(command: &str, args: &[ArgValue]) -> Self {
        Self {
            command: command.to_string(),
            args: args.to_vec(),
            site: None,
        }
    }

    pub fn at(mut self, site: Site) -> Self {
        self.site = Some(site);
        self
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<String> = self.args.iter().map(summarize).collect();
        write!(f, "{}({})", self.command, args.join(", "))
    }
}

/// Headline label for `err`.
pub fn kind_label(err: &anyhow::Error) -> &'static str {
    console_error(err)
        .map(ConsoleError::kind_label)
        .unwrap_or("ApplicationException")
}

/// Read `file`, dropping leading components until a readable path remains.
///
/// Compiler-recorded paths are relative to the workspace root, which is not
/// necessarily the current directory.
fn read_source(file: &str) -> Option<String> {
    let mut components = Path::new(file).components();
    loop {
        let candidate = components.as_path();
        if candidate.as_os_str().is_empty() {
            return None;
        }
        if let Ok(text) = fs::read_to_string(candidate) {
            return Some(text);
        }
        components.next();
    }
}

/// Numbered lines of `source` around `line`, the line itself marked `>`.
pub fn code_snippet(output: &Output, source: &str, line: u32, around: u32) -> String {
    let first = line.saturating_sub(around).max(1);
    let last = line.saturating_add(around);
    let lines: Vec<(u32, &str)> = (1u32..)
        .zip(source.lines())
        .skip_while(|(n, _)| *n < first)
        .take_while(|(n, _)| *n <= last)
        .collect();
    let width = lines.last().map_or(1, |(n, _)| n.to_string().len());

    let mut snippet = String::new();
    for (n, text) in lines {
        if n == line {
            snippet.push_str(&output.style("  > ", &[LIGHT_RED]));
        } else {
            snippet.push_str("    ");
        }
        snippet.push_str(&output.style(&format!("{:>width$}| ", n), &[DARK_GRAY]));
        snippet.push_str(text);
        snippet.push('\n');
    }
    snippet
}

/// Write the full report for `err`.
///
/// The position shown is where the error was raised when it carries a
/// [`Site`], else where the failing handler was declared.
pub fn report_error(output: &mut Output, err: &anyhow::Error, frame: Option<&Frame>) {
    let indent = "  ";

    output.rule('-');
    output.writeln(&format!("Whoops! You got a(n) {}", kind_label(err)));
    output.new_line(1);
    output.writeln_styled(&wordwrap(&err.to_string(), 95, false), &[LIGHT_RED]);
    output.rule('-');
    output.new_line(1);

    if let Some(site) = raised_at(err).or_else(|| frame.and_then(|f| f.site)) {
        match read_source(site.file) {
            Some(source) => {
                let snippet = code_snippet(output, &source, site.line, 3);
                output.writeln(&snippet);
            }
            None => tracing::debug!(file = site.file, "source not readable, no snippet"),
        }
        output.writeln_styled(&format!("{}File: {}", indent, site.file), &[DARK_GRAY]);
        output.writeln_styled(&format!("{}Line: {}", indent, site.line), &[DARK_GRAY]);
        output.new_line(1);
    }

    let causes: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
    if !causes.is_empty() {
        output.writeln_styled(&format!("{}Caused by:", indent), &[LIGHT_RED]);
        for (i, cause) in causes.iter().enumerate() {
            output.writeln_styled(&format!("{}  {}. {}", indent, i + 1, cause), &[DARK_GRAY]);
        }
        output.new_line(1);
    }

    if let Some(frame) = frame {
        output.writeln_styled(&format!("{}Traces:", indent), &[LIGHT_RED]);
        output.new_line(1);
        output.writeln(&format!("{}  1   {}", indent, frame));
        if let Some(site) = frame.site {
            output.writeln_styled(&format!("{}      File: {}", indent, site.file), &[DARK_GRAY]);
            output.writeln_styled(&format!("{}      Line: {}", indent, site.line), &[DARK_GRAY]);
        }
        output.new_line(1);
    }

    let backtrace = err.backtrace();
    if backtrace.status() == BacktraceStatus::Captured {
        output.writeln_styled(&backtrace.to_string(), &[DARK_GRAY]);
    }
    output.flush();
}

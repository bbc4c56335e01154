//! Text layout helpers: word wrapping, side-by-side columns, ASCII tables
//! and human-readable sizes/durations.

use std::str::FromStr;

use crate::colors::{Painter, Style};
use crate::error::ConsoleError;
use crate::types::{DEFAULT_WIDTH, OptionValue};

/// Visible width of `s`, ignoring ANSI escape sequences.
pub fn text_width(s: &str) -> usize {
    console::measure_text_width(s)
}

fn char_slice(s: &str, start: usize, len: Option<usize>) -> String {
    let iter = s.chars().skip(start);
    match len {
        Some(n) => iter.take(n).collect(),
        None => iter.collect(),
    }
}

/// Wrap `text` at `width` columns, breaking on spaces.
///
/// Existing line breaks are kept. With `cut`, words longer than `width` are
/// split across lines; otherwise they overflow.
pub fn wordwrap(text: &str, width: usize, cut: bool) -> String {
    let width = width.max(1);
    let mut wrapped: Vec<String> = Vec::new();

    for line in text.split('\n') {
        let line = line.trim_end();
        if text_width(line) <= width {
            wrapped.push(line.to_string());
            continue;
        }

        let mut out = String::new();
        let mut actual = String::new();
        for word in line.split(' ') {
            if text_width(&actual) + text_width(word) <= width {
                actual.push_str(word);
                actual.push(' ');
                continue;
            }
            if !actual.is_empty() {
                out.push_str(actual.trim_end());
                out.push('\n');
            }
            actual = word.to_string();
            if cut {
                while text_width(&actual) > width {
                    out.push_str(&char_slice(&actual, 0, Some(width)));
                    out.push('\n');
                    actual = char_slice(&actual, width, None);
                }
            }
            actual.push(' ');
        }
        out.push_str(actual.trim());
        wrapped.push(out);
    }

    wrapped.join("\n")
}

/// Right-pad `s` with spaces to `len` visible columns.
pub fn pad(s: &str, len: usize) -> String {
    let width = text_width(s);
    if width >= len {
        return s.to_string();
    }
    format!("{}{}", s, " ".repeat(len - width))
}

/// Cut `s` to `width` visible columns, marking the cut with `...`.
pub fn shorten(s: &str, width: usize) -> String {
    if text_width(s) <= width {
        return s.to_string();
    }
    format!("{}...", char_slice(s, 0, Some(width)))
}

/// Column width specification for [`Formatter::columns`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Column {
    /// Exact width in columns.
    Fixed(usize),
    /// Percentage of the space left after fixed columns and borders.
    Percent(f64),
    /// Takes whatever remains. At most one per layout.
    Fluid,
}

impl FromStr for Column {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "*" {
            return Ok(Column::Fluid);
        }
        if let Ok(n) = s.parse::<usize>() {
            return Ok(Column::Fixed(n));
        }
        s.strip_suffix('%')
            .and_then(|p| p.trim().parse::<f64>().ok())
            .filter(|p| *p >= 0.0)
            .map(Column::Percent)
            .ok_or_else(|| ConsoleError::Layout(format!("unknown column format {}", s)))
    }
}

/// Column and table renderer bound to a maximum line width.
#[derive(Clone, Debug)]
pub struct Formatter {
    border: String,
    max_width: usize,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            border: " ".to_string(),
            max_width: DEFAULT_WIDTH,
        }
    }
}

impl Formatter {
    pub fn new(max_width: usize) -> Self {
        Self {
            max_width,
            ..Default::default()
        }
    }

    pub fn border(&self) -> &str {
        &self.border
    }

    pub fn set_border(&mut self, border: &str) {
        self.border = border.to_string();
    }

    pub fn max_width(&self) -> usize {
        self.max_width
    }

    pub fn set_max_width(&mut self, max_width: usize) {
        self.max_width = max_width;
    }

    /// Resolve column specs into concrete widths.
    pub fn column_widths(&self, columns: &[Column]) -> Result<Vec<usize>, ConsoleError> {
        if columns.is_empty() {
            return Ok(Vec::new());
        }
        let max = self.max_width as i64;
        let mut fixed = ((columns.len() - 1) * text_width(&self.border)) as i64;
        let mut fluid: Option<usize> = None;
        let mut widths = vec![0i64; columns.len()];

        for (idx, col) in columns.iter().enumerate() {
            match col {
                Column::Fixed(n) => {
                    widths[idx] = *n as i64;
                    fixed += *n as i64;
                }
                Column::Percent(_) => {}
                Column::Fluid if fluid.is_none() => fluid = Some(idx),
                Column::Fluid => {
                    return Err(ConsoleError::Layout(
                        "Only one fluid column allowed!".to_string(),
                    ));
                }
            }
        }

        let mut alloc = fixed;
        let remain = max - alloc;
        for (idx, col) in columns.iter().enumerate() {
            if let Column::Percent(perc) = col {
                let real = ((perc * remain as f64) / 100.0).floor() as i64;
                widths[idx] = real;
                alloc += real;
            }
        }

        let remain = max - alloc;
        if remain < 0 {
            return Err(ConsoleError::Layout(
                "Wanted column widths exceed available space".to_string(),
            ));
        }
        match fluid {
            Some(idx) => widths[idx] = remain,
            None => {
                if let Some(last) = widths.last_mut() {
                    *last += remain;
                }
            }
        }

        Ok(widths.into_iter().map(|w| w.max(0) as usize).collect())
    }

    /// Render `texts` side by side, each wrapped to its column.
    ///
    /// `styles[i]` (if present) is applied to every chunk of column `i`.
    pub fn columns(
        &self,
        columns: &[Column],
        texts: &[&str],
        styles: &[&[Style]],
        painter: &Painter,
    ) -> Result<String, ConsoleError> {
        let widths = self.column_widths(columns)?;
        let wrapped: Vec<Vec<String>> = widths
            .iter()
            .enumerate()
            .map(|(col, width)| {
                let text = texts.get(col).copied().unwrap_or("");
                wordwrap(text, *width, true)
                    .split('\n')
                    .map(str::to_string)
                    .collect()
            })
            .collect();
        let rows = wrapped.iter().map(Vec::len).max().unwrap_or(0);
        let last = widths.len().saturating_sub(1);

        let mut out = String::new();
        for row in 0..rows {
            for (col, width) in widths.iter().enumerate() {
                let val = wrapped[col].get(row).map(String::as_str).unwrap_or("");
                let chunk = pad(val, *width);
                match styles.get(col) {
                    Some(col_styles) if !col_styles.is_empty() => {
                        out.push_str(&painter.apply(col_styles, &chunk))
                    }
                    _ => out.push_str(&chunk),
                }
                if col != last {
                    out.push_str(&self.border);
                }
            }
            out.push('\n');
        }
        Ok(out)
    }

    /// Render an ASCII table with `+---+` borders.
    pub fn table(&self, head: &[&str], body: &[Vec<String>]) -> String {
        let mut rows: Vec<Vec<String>> = Vec::new();
        if !head.is_empty() {
            rows.push(head.iter().map(|h| h.to_string()).collect());
        }
        rows.extend(body.iter().cloned());
        if rows.is_empty() {
            return String::new();
        }

        let mut max_lens: Vec<usize> = Vec::new();
        for row in &rows {
            for (col, cell) in row.iter().enumerate() {
                let len = text_width(cell);
                match max_lens.get_mut(col) {
                    Some(max) if *max < len => *max = len,
                    Some(_) => {}
                    None => max_lens.push(len),
                }
            }
        }

        let rule = max_lens.iter().fold(String::from("+"), |mut acc, len| {
            acc.push_str(&"-".repeat(len + 2));
            acc.push('+');
            acc
        });

        let total = rows.len();
        let mut table = String::new();
        table.push_str(&rule);
        table.push('\n');
        for (idx, row) in rows.iter().enumerate() {
            let cells: Vec<String> = max_lens
                .iter()
                .enumerate()
                .map(|(col, len)| pad(row.get(col).map(String::as_str).unwrap_or(""), *len))
                .collect();
            table.push_str(&format!("| {} |\n", cells.join(" | ")));
            if (idx == 0 && !head.is_empty()) || idx + 1 == total {
                table.push_str(&rule);
                table.push('\n');
            }
        }
        table
    }
}

/// Format a byte count: `512 Bytes`, `2 KiB`, `1.5 MB`, `1.0 GiB`.
pub fn format_memory(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;
    if bytes >= GIB {
        format!("{:.1} GiB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{} KiB", bytes / KIB)
    } else {
        format!("{} Bytes", bytes)
    }
}

/// Coarse human duration: `< 1 second`, `5 seconds`, `2 minutes`, `1 day`.
pub fn format_time(secs: u64) -> String {
    const FORMATS: &[(u64, &str, u64)] = &[
        (0, "< 1 second", 0),
        (1, "1 second", 0),
        (2, "seconds", 1),
        (60, "1 minute", 0),
        (120, "minutes", 60),
        (3600, "1 hour", 0),
        (7200, "hours", 3600),
        (86400, "1 day", 0),
        (172800, "days", 86400),
    ];

    let (_, label, divisor) = FORMATS
        .iter()
        .rev()
        .find(|(threshold, _, _)| secs >= *threshold)
        .copied()
        .unwrap_or(FORMATS[0]);
    if divisor == 0 {
        label.to_string()
    } else {
        format!("{} {}", secs / divisor, label)
    }
}

/// Display form of a resolved option: `(Null)`, `(True)`, `(False)` or the text.
pub fn format_option_value(value: Option<&OptionValue>) -> String {
    match value {
        None | Some(OptionValue::Text(None)) => "(Null)".to_string(),
        Some(OptionValue::Flag(true)) => "(True)".to_string(),
        Some(OptionValue::Flag(false)) => "(False)".to_string(),
        Some(OptionValue::Text(Some(v))) => v.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wordwrap_breaks_on_spaces() {
        assert_eq!(
            wordwrap("the quick brown fox jumps", 10, false),
            "the quick\nbrown fox\njumps"
        );
    }

    #[test]
    fn test_wordwrap_keeps_short_lines_and_breaks() {
        assert_eq!(wordwrap("short\nlines  ", 20, false), "short\nlines");
    }

    #[test]
    fn test_wordwrap_cut_long_words() {
        assert_eq!(wordwrap("abcdefghij xy", 4, true), "abcd\nefgh\nij\nxy");
        assert_eq!(wordwrap("abcdefghij", 4, false), "abcdefghij");
    }

    #[test]
    fn test_pad_ignores_ansi() {
        let colored = "\x1b[32mab\x1b[0m";
        assert_eq!(text_width(&pad(colored, 5)), 5);
        assert_eq!(pad("abcdef", 3), "abcdef");
    }

    #[test]
    fn test_column_parse() {
        assert_eq!("20%".parse::<Column>().unwrap(), Column::Percent(20.0));
        assert_eq!("*".parse::<Column>().unwrap(), Column::Fluid);
        assert_eq!("12".parse::<Column>().unwrap(), Column::Fixed(12));
        assert!(matches!("wide".parse::<Column>(), Err(ConsoleError::Layout(_))));
    }

    #[test]
    fn test_column_widths_fluid_takes_remainder() {
        let fmt = Formatter::new(100);
        let widths = fmt
            .column_widths(&[Column::Percent(20.0), Column::Fluid])
            .unwrap();
        // one border column, 99 left; 20% of 99 = 19
        assert_eq!(widths, vec![19, 80]);
    }

    #[test]
    fn test_column_widths_last_absorbs_without_fluid() {
        let fmt = Formatter::new(30);
        let widths = fmt
            .column_widths(&[Column::Fixed(10), Column::Fixed(5)])
            .unwrap();
        assert_eq!(widths, vec![10, 19]);
    }

    #[test]
    fn test_column_widths_errors() {
        let fmt = Formatter::new(20);
        assert!(fmt.column_widths(&[Column::Fluid, Column::Fluid]).is_err());
        assert!(fmt.column_widths(&[Column::Fixed(30)]).is_err());
    }

    #[test]
    fn test_columns_render_side_by_side() {
        let fmt = Formatter::new(21);
        let out = fmt
            .columns(
                &[Column::Fixed(10), Column::Fluid],
                &["Version", "one two three four"],
                &[],
                &Painter::default(),
            )
            .unwrap();
        assert_eq!(out, "Version    one two   \n           three four\n");
    }

    #[test]
    fn test_table() {
        let fmt = Formatter::default();
        let table = fmt.table(&["Name", "Age"], &[vec!["Ann".into(), "7".into()]]);
        assert_eq!(
            table,
            "+------+-----+\n| Name | Age |\n+------+-----+\n| Ann  | 7   |\n+------+-----+\n"
        );
    }

    #[test]
    fn test_format_memory() {
        assert_eq!(format_memory(512), "512 Bytes");
        assert_eq!(format_memory(2048), "2 KiB");
        assert_eq!(format_memory(3 * 1024 * 1024 / 2), "1.5 MB");
        assert_eq!(format_memory(1024 * 1024 * 1024), "1.0 GiB");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "< 1 second");
        assert_eq!(format_time(1), "1 second");
        assert_eq!(format_time(45), "45 seconds");
        assert_eq!(format_time(90), "1 minute");
        assert_eq!(format_time(150), "2 minutes");
        assert_eq!(format_time(7200), "2 hours");
        assert_eq!(format_time(3 * 86400), "3 days");
    }

    #[test]
    fn test_format_option_value() {
        assert_eq!(format_option_value(None), "(Null)");
        assert_eq!(format_option_value(Some(&OptionValue::Flag(true))), "(True)");
        assert_eq!(
            format_option_value(Some(&OptionValue::Text(Some("x".into())))),
            "x"
        );
    }
}

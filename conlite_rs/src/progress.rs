//! Progress UI utilities (spinners, countdowns, textual bars)

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Render a single-line progress bar.
///
/// `fancy` draws filled `■` cells; otherwise an ASCII `[===>---]` bar is
/// used, which survives terminals without styling.
pub fn render_bar(step: u64, total: u64, width: usize, info: &str, fancy: bool) -> String {
    let total = total.max(1);
    let step = step.min(total);

    if fancy {
        let percent = step * 100 / total;
        let filled = ((width as f64 * percent as f64) / 100.0).round() as usize;
        let filled = filled.min(width);
        let bar = format!(
            "{}% [{}{}]",
            percent,
            "■".repeat(filled),
            "-".repeat(width - filled)
        );
        if info.is_empty() {
            bar
        } else {
            format!("{}  {}", bar, info)
        }
    } else {
        let inner = width.saturating_sub(5);
        let percent = ((step as f64 * 100.0) / total as f64).round() as usize;
        let filled = ((inner as f64 * percent as f64) / 100.0).round() as usize;
        let filled = filled.min(inner);
        format!(
            "{}% [{}>{}]  {}",
            percent,
            "=".repeat(filled),
            "-".repeat(inner - filled),
            info
        )
    }
}

/// Spinner for long-running operations
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    /// Create a new spinner with a message
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(&["-", "\\", "|", "/"])
                .template("{spinner:.cyan} {msg}")
                .expect("valid template"),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// Update the spinner message
    pub fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    /// Finish with success message (green checkmark)
    pub fn finish_success(&self, message: &str) {
        self.bar.finish_and_clear();
        println!("{} {}", style("✓").green().bold(), message);
    }

    /// Finish with error message (red)
    pub fn finish_error(&self, message: &str) {
        self.bar.finish_and_clear();
        eprintln!("{} {}", style("✗").red().bold(), message);
    }

    /// Just clear the spinner without message
    pub fn finish_clear(&self) {
        self.bar.finish_and_clear();
    }
}

/// Per-second countdown bar.
pub struct Countdown {
    bar: ProgressBar,
    seconds: u64,
}

impl Countdown {
    pub fn new(seconds: u64) -> Self {
        let bar = ProgressBar::new(seconds);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.green/white} {pos}/{len}s {msg}")
                .expect("valid template")
                .progress_chars("■■-"),
        );
        Self { bar, seconds }
    }

    /// Block for the configured number of seconds, ticking once per second.
    pub fn run(&self) {
        for remaining in (1..=self.seconds).rev() {
            self.bar.set_message(format!("{remaining} left"));
            std::thread::sleep(Duration::from_secs(1));
            self.bar.inc(1);
        }
        self.bar.finish_and_clear();
    }
}

/// Format duration in human-readable form
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.2}s", secs)
    } else {
        let mins = secs / 60.0;
        format!("{:.1}m", mins)
    }
}

/// Format a count with proper singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

//! Line input for interactive questions.

use std::collections::VecDeque;
use std::io;

/// Source of answers to interactive questions.
pub trait Prompter {
    /// Read one answer line. `Ok(None)` means input is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// Reads answers from the attached terminal.
#[derive(Default)]
pub struct TermPrompter;

impl Prompter for TermPrompter {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let term = console::Term::stdout();
        if !term.is_term() {
            let mut line = String::new();
            return match io::stdin().read_line(&mut line)? {
                0 => Ok(None),
                _ => Ok(Some(line.trim_end_matches(['\r', '\n']).to_string())),
            };
        }
        term.read_line().map(Some)
    }
}

/// Pre-seeded answers, for tests and non-interactive runs.
#[derive(Default, Debug, Clone)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.answers.pop_front())
    }
}

/// Interpret a yes/no answer. `None` for anything unrecognised.
pub fn parse_confirmation(answer: &str, default: bool) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

//! User input handling.
//! A `Prompter` hands back one raw line per question; validation and
//! re-asking happen in the caller.

use std::io::BufRead;

use dialoguer::Input;

use crate::error::{Error, Result};
use crate::output;

/// Source of answers to interactive questions.
pub trait Prompter {
    /// Shows `question` and returns the line the user entered, without the
    /// line terminator.
    ///
    /// # Errors
    /// * `Error::PromptError` if input ended or could not be read
    fn ask(&mut self, question: &str) -> Result<String>;
}

/// Prompter for an attended terminal.
#[derive(Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn ask(&mut self, question: &str) -> Result<String> {
        output::input(question);
        Input::<String>::new()
            .allow_empty(true)
            .interact_text()
            .map_err(|e| Error::PromptError(e.to_string()))
    }
}

/// Prompter reading one answer per line from any buffered reader.
pub struct ReaderPrompter<R: BufRead> {
    reader: R,
}

impl<R: BufRead> ReaderPrompter<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> Prompter for ReaderPrompter<R> {
    fn ask(&mut self, question: &str) -> Result<String> {
        output::input(question);
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|e| Error::PromptError(e.to_string()))?;
        if read == 0 {
            return Err(Error::PromptError("input ended before all questions were answered".to_string()));
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}

// Interactive line prompts

use eyre::{Context, Result};
use std::io::{BufRead, Write};

/// Asks the user a question and returns the answer
///
/// `Ok(None)` means the user gave no answer (end of input or a blank line),
/// which callers treat as a cancel.
pub trait Prompter {
    fn ask(&mut self, question: &str) -> Result<Option<String>>;
}

/// Prompter reading one line per question
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.writer, " {}:\n > ", question)?;
        self.writer.flush()?;

        let mut line = String::new();
        let read = self.reader.read_line(&mut line).context("Failed to read answer")?;
        if read == 0 {
            // EOF: finish the prompt line
            writeln!(self.writer)?;
            return Ok(None);
        }

        let answer = line.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        Ok(Some(answer.to_string()))
    }
}

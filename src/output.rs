// Terminal rendering of tasks and status lines

use crate::models::Task;
use colored::Colorize;
use eyre::Result;
use std::io::Write;

/// Renders tasks and messages to any writer
pub struct Output<W> {
    writer: W,
}

impl<W: Write> Output<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// One row per task, or `No tasks`
    pub fn tasks<'a, I>(&mut self, tasks: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let mut empty = true;
        for task in tasks {
            empty = false;
            self.task(task)?;
        }
        if empty {
            self.info("No tasks")?;
        }
        Ok(())
    }

    pub fn task(&mut self, task: &Task) -> Result<()> {
        let id = format!(" {} ", task.id);
        let status = format!(" {} ", task.status);
        writeln!(
            self.writer,
            "{} {}  {}",
            id.black().on_blue(),
            task.description,
            status.black().on_green()
        )?;
        Ok(())
    }

    pub fn info(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, "{}", message.green())?;
        Ok(())
    }

    pub fn warn(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, "{}", message.yellow())?;
        Ok(())
    }

    pub fn error(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, "{}", format!(" {} ", message).white().on_red())?;
        Ok(())
    }
}

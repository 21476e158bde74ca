// Runs one action against the store

use crate::action::Action;
use crate::filter::Filter;
use crate::models::TaskStatus;
use crate::output::Output;
use crate::prompt::Prompter;
use crate::store::Store;
use eyre::Result;
use std::io::Write;
use tracing::{debug, error};

pub struct App<P, W> {
    store: Store,
    prompter: P,
    output: Output<W>,
}

impl<P: Prompter, W: Write> App<P, W> {
    pub fn new(store: Store, prompter: P, writer: W) -> Self {
        Self {
            store,
            prompter,
            output: Output::new(writer),
        }
    }

    pub fn into_parts(self) -> (Store, P, W) {
        (self.store, self.prompter, self.output.into_inner())
    }

    /// Validate `action` and run it
    ///
    /// An unknown action is reported on the output and is not an error.
    pub fn run(&mut self, action: &str, filter: &Filter) -> Result<()> {
        let action = match action.parse::<Action>() {
            Ok(action) => action,
            Err(e) => {
                debug!(action, "Rejected action");
                return self.output.error(&e.to_string());
            }
        };

        debug!(%action, ?filter, "Running action");
        match action {
            Action::List => self.list(filter),
            Action::Add => self.add(),
            Action::Update => self.update(),
            Action::Mark(status) => self.mark(status),
            Action::Delete => self.delete(),
        }
    }

    fn list(&mut self, filter: &Filter) -> Result<()> {
        self.output.tasks(self.store.list(filter))
    }

    fn add(&mut self) -> Result<()> {
        let Some(description) = self.prompter.ask("Task description")? else {
            return Ok(());
        };

        let id = self.store.add(description)?;
        if self.save()? {
            self.output.info(&format!("Added new task '{}'.", id))?;
        }
        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        self.list(&Filter::all())?;
        let Some(id) = self.ask_id()? else {
            return Ok(());
        };
        let Some(description) = self.prompter.ask(&format!("Description for task '{}'", id))? else {
            return Ok(());
        };

        if self.store.update_description(id, description).is_none() {
            return self.not_found(id);
        }
        if self.save()? {
            self.output.info(&format!("Updated task '{}'.", id))?;
        }
        Ok(())
    }

    fn mark(&mut self, status: TaskStatus) -> Result<()> {
        self.list(&Filter::all())?;
        let Some(id) = self.ask_id()? else {
            return Ok(());
        };

        if self.store.set_status(id, status).is_none() {
            return self.not_found(id);
        }
        if self.save()? {
            self.output
                .info(&format!("Updated task '{}' with status '{}'.", id, status))?;
        }
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        self.list(&Filter::all())?;
        let Some(id) = self.ask_id()? else {
            return Ok(());
        };

        if self.store.delete(id).is_none() {
            return self.not_found(id);
        }
        self.list(&Filter::all())?;
        if self.save()? {
            self.output.warn(&format!("Deleted task '{}'.", id))?;
        }
        Ok(())
    }

    /// Prompt for a task id; `None` on cancel or on input that isn't an id
    fn ask_id(&mut self) -> Result<Option<i64>> {
        let Some(raw) = self.prompter.ask("Which ID?")? else {
            return Ok(None);
        };
        match raw.parse::<i64>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                self.output.error(&format!("Invalid task id '{}'.", raw))?;
                Ok(None)
            }
        }
    }

    fn not_found(&mut self, id: i64) -> Result<()> {
        self.output.warn(&format!("Task '{}' not found.", id))
    }

    /// Encode and write the store; returns false when encoding failed and
    /// nothing was written
    fn save(&mut self) -> Result<bool> {
        let json = match self.store.encode() {
            Ok(json) => json,
            Err(e) => {
                error!(error = ?e, "Failed to encode tasks");
                self.output.error("Failed to convert json encoded tasks.")?;
                return Ok(false);
            }
        };
        self.store.write(&json)?;
        Ok(true)
    }
}

// JSON store file operations

use crate::models::Task;
use eyre::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::{debug, warn};

/// On-disk wrapper: `{ "tasks": [...] }`
#[derive(Debug, Serialize, Deserialize)]
struct TaskFile<T> {
    tasks: T,
}

/// Parse the contents of a store file
///
/// Fails on invalid JSON, a missing `tasks` field, or records that don't have
/// the task shape. Unknown fields on a task are ignored.
pub fn parse_tasks(raw: &str) -> Result<Vec<Task>> {
    let file: TaskFile<Vec<Task>> = serde_json::from_str(raw).context("Failed to parse task file")?;
    Ok(file.tasks)
}

/// Serialize tasks into the store file format
pub fn encode_tasks(tasks: &[Task]) -> Result<String> {
    serde_json::to_string(&TaskFile { tasks }).context("Failed to convert json encoded tasks")
}

/// Load tasks from `path`
///
/// A missing file, an unreadable file and a file that fails `parse_tasks` all
/// yield an empty collection.
pub fn load_tasks(path: &Path) -> Vec<Task> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(file = ?path, "Task file does not exist yet");
            return Vec::new();
        }
        Err(e) => {
            warn!(file = ?path, error = ?e, "Failed to read task file, starting empty");
            return Vec::new();
        }
    };

    match parse_tasks(&raw) {
        Ok(tasks) => {
            debug!(file = ?path, count = tasks.len(), "Loaded tasks");
            tasks
        }
        Err(e) => {
            warn!(file = ?path, error = ?e, "Task file is malformed, starting empty");
            Vec::new()
        }
    }
}

/// Overwrite `path` with already-encoded JSON
pub fn write_tasks(path: &Path, json: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(path)
        .context("Failed to open task file for writing")?;

    // Acquire exclusive lock before truncating
    file.lock_exclusive().context("Failed to acquire file lock")?;

    file.set_len(0)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;

    // Lock is automatically released when file is dropped
    Ok(())
}

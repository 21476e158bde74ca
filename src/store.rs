// Task store backed by a single JSON file

use crate::filter::Filter;
use crate::json;
use crate::models::{Task, TaskStatus, now_local};
use chrono::NaiveDateTime;
use eyre::{Result, eyre};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Source of "now" for timestamps
pub type Clock = fn() -> NaiveDateTime;

/// In-memory task collection loaded from, and saved back to, one JSON file
pub struct Store {
    path: PathBuf,
    tasks: Vec<Task>,
    clock: Clock,
}

impl Store {
    /// Open the store at the given file path
    ///
    /// Never fails: a missing or malformed file gives an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let tasks = json::load_tasks(&path);
        info!(file = ?path, count = tasks.len(), "Opened task store");

        Self {
            path,
            tasks,
            clock: now_local,
        }
    }

    /// Replace the clock used for `createdAt` / `updatedAt`
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Tasks in collection order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    // ========================================================================
    // CRUD
    // ========================================================================

    /// Tasks matching `filter`, in collection order
    pub fn list(&self, filter: &Filter) -> Vec<&Task> {
        self.tasks.iter().filter(|task| filter.matches(task)).collect()
    }

    /// Next id: one past the highest id in the store, 1 when empty
    pub fn next_id(&self) -> Result<i64> {
        let max = self.tasks.iter().map(|task| task.id).max().unwrap_or(0);
        max.checked_add(1).ok_or_else(|| eyre!("Task id space exhausted (max id {})", max))
    }

    /// Append a new `todo` task and return its id
    pub fn add(&mut self, description: impl Into<String>) -> Result<i64> {
        let id = self.next_id()?;
        let task = Task::new(id, description, (self.clock)());
        debug!(id, "add: appending task");
        self.tasks.push(task);
        Ok(id)
    }

    /// Replace the description of task `id`; `None` if there is no such task
    pub fn update_description(&mut self, id: i64, description: impl Into<String>) -> Option<&Task> {
        let now = (self.clock)();
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.description = description.into();
        task.touch(now);
        debug!(id, "update_description: task updated");
        Some(task)
    }

    /// Set the status of task `id`; `None` if there is no such task
    pub fn set_status(&mut self, id: i64, status: TaskStatus) -> Option<&Task> {
        let now = (self.clock)();
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.status = status;
        task.touch(now);
        debug!(id, %status, "set_status: task updated");
        Some(task)
    }

    /// Remove task `id`, keeping the order of the rest
    pub fn delete(&mut self, id: i64) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        debug!(id, "delete: removing task");
        Some(self.tasks.remove(index))
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Sort newest-updated first (stable) and encode
    ///
    /// Encoding happens before anything touches the file, so a failure here
    /// leaves the file as it was.
    pub fn encode(&mut self) -> Result<String> {
        self.tasks.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        json::encode_tasks(&self.tasks)
    }

    /// Overwrite the file with output from `encode`
    pub fn write(&self, json: &str) -> Result<()> {
        json::write_tasks(&self.path, json)?;
        info!(file = ?self.path, count = self.tasks.len(), "Saved task store");
        Ok(())
    }

    /// Overwrite the file with the current collection
    pub fn save(&mut self) -> Result<()> {
        let json = self.encode()?;
        self.write(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn t1() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(12, 0, 1).unwrap()
    }

    fn t2() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap().and_hms_opt(8, 30, 0).unwrap()
    }

    fn open(temp: &TempDir) -> Store {
        Store::open(temp.path().join("task-cli.json")).with_clock(t0)
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = open(&temp);
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_open_corrupt_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("task-cli.json");
        fs::write(&path, "not json at all").unwrap();

        let store = Store::open(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_assigns_increasing_ids_from_one() {
        let temp = TempDir::new().unwrap();
        let mut store = open(&temp);

        let ids: Vec<i64> = (0..5).map(|i| store.add(format!("Task {}", i)).unwrap()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_add_uses_max_id_not_count() {
        let temp = TempDir::new().unwrap();
        let mut store = open(&temp);
        store.add("a").unwrap();
        store.add("b").unwrap();
        store.add("c").unwrap();
        store.delete(2);

        assert_eq!(store.add("d").unwrap(), 4);

        store.delete(4);
        assert_eq!(store.add("e").unwrap(), 4);
    }

    #[test]
    fn test_add_defaults() {
        let temp = TempDir::new().unwrap();
        let mut store = open(&temp);

        let id = store.add("Buy milk").unwrap();
        let task = store.get(id).unwrap();
        assert_eq!(task.description, "Buy milk");
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.created_at, t0());
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_next_id_overflow() {
        let temp = TempDir::new().unwrap();
        let mut store = open(&temp);
        store.tasks.push(Task::new(i64::MAX, "last", t0()));

        assert!(store.next_id().is_err());
        assert!(store.add("one too many").is_err());
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn test_next_id_follows_wide_and_negative_ids() {
        let temp = TempDir::new().unwrap();
        let mut store = open(&temp);
        store.tasks.push(Task::new(-7, "negative", t0()));
        assert_eq!(store.next_id().unwrap(), -6);

        store.tasks.push(Task::new(5_000_000_000, "wide", t0()));
        assert_eq!(store.add("next").unwrap(), 5_000_000_001);
        assert_eq!(store.tasks().len(), 3);
    }

    #[test]
    fn test_update_description() {
        let temp = TempDir::new().unwrap();
        let mut store = open(&temp);
        let id = store.add("Old").unwrap();

        let mut store = store.with_clock(t1);
        let task = store.update_description(id, "New").unwrap();
        assert_eq!(task.description, "New");
        assert_eq!(task.created_at, t0());
        assert_eq!(task.updated_at, t1());
    }

    #[test]
    fn test_missing_id_is_none() {
        let temp = TempDir::new().unwrap();
        let mut store = open(&temp);
        store.add("a").unwrap();

        assert!(store.update_description(9, "x").is_none());
        assert!(store.set_status(9, TaskStatus::Done).is_none());
        assert!(store.delete(9).is_none());
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].description, "a");
    }

    #[test]
    fn test_set_status() {
        let temp = TempDir::new().unwrap();
        let mut store = open(&temp);
        let id = store.add("a").unwrap();

        let mut store = store.with_clock(t2);
        let task = store.set_status(id, TaskStatus::InProgress).unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert!(task.updated_at > task.created_at);
    }

    #[test]
    fn test_delete_keeps_relative_order() {
        let temp = TempDir::new().unwrap();
        let mut store = open(&temp);
        store.add("one").unwrap();
        store.add("two").unwrap();
        store.add("three").unwrap();

        let removed = store.delete(2).unwrap();
        assert_eq!(removed.description, "two");

        let ids: Vec<i64> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_list_with_filter() {
        let temp = TempDir::new().unwrap();
        let mut store = open(&temp);
        store.add("a").unwrap();
        store.add("b").unwrap();
        store.add("c").unwrap();
        store.set_status(2, TaskStatus::Done);

        assert_eq!(store.list(&Filter::all()).len(), 3);

        let done = store.list(&Filter::status(TaskStatus::Done));
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].id, 2);

        assert!(store.list(&Filter::status(TaskStatus::InProgress)).is_empty());
    }

    #[test]
    fn test_save_sorts_by_updated_at_desc_stable() {
        let temp = TempDir::new().unwrap();
        let mut store = open(&temp);
        store.add("a").unwrap();
        store.add("b").unwrap();
        store.add("c").unwrap();

        let mut store = store.with_clock(t2);
        store.set_status(2, TaskStatus::Done);
        store.save().unwrap();

        let ids: Vec<i64> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);

        let reopened = Store::open(store.path());
        let ids: Vec<i64> = reopened.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert!(reopened.tasks().windows(2).all(|w| w[0].updated_at >= w[1].updated_at));
    }

    #[test]
    fn test_save_then_open_round_trip() {
        let temp = TempDir::new().unwrap();
        let mut store = open(&temp);
        store.add("Buy milk").unwrap();
        store.add("Walk dog").unwrap();
        store.set_status(1, TaskStatus::InProgress);
        store.save().unwrap();

        let reopened = Store::open(store.path());
        assert_eq!(reopened.tasks(), store.tasks());
        assert_eq!(reopened.get(1).unwrap().status, TaskStatus::InProgress);
        assert_eq!(reopened.get(2).unwrap().description, "Walk dog");
    }

    #[test]
    fn test_save_empty_store_writes_wrapper() {
        let temp = TempDir::new().unwrap();
        let mut store = open(&temp);
        store.add("gone soon").unwrap();
        store.delete(1);
        store.save().unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["tasks"], serde_json::json!([]));
    }
}

// Filtering for task listings

use crate::models::{Task, TaskStatus};

/// Filter applied when listing tasks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Filter {
    /// Only keep tasks with this status
    pub status: Option<TaskStatus>,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn status(status: TaskStatus) -> Self {
        Self { status: Some(status) }
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status == status)
    }
}

impl From<Option<TaskStatus>> for Filter {
    fn from(status: Option<TaskStatus>) -> Self {
        Self { status }
    }
}

// Actions accepted on the command line

use crate::models::TaskStatus;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Add,
    Update,
    Delete,
    Mark(TaskStatus),
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::List,
        Action::Add,
        Action::Update,
        Action::Delete,
        Action::Mark(TaskStatus::Todo),
        Action::Mark(TaskStatus::InProgress),
        Action::Mark(TaskStatus::Done),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Add => "add",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Mark(TaskStatus::Todo) => "mark-todo",
            Action::Mark(TaskStatus::InProgress) => "mark-in-progress",
            Action::Mark(TaskStatus::Done) => "mark-done",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned for anything outside `Action::ALL`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidAction(pub String);

impl fmt::Display for InvalidAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid action '{}'. See help for more information.", self.0)
    }
}

impl std::error::Error for InvalidAction {}

impl FromStr for Action {
    type Err = InvalidAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| InvalidAction(s.to_string()))
    }
}

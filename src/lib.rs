// task-cli - Task tracking backed by a local JSON file

pub mod action;
pub mod app;
pub mod config;
pub mod filter;
pub mod json;
pub mod models;
pub mod output;
pub mod prompt;
pub mod store;

// Re-export main types for convenience
pub use action::{Action, InvalidAction};
pub use app::App;
pub use config::Config;
pub use filter::Filter;
pub use models::{Task, TaskStatus, now_local};
pub use prompt::{LinePrompter, Prompter};
pub use store::Store;

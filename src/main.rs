use clap::Parser;
use eyre::Result;
use std::io;
use std::path::PathBuf;
use taskcli::{App, Config, Filter, LinePrompter, Store, TaskStatus};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "task-cli")]
#[command(about = "Task management app. Stores tasks in a local JSON file.")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// The action to run: list, add, update, delete, mark-todo, mark-in-progress, mark-done
    #[arg(default_value = "list")]
    action: String,

    /// Only list tasks with this status
    #[arg(long, value_enum)]
    status: Option<TaskStatus>,

    /// Path to the task file (default: task-cli.json in the current directory)
    #[arg(short, long)]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.file)?;

    let store = Store::open(&config.store_path);
    let stdin = io::stdin();
    let prompter = LinePrompter::new(stdin.lock(), io::stdout());

    let mut app = App::new(store, prompter, io::stdout());
    app.run(&cli.action, &Filter::from(cli.status))?;

    Ok(())
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tasks", author, version, about = "A simple CLI todo application", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Task file to use instead of TASKS_STORE_PATH or ./.tasks.csv
    #[arg(long, value_name = "PATH", global = true)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: tasks add "Buy milk"
    Add { description: String },
    /// List open tasks
    ///
    /// Example: tasks list
    /// Example: tasks list --all
    List {
        /// Show all tasks including completed ones
        #[arg(short = 'a', long)]
        all: bool,
    },
    /// Mark a task as complete
    ///
    /// Example: tasks complete 1
    Complete { id: u64 },
    /// Delete a task
    ///
    /// Example: tasks delete 1
    Delete { id: u64 },
}

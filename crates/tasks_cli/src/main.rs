use clap::Parser;
use clap::error::ErrorKind;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tasks_cli::cli::{Cli, Command};
use tasks_core::age::relative_age;
use tasks_core::config;
use tasks_core::error::AppError;
use tasks_core::model::Task;
use tasks_core::storage::TaskStore;
use tasks_core::task_api;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Tabled)]
struct OpenRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Task")]
    description: String,
    #[tabled(rename = "Created")]
    created: String,
}

#[derive(Tabled)]
struct FullRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Task")]
    description: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Done")]
    done: bool,
}

fn init_logging() {
    // Off unless RUST_LOG asks for it; stderr keeps stdout clean for --json.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn format_timestamp(value: OffsetDateTime) -> Result<String, AppError> {
    value
        .format(&Rfc3339)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}

fn task_json(task: &Task) -> Result<serde_json::Value, AppError> {
    Ok(serde_json::json!({
        "id": task.id,
        "description": task.description,
        "created_at": format_timestamp(task.created_at)?,
        "is_completed": task.is_completed,
    }))
}

fn print_task_json(task: &Task) -> Result<(), AppError> {
    println!("{}", task_json(task)?);
    Ok(())
}

fn print_tasks_json(tasks: &[Task]) -> Result<(), AppError> {
    let payload = tasks
        .iter()
        .map(task_json)
        .collect::<Result<Vec<_>, _>>()?;
    println!("{}", serde_json::Value::Array(payload));
    Ok(())
}

fn print_tasks_table(tasks: &[Task], include_all: bool) {
    let now = OffsetDateTime::now_utc();
    let mut table = if include_all {
        Table::new(tasks.iter().map(|task| FullRow {
            id: task.id,
            description: task.description.clone(),
            created: relative_age(task.created_at, now),
            done: task.is_completed,
        }))
    } else {
        Table::new(tasks.iter().map(|task| OpenRow {
            id: task.id,
            description: task.description.clone(),
            created: relative_age(task.created_at, now),
        }))
    };
    table.with(Style::blank());
    println!("{table}");
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn open_store(cli: &Cli) -> Result<TaskStore, AppError> {
    let loaded = config::load_config_with_fallback();
    if let Some(err) = loaded.error {
        tracing::warn!(error = %err, "ignoring config file");
        eprintln!("WARNING: {err}");
    }

    let path = config::resolve_store_path(cli.file.as_deref(), &loaded.config)?;
    tracing::debug!(path = %path.display(), "using task file");
    Ok(TaskStore::new(path))
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    let store = open_store(&cli)?;

    match cli.command {
        Command::Add { description } => {
            let task = task_api::add_task(&store, &description)?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Added task {}: {}", task.id, task.description);
            }
        }
        Command::List { all } => {
            let tasks = task_api::list_tasks(&store, all)?;
            if cli.json {
                print_tasks_json(&tasks)?;
            } else {
                print_tasks_table(&tasks, all);
            }
        }
        Command::Complete { id } => {
            let task = task_api::complete_task(&store, id)?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Marked task {} as complete", task.id);
            }
        }
        Command::Delete { id } => {
            let task = task_api::delete_task(&store, id)?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Deleted task {}", task.id);
            }
        }
    }

    Ok(())
}

fn main() {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}

use crate::error::AppError;
use crate::model::Task;
use crate::storage::{TaskStore, next_id};
use time::{OffsetDateTime, UtcOffset};
use tracing::info;

pub fn add_task(store: &TaskStore, description: &str) -> Result<Task, AppError> {
    let created_at = OffsetDateTime::now_utc()
        .to_offset(local_offset())
        .replace_nanosecond(0)
        .map_err(|err| AppError::invalid_data(err.to_string()))?;
    add_task_at(store, description, created_at)
}

fn add_task_at(
    store: &TaskStore,
    description: &str,
    created_at: OffsetDateTime,
) -> Result<Task, AppError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("description is required"));
    }
    if trimmed.contains(['\n', '\r']) {
        return Err(AppError::invalid_input(
            "description must fit on a single line",
        ));
    }

    let mut tasks = store.load_all()?;
    let task = Task::new(next_id(&tasks)?, trimmed, created_at);
    tasks.push(task.clone());
    store.save_all(&tasks)?;

    info!(id = task.id, "added task");
    Ok(task)
}

pub fn list_tasks(store: &TaskStore, include_all: bool) -> Result<Vec<Task>, AppError> {
    let tasks = store.load_all()?;
    Ok(filter_tasks(tasks, include_all))
}

fn filter_tasks(tasks: Vec<Task>, include_all: bool) -> Vec<Task> {
    if include_all {
        return tasks;
    }
    tasks.into_iter().filter(|task| !task.is_completed).collect()
}

/// Mark a task done. A missing id fails before anything is written.
pub fn complete_task(store: &TaskStore, id: u64) -> Result<Task, AppError> {
    let mut tasks = store.load_all()?;
    let task = tasks
        .iter_mut()
        .find(|task| task.id == id)
        .ok_or_else(|| not_found(id))?;

    task.is_completed = true;
    let completed = task.clone();
    store.save_all(&tasks)?;

    info!(id, "completed task");
    Ok(completed)
}

pub fn delete_task(store: &TaskStore, id: u64) -> Result<Task, AppError> {
    let mut tasks = store.load_all()?;
    let index = tasks
        .iter()
        .position(|task| task.id == id)
        .ok_or_else(|| not_found(id))?;

    let removed = tasks.remove(index);
    store.save_all(&tasks)?;

    info!(id, "deleted task");
    Ok(removed)
}

fn not_found(id: u64) -> AppError {
    AppError::not_found(format!("task with ID {id} not found"))
}

pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

use crate::error::AppError;
use crate::model::{Task, ZERO_TIMESTAMP};
use csv::StringRecord;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::warn;

pub const HEADER: [&str; 4] = ["ID", "Description", "CreatedAt", "IsCompleted"];

pub fn header_record() -> StringRecord {
    StringRecord::from(HEADER.to_vec())
}

pub fn encode(task: &Task) -> Result<StringRecord, AppError> {
    let created_at = task
        .created_at
        .format(&Rfc3339)
        .map_err(|err| AppError::invalid_data(err.to_string()))?;

    Ok(StringRecord::from(vec![
        task.id.to_string(),
        task.description.clone(),
        created_at,
        task.is_completed.to_string(),
    ]))
}

/// Decode one data record.
///
/// Only the record shape is fatal. A bad id, timestamp or flag falls back to
/// `0`, [`ZERO_TIMESTAMP`] or `false` so one damaged field does not hide the
/// rest of the list.
pub fn decode(record: &StringRecord) -> Result<Task, AppError> {
    if record.len() != HEADER.len() {
        return Err(AppError::decode(format!(
            "expected {} fields, found {}{}",
            HEADER.len(),
            record.len(),
            line_suffix(record)
        )));
    }

    let raw_id = &record[0];
    let raw_created_at = &record[2];
    let raw_completed = &record[3];

    let id = raw_id.parse::<u64>().unwrap_or_else(|_| {
        warn!(value = raw_id, "unreadable task id, using 0");
        0
    });
    let created_at = OffsetDateTime::parse(raw_created_at, &Rfc3339).unwrap_or_else(|_| {
        warn!(value = raw_created_at, task_id = id, "unreadable CreatedAt, using zero time");
        ZERO_TIMESTAMP
    });
    let is_completed = parse_bool(raw_completed).unwrap_or_else(|| {
        warn!(value = raw_completed, task_id = id, "unreadable IsCompleted, using false");
        false
    });

    Ok(Task {
        id,
        description: record[1].to_string(),
        created_at,
        is_completed,
    })
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn line_suffix(record: &StringRecord) -> String {
    record
        .position()
        .map(|position| format!(" on line {}", position.line()))
        .unwrap_or_default()
}

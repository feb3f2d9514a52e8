use crate::error::AppError;
use crate::model::Task;
use crate::storage::csv_codec;
use crate::storage::lock::LockedFile;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Flat CSV store of the whole task list.
///
/// Every `load_all` and every `save_all` holds the file's exclusive lock for
/// its whole duration, so a reader never observes a half-written file. The
/// lock is not held across a load and the save that follows it: two commands
/// running at once can interleave and the later save wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_all(&self) -> Result<Vec<Task>, AppError> {
        let mut handle = LockedFile::acquire(&self.path)?;

        let tasks = {
            let mut reader = csv::ReaderBuilder::new()
                .has_headers(false)
                .from_reader(handle.file_mut());

            let mut records = reader.records();
            // The first record is the header; it must still be well-formed.
            if let Some(header) = records.next() {
                header?;
            }

            let mut tasks = Vec::new();
            for record in records {
                tasks.push(csv_codec::decode(&record?)?);
            }
            tasks
        };

        handle.release()?;
        debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    /// Replace the whole file with a header plus one record per task.
    pub fn save_all(&self, tasks: &[Task]) -> Result<(), AppError> {
        let records = tasks
            .iter()
            .map(csv_codec::encode)
            .collect::<Result<Vec<_>, _>>()?;

        let mut handle = LockedFile::acquire(&self.path)?;
        handle.truncate()?;

        {
            let mut writer = csv::WriterBuilder::new()
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(handle.file_mut());

            writer.write_record(&csv_codec::header_record())?;
            for record in &records {
                writer.write_record(record)?;
            }
            writer
                .flush()
                .map_err(|err| AppError::io(format!("{}: {}", self.path.display(), err)))?;
        }

        handle
            .file_mut()
            .flush()
            .and_then(|_| handle.file().sync_all())
            .map_err(|err| AppError::io(format!("{}: {}", self.path.display(), err)))?;
        handle.release()?;

        debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}

pub fn next_id(tasks: &[Task]) -> Result<u64, AppError> {
    tasks
        .iter()
        .map(|task| task.id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| AppError::invalid_data("task id space exhausted"))
}

//! Exclusive advisory locking for the task store file.

use std::fs::{self, File, OpenOptions};
use std::io::{Seek, SeekFrom};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use crate::error::AppError;

/// Exclusive `flock`-style lock held until release or drop. Cooperative only:
/// a writer that opens the file directly is not stopped.
pub struct LockedFile {
    file: File,
    path: PathBuf,
    locked: bool,
}

impl LockedFile {
    /// Open `path` read/write, creating it if absent, and block until an
    /// exclusive lock is held. There is no timeout.
    pub fn acquire(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|err| AppError::io(format!("{}: {}", parent.display(), err)))?;
        }

        // Never truncate at open: another holder may still be reading.
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;

        debug!(path = %path.display(), "waiting for exclusive lock");
        FileExt::lock_exclusive(&file)
            .map_err(|err| AppError::lock(format!("{}: {}", path.display(), err)))?;
        debug!(path = %path.display(), "exclusive lock acquired");

        Ok(Self {
            file,
            path: path.to_path_buf(),
            locked: true,
        })
    }

    pub fn file(&self) -> &File {
        &self.file
    }

    pub fn file_mut(&mut self) -> &mut File {
        &mut self.file
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drop all content and rewind to the start of the file.
    pub fn truncate(&mut self) -> Result<(), AppError> {
        self.file
            .set_len(0)
            .and_then(|_| self.file.seek(SeekFrom::Start(0)))
            .map(|_| ())
            .map_err(|err| AppError::io(format!("{}: {}", self.path.display(), err)))
    }

    /// Unlock and close, reporting an unlock failure instead of swallowing it.
    pub fn release(mut self) -> Result<(), AppError> {
        self.locked = false;
        FileExt::unlock(&self.file)
            .map_err(|err| AppError::lock(format!("{}: {}", self.path.display(), err)))?;
        debug!(path = %self.path.display(), "exclusive lock released");
        Ok(())
    }
}

impl Drop for LockedFile {
    fn drop(&mut self) {
        if self.locked {
            let _ = FileExt::unlock(&self.file);
            debug!(path = %self.path.display(), "exclusive lock released on drop");
        }
    }
}

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Datelike, Local, Timelike, Utc};

use crate::error::StorageError;

/// Name of the relocated source file inside a job directory.
pub const ORIGINAL_FILE_NAME: &str = "original.pdf";

/// Name of the trimmed output inside a job directory.
pub const PROCESSED_FILE_NAME: &str = "processed.pdf";

/// Move a file from `src` to `dst`. Uses `rename` first (fast, atomic on same
/// filesystem). Falls back to copy + delete when rename fails, which handles
/// an archive on another device.
fn move_file(src: &Path, dst: &Path) -> Result<(), StorageError> {
    if std::fs::rename(src, dst).is_ok() {
        return Ok(());
    }
    copy_then_remove(src, dst)
}

fn copy_then_remove(src: &Path, dst: &Path) -> Result<(), StorageError> {
    let move_error = |e: std::io::Error| StorageError::MoveFile {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source: e,
    };

    std::fs::copy(src, dst).map_err(move_error)?;
    if let Err(e) = std::fs::remove_file(src) {
        // Leave a single copy behind, not two.
        if let Err(cleanup) = std::fs::remove_file(dst) {
            log::warn!(
                "Could not remove copy {} after failing to delete {}: {}",
                dst.display(),
                src.display(),
                cleanup
            );
        }
        return Err(move_error(e));
    }
    Ok(())
}

/// Date-partitioned archive: `<root>/<YYYY>/<MM>/<DD>/<HH>/<job-id>/`.
pub struct ArchiveStorage {
    root: PathBuf,
    utc: bool,
}

impl ArchiveStorage {
    pub fn new<P: AsRef<Path>>(root: P, utc: bool) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            utc,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Job directory for a file modified at `modified`, truncated to the hour.
    pub fn job_directory(&self, modified: SystemTime, job_id: &str) -> PathBuf {
        let (year, month, day, hour) = if self.utc {
            calendar_hour(DateTime::<Utc>::from(modified))
        } else {
            calendar_hour(DateTime::<Local>::from(modified))
        };

        self.root
            .join(format!("{:04}", year))
            .join(format!("{:02}", month))
            .join(format!("{:02}", day))
            .join(format!("{:02}", hour))
            .join(job_id)
    }

    /// Creates `path` and every missing parent. Succeeds if it already exists.
    pub fn ensure_directory(&self, path: &Path) -> Result<(), StorageError> {
        std::fs::create_dir_all(path).map_err(|e| StorageError::CreateDirectory {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Moves `source` into `job_directory` as [`ORIGINAL_FILE_NAME`].
    pub fn relocate(&self, source: &Path, job_directory: &Path) -> Result<PathBuf, StorageError> {
        let destination = job_directory.join(ORIGINAL_FILE_NAME);
        move_file(source, &destination)?;
        Ok(destination)
    }
}

fn calendar_hour<Tz: chrono::TimeZone>(time: DateTime<Tz>) -> (i32, u32, u32, u32) {
    (time.year(), time.month(), time.day(), time.hour())
}

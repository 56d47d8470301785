use std::path::PathBuf;
use std::time::SystemTime;

use crate::storage::{ArchiveStorage, ORIGINAL_FILE_NAME, PROCESSED_FILE_NAME};
use crate::worker::scanner::IncomingFile;

/// Work item for one accepted incoming file.
#[derive(Debug, Clone)]
pub struct ProcessingJob {
    pub id: String,
    pub source_path: PathBuf,
    pub file_name: String,
    pub modified: SystemTime,
    /// `<root>/<YYYY>/<MM>/<DD>/<HH>/<id>`
    pub archive_directory: PathBuf,
    /// Where the source file lives after relocation.
    pub original_path: PathBuf,
    pub output_path: PathBuf,
}

impl ProcessingJob {
    pub fn new(file: IncomingFile, storage: &ArchiveStorage) -> Self {
        Self::with_id(file, storage, uuid::Uuid::new_v4().to_string())
    }

    fn with_id(file: IncomingFile, storage: &ArchiveStorage, id: String) -> Self {
        let archive_directory = storage.job_directory(file.modified, &id);
        Self {
            original_path: archive_directory.join(ORIGINAL_FILE_NAME),
            output_path: archive_directory.join(PROCESSED_FILE_NAME),
            id,
            source_path: file.path,
            file_name: file.name,
            modified: file.modified,
            archive_directory,
        }
    }
}

#[derive(Debug)]
pub struct JobResult {
    pub job_id: String,
    pub file_name: String,
    pub success: bool,
    pub output_path: Option<PathBuf>,
    pub error: Option<String>,
}

impl JobResult {
    pub fn success(job: &ProcessingJob) -> Self {
        Self {
            job_id: job.id.clone(),
            file_name: job.file_name.clone(),
            success: true,
            output_path: Some(job.output_path.clone()),
            error: None,
        }
    }

    pub fn failure(job: &ProcessingJob, error: String) -> Self {
        Self {
            job_id: job.id.clone(),
            file_name: job.file_name.clone(),
            success: false,
            output_path: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn incoming() -> IncomingFile {
        IncomingFile {
            path: PathBuf::from("/incoming/scan.pdf"),
            name: "scan.pdf".to_string(),
            modified: SystemTime::from(Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap()),
        }
    }

    #[test]
    fn test_job_paths() {
        let storage = ArchiveStorage::new("/scans", true);
        let job = ProcessingJob::with_id(incoming(), &storage, "job-1".to_string());

        assert_eq!(job.source_path, PathBuf::from("/incoming/scan.pdf"));
        assert_eq!(
            job.archive_directory,
            PathBuf::from("/scans/2024/05/06/07/job-1")
        );
        assert_eq!(
            job.original_path,
            PathBuf::from("/scans/2024/05/06/07/job-1/original.pdf")
        );
        assert_eq!(
            job.output_path,
            PathBuf::from("/scans/2024/05/06/07/job-1/processed.pdf")
        );
    }

    #[test]
    fn test_job_ids_are_unique_uuids() {
        let storage = ArchiveStorage::new("/scans", true);
        let a = ProcessingJob::new(incoming(), &storage);
        let b = ProcessingJob::new(incoming(), &storage);

        assert_ne!(a.id, b.id);
        assert_ne!(a.archive_directory, b.archive_directory);
        assert!(uuid::Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn test_job_result_success() {
        let storage = ArchiveStorage::new("/scans", true);
        let job = ProcessingJob::new(incoming(), &storage);
        let result = JobResult::success(&job);

        assert!(result.success);
        assert_eq!(result.job_id, job.id);
        assert_eq!(result.output_path, Some(job.output_path.clone()));
        assert!(result.error.is_none());
    }

    #[test]
    fn test_job_result_failure() {
        let storage = ArchiveStorage::new("/scans", true);
        let job = ProcessingJob::new(incoming(), &storage);
        let result = JobResult::failure(&job, "Test error".to_string());

        assert!(!result.success);
        assert!(result.output_path.is_none());
        assert_eq!(result.error, Some("Test error".to_string()));
    }
}

use std::sync::Arc;

use tracing::{error, info, info_span, warn};

use crate::config::Config;
use crate::error::WorkerError;
use crate::pipeline::{Pipeline, PipelineConfig};
use crate::sanitize;
use crate::storage::ArchiveStorage;
use crate::worker::job::{JobResult, ProcessingJob};
use crate::worker::scanner::{DirectoryScanner, FileFilter};

/// Runs one pass over the source directory.
///
/// Only a failure to list the source directory is returned. Every per-file
/// failure is logged and the batch moves on to the next file.
pub fn run_batch(config: &Config) -> Result<(), WorkerError> {
    BatchRunner::from_config(config).run().map(|_| ())
}

pub struct BatchRunner {
    scanner: DirectoryScanner,
    storage: ArchiveStorage,
    pipeline: Pipeline,
}

impl BatchRunner {
    pub fn from_config(config: &Config) -> Self {
        let filter = FileFilter::new(&config.extension, config.reserved_suffixes.clone());
        Self {
            scanner: DirectoryScanner::new(&config.source_directory, filter),
            storage: ArchiveStorage::new(&config.archive_directory, config.archive.utc),
            pipeline: Pipeline::from_config(Arc::new(PipelineConfig::from_config(config))),
        }
    }

    pub fn run(&self) -> Result<Vec<JobResult>, WorkerError> {
        let _batch_span = info_span!(
            "batch",
            source = %self.scanner.source_directory().display(),
            archive = %self.storage.root().display(),
        )
        .entered();

        let files = self.scanner.scan()?;
        let mut results = Vec::with_capacity(files.len());

        for file in files {
            let job = ProcessingJob::new(file, &self.storage);
            results.push(self.process_job(&job));
        }

        let succeeded = results.iter().filter(|r| r.success).count();
        info!(
            total = results.len(),
            succeeded,
            failed = results.len() - succeeded,
            "batch finished"
        );

        Ok(results)
    }

    /// Creates the job directory, moves the source into it and runs the
    /// pipeline. The source is only touched once its directory exists.
    pub fn process_job(&self, job: &ProcessingJob) -> JobResult {
        let _job_span = info_span!("job", job_id = %job.id, file = %job.file_name).entered();
        info!(modified = ?job.modified, "processing document");

        if let Err(e) = self.storage.ensure_directory(&job.archive_directory) {
            warn!(error = %e, "could not create archive directory, leaving file in place");
            return JobResult::failure(job, e.to_string());
        }

        if let Err(e) = self.storage.relocate(&job.source_path, &job.archive_directory) {
            warn!(error = %e, "could not move document into archive");
            return JobResult::failure(job, e.to_string());
        }

        match self
            .pipeline
            .process_document(&job.original_path, &job.output_path)
        {
            Ok(report) => {
                info!(
                    pages = report.page_count,
                    kept = report.kept_pages.len(),
                    discarded = report.discarded_pages.len(),
                    output = %sanitize::redact_path(&report.output_path),
                    "document processed"
                );
                JobResult::success(job)
            }
            Err(e) => {
                error!(
                    file = %job.file_name,
                    job_id = %job.id,
                    error = %e,
                    "failed to process document"
                );
                JobResult::failure(job, e.to_string())
            }
        }
    }
}

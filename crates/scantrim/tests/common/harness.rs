//! Isolated source and archive directories for batch tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tempfile::TempDir;

use scantrim::config::schema::Config;
use scantrim::worker::{BatchRunner, JobResult};

use super::builders::ConfigBuilder;

pub struct TestHarness {
    temp_dir: TempDir,
    pub source_dir: PathBuf,
    pub archive_dir: PathBuf,
    config: Config,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(|builder| builder)
    }

    /// Creates the harness and lets the caller adjust the config.
    pub fn with_config<F>(customize: F) -> Self
    where
        F: FnOnce(ConfigBuilder) -> ConfigBuilder,
    {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source_dir = temp_dir.path().join("incoming");
        let archive_dir = temp_dir.path().join("scans");
        std::fs::create_dir_all(&source_dir).expect("Failed to create source dir");
        std::fs::create_dir_all(&archive_dir).expect("Failed to create archive dir");

        let builder = ConfigBuilder::new(
            &source_dir.to_string_lossy(),
            &archive_dir.to_string_lossy(),
        );
        let config = customize(builder).build();

        Self {
            temp_dir,
            source_dir,
            archive_dir,
            config,
        }
    }

    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Writes a file into the source directory.
    pub fn write_input(&self, filename: &str, content: &[u8]) -> PathBuf {
        let path = self.source_dir.join(filename);
        std::fs::write(&path, content).expect("Failed to write input file");
        path
    }

    /// Writes a file into the source directory with a fixed modification time.
    pub fn write_input_modified(
        &self,
        filename: &str,
        content: &[u8],
        modified: SystemTime,
    ) -> PathBuf {
        let path = self.write_input(filename, content);
        let file = std::fs::File::options()
            .write(true)
            .open(&path)
            .expect("Failed to open input file");
        file.set_modified(modified)
            .expect("Failed to set modification time");
        path
    }

    pub fn run_batch(&self) -> Vec<JobResult> {
        BatchRunner::from_config(&self.config)
            .run()
            .expect("Batch failed")
    }

    /// Names left in the source directory, sorted.
    pub fn source_entries(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.source_dir)
            .expect("Failed to read source dir")
            .map(|e| {
                e.expect("Failed to read entry")
                    .file_name()
                    .to_string_lossy()
                    .to_string()
            })
            .collect();
        names.sort();
        names
    }

    /// All `<YYYY>/<MM>/<DD>/<HH>/<job-id>` directories in the archive.
    pub fn job_directories(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = walkdir::WalkDir::new(&self.archive_dir)
            .min_depth(5)
            .max_depth(5)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_dir())
            .map(|e| e.into_path())
            .collect();
        dirs.sort();
        dirs
    }

    pub fn job_directory(&self, result: &JobResult) -> PathBuf {
        self.job_directories()
            .into_iter()
            .find(|dir| dir.ends_with(&result.job_id))
            .expect("No archive directory for job")
    }
}

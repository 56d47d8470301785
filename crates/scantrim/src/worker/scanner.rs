use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::WorkerError;

/// A candidate file found in the source directory.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub path: PathBuf,
    pub name: String,
    pub modified: SystemTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Name ends with a suffix owned by another producer.
    ReservedSuffix,
    Hidden,
    WrongExtension,
    Directory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDecision {
    Accept,
    Skip(SkipReason),
}

/// Name-based filters, applied in order: reserved suffix, hidden, extension.
#[derive(Debug, Clone)]
pub struct FileFilter {
    extension: String,
    reserved_suffixes: Vec<String>,
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::new("pdf", vec!["-new.pdf".to_string()])
    }
}

impl FileFilter {
    pub fn new<S: Into<String>>(extension: S, reserved_suffixes: Vec<String>) -> Self {
        Self {
            extension: extension.into(),
            reserved_suffixes,
        }
    }

    /// A reserved suffix only matches when something precedes it, so a file
    /// named exactly `-new.pdf` is still a candidate.
    pub fn classify(&self, name: &str) -> ScanDecision {
        if self
            .reserved_suffixes
            .iter()
            .any(|suffix| name.len() > suffix.len() && name.ends_with(suffix.as_str()))
        {
            return ScanDecision::Skip(SkipReason::ReservedSuffix);
        }

        if name.starts_with('.') {
            return ScanDecision::Skip(SkipReason::Hidden);
        }

        let has_extension = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e == self.extension)
            .unwrap_or(false);
        if !has_extension {
            return ScanDecision::Skip(SkipReason::WrongExtension);
        }

        ScanDecision::Accept
    }
}

pub struct DirectoryScanner {
    source_directory: PathBuf,
    filter: FileFilter,
}

impl DirectoryScanner {
    pub fn new<P: AsRef<Path>>(source_directory: P, filter: FileFilter) -> Self {
        Self {
            source_directory: source_directory.as_ref().to_path_buf(),
            filter,
        }
    }

    pub fn source_directory(&self) -> &Path {
        &self.source_directory
    }

    /// Lists the source directory once, top level only.
    ///
    /// Fails only if the directory itself cannot be read; unreadable entries
    /// are logged and skipped.
    pub fn scan(&self) -> Result<Vec<IncomingFile>, WorkerError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.source_directory)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(WorkerError::ScanFailed {
                        path: self.source_directory.clone(),
                        source: e,
                    });
                }
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy().to_string();

            let decision = if entry.file_type().is_dir() {
                ScanDecision::Skip(SkipReason::Directory)
            } else {
                self.filter.classify(&name)
            };

            match decision {
                ScanDecision::Accept => {}
                ScanDecision::Skip(SkipReason::WrongExtension) => {
                    info!("skipping non-pdf file: {}", name);
                    continue;
                }
                ScanDecision::Skip(reason) => {
                    debug!("skipping {} ({:?})", name, reason);
                    continue;
                }
            }

            let modified = match entry.metadata().map(|m| m.modified()) {
                Ok(Ok(modified)) => modified,
                Ok(Err(e)) => {
                    warn!("Skipping {}: no modification time: {}", name, e);
                    continue;
                }
                Err(e) => {
                    warn!("Skipping {}: {}", name, e);
                    continue;
                }
            };

            files.push(IncomingFile {
                path: entry.path().to_path_buf(),
                name,
                modified,
            });
        }

        info!(
            "Scanned {} documents in {}",
            files.len(),
            self.source_directory.display()
        );
        Ok(files)
    }
}

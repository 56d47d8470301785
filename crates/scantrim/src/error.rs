use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScantrimError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Processing error: {0}")]
    Process(#[from] ProcessError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Schema validation failed: {errors}")]
    SchemaValidation { errors: String },
}

/// Failures of the per-document pipeline, one variant per pipeline step.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to parse PDF '{path}': {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("PDF structure is invalid: {0}")]
    Validation(String),

    #[error("Failed to optimize PDF structure: {0}")]
    Optimization(String),

    #[error("Failed to extract image {image} on page {page}: {reason}")]
    Extraction {
        page: u32,
        image: usize,
        reason: String,
    },

    #[error("Failed to decode image {image} on page {page} as JPEG: {reason}")]
    Decode {
        page: u32,
        image: usize,
        reason: String,
    },

    #[error("Failed to write '{path}': {reason}")]
    Write { path: PathBuf, reason: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move file from '{from}' to '{to}': {source}")]
    MoveFile {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Directory scan failed for '{path}': {source}")]
    ScanFailed {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

pub type Result<T> = std::result::Result<T, ScantrimError>;

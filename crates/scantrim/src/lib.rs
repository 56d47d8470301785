pub mod config;
pub mod error;
pub mod pipeline;
pub mod processor;
pub mod sanitize;
pub mod storage;
pub mod worker;

pub use config::{load_config, load_config_from_str, Config, PageAggregation};
pub use error::{ConfigError, ProcessError, Result, ScantrimError, StorageError, WorkerError};
pub use pipeline::{DocumentReport, Pipeline, PipelineConfig};
pub use processor::{should_keep_page, CoverageEstimator, CoverageResult, RetentionPolicy};
pub use storage::ArchiveStorage;
pub use worker::{run_batch, BatchRunner, JobResult, ProcessingJob};

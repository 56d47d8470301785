pub mod config;
pub mod error;
pub mod report;
pub mod runner;

pub use config::PipelineConfig;
pub use error::PipelineWarning;
pub use report::{DocumentReport, ImageCoverage};
pub use runner::Pipeline;

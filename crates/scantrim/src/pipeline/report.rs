use std::path::PathBuf;

use crate::processor::coverage::CoverageResult;

use super::error::PipelineWarning;

/// Coverage and decision for one evaluated page image.
#[derive(Debug, Clone)]
pub struct ImageCoverage {
    pub page: u32,
    pub image: usize,
    pub result: CoverageResult,
    /// Outcome of the retention threshold for this image alone.
    pub keep_image: bool,
}

/// Outcome of a successful pipeline run.
#[derive(Debug, Clone)]
pub struct DocumentReport {
    pub output_path: PathBuf,
    pub page_count: u32,
    pub kept_pages: Vec<u32>,
    pub discarded_pages: Vec<u32>,
    pub images: Vec<ImageCoverage>,
    pub warnings: Vec<PipelineWarning>,
}

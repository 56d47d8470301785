use thiserror::Error;

/// Problems that do not fail the document.
#[derive(Error, Debug, Clone)]
pub enum PipelineWarning {
    #[error("Failed to write coverage mask for image {image} on page {page}: {error}")]
    MaskWriteFailed {
        page: u32,
        image: usize,
        error: String,
    },
}

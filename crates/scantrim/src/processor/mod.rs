pub mod coverage;
pub mod image;
pub mod pdf;
pub mod retention;

pub use coverage::{CoverageEstimator, CoverageResult, PixelBounds};
pub use pdf::{ExtractedImage, ImageRef, ScannedDocument, TrimSummary};
pub use retention::{should_keep_page, RetentionPolicy, RetentionSet};

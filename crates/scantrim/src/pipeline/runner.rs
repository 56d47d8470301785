use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, info_span, warn};

use crate::error::ProcessError;
use crate::processor::coverage::{CoverageEstimator, CoverageResult};
use crate::processor::image::{decode_jpeg, mask_file_name, write_mask};
use crate::processor::pdf::ScannedDocument;
use crate::processor::retention::RetentionPolicy;
use crate::sanitize;

use super::config::PipelineConfig;
use super::error::PipelineWarning;
use super::report::{DocumentReport, ImageCoverage};

pub struct Pipeline {
    config: Arc<PipelineConfig>,
    estimator: CoverageEstimator,
    policy: RetentionPolicy,
}

impl Pipeline {
    pub fn from_config(config: Arc<PipelineConfig>) -> Self {
        let estimator = CoverageEstimator::new(config.ink_threshold);
        let policy = RetentionPolicy::new(config.threshold_percent, config.aggregation);

        Self {
            config,
            estimator,
            policy,
        }
    }

    /// Runs parse, validate, optimize, page scan and trim for one document.
    ///
    /// The first failing step aborts the document and its error is returned
    /// as is; `dest` is only written by the final step.
    pub fn process_document(
        &self,
        source: &Path,
        dest: &Path,
    ) -> Result<DocumentReport, ProcessError> {
        let filename = sanitize::redact_path(source);
        let _pipeline_span = info_span!("pipeline", file = %filename).entered();

        let mut document = {
            let _step = info_span!("parse").entered();
            ScannedDocument::parse(source)?
        };

        {
            let _step = info_span!("validate").entered();
            document.validate()?;
        }

        {
            let _step = info_span!("optimize").entered();
            document.optimize()?;
        }

        info!(
            pages = document.page_count(),
            size = document.file_size(),
            objects = document.object_count(),
            "validated pdf"
        );

        let mut report = DocumentReport {
            output_path: dest.to_path_buf(),
            page_count: document.page_count(),
            kept_pages: Vec::new(),
            discarded_pages: Vec::new(),
            images: Vec::new(),
            warnings: Vec::new(),
        };

        {
            let _step = info_span!("scan_pages").entered();
            self.step_scan_pages(&mut document, dest, &mut report)?;
        }

        info!(
            retention = ?document.retention().iter().collect::<Vec<_>>(),
            "final retention map"
        );

        let summary = {
            let _step = info_span!("trim_and_write").entered();
            document.trim_and_write(dest)?
        };

        info!(
            kept = summary.kept_pages.len(),
            discarded = ?summary.discarded_pages,
            bytes = summary.bytes_written,
            output = %sanitize::redact_path(dest),
            "wrote trimmed pdf"
        );

        report.kept_pages = summary.kept_pages;
        report.discarded_pages = summary.discarded_pages;
        Ok(report)
    }

    fn step_scan_pages(
        &self,
        document: &mut ScannedDocument,
        dest: &Path,
        report: &mut DocumentReport,
    ) -> Result<(), ProcessError> {
        for page in 1..=document.page_count() {
            let image_count = document.page_images(page).len();
            info!(page, images = image_count, "processing page");

            for index in 0..image_count {
                debug!(page, image = index, "processing image");

                let extracted = document.extract_image(page, index)?;
                let decoded = decode_jpeg(&extracted)?;
                debug!(
                    page,
                    image = index,
                    width = decoded.width(),
                    height = decoded.height(),
                    "decoded jpeg"
                );

                let result = self.estimate(&decoded, page, index, dest, report);
                let keep_image = self.policy.should_keep_page(result.coverage_percent);
                let keep_page = document
                    .retention_mut()
                    .record(&self.policy, page, keep_image);

                info!(
                    page,
                    image = index,
                    bounds = %result.bounds,
                    coverage = result.coverage_percent,
                    keep_image,
                    keep_page,
                    "calculated coverage"
                );

                report.images.push(ImageCoverage {
                    page,
                    image: index,
                    result,
                    keep_image,
                });
            }
        }

        Ok(())
    }

    fn estimate(
        &self,
        decoded: &image::DynamicImage,
        page: u32,
        index: usize,
        dest: &Path,
        report: &mut DocumentReport,
    ) -> CoverageResult {
        if !self.config.write_masks {
            return self.estimator.estimate_coverage(decoded);
        }

        let (result, mask) = self.estimator.estimate_coverage_with_mask(decoded);
        let mask_dir = dest.parent().unwrap_or_else(|| Path::new("."));
        let mask_path = mask_dir.join(mask_file_name(page, index));
        if let Err(e) = write_mask(&mask, &mask_path) {
            warn!(page, image = index, error = %e, "failed writing coverage mask");
            report.warnings.push(PipelineWarning::MaskWriteFailed {
                page,
                image: index,
                error: e.to_string(),
            });
        }
        result
    }
}

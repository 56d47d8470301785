//! Coverage command - inspect how a single scan image is classified.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use scantrim::config::Config;
use scantrim::processor::image::{decode_jpeg, write_mask};
use scantrim::processor::{CoverageEstimator, ExtractedImage, RetentionPolicy};

#[derive(Args)]
pub struct CoverageArgs {
    /// JPEG image to measure
    image: PathBuf,

    /// Write the ink mask (black = ink) to this PNG
    #[arg(short, long)]
    mask: Option<PathBuf>,
}

pub fn run(args: CoverageArgs, config: &Config) -> anyhow::Result<()> {
    let data = std::fs::read(&args.image)
        .with_context(|| format!("Failed to read {}", args.image.display()))?;
    let decoded = decode_jpeg(&ExtractedImage {
        page: 1,
        index: 0,
        filters: Vec::new(),
        data,
    })?;

    let estimator = CoverageEstimator::new(config.coverage.ink_threshold);
    let result = match &args.mask {
        Some(path) => {
            let (result, mask) = estimator.estimate_coverage_with_mask(&decoded);
            write_mask(&mask, path)
                .with_context(|| format!("Failed to write mask {}", path.display()))?;
            result
        }
        None => estimator.estimate_coverage(&decoded),
    };

    let policy = RetentionPolicy::new(
        config.retention.threshold_percent,
        config.retention.aggregation,
    );
    let decision = if policy.should_keep_page(result.coverage_percent) {
        "keep"
    } else {
        "discard"
    };

    println!("bounds:   {}", result.bounds);
    println!("ink:      {} pixels", result.ink_pixels);
    println!("coverage: {:.2}%", result.coverage_percent);
    println!("decision: {}", decision);

    Ok(())
}

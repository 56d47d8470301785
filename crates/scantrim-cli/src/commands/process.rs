//! Process command - trim one PDF without moving it anywhere.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use scantrim::config::Config;
use scantrim::pipeline::{Pipeline, PipelineConfig};

#[derive(Args)]
pub struct ProcessArgs {
    /// Scanned PDF to read
    input: PathBuf,

    /// Where to write the trimmed PDF
    output: PathBuf,
}

pub fn run(args: ProcessArgs, config: &Config) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let pipeline = Pipeline::from_config(Arc::new(PipelineConfig::from_config(config)));
    let report = pipeline.process_document(&args.input, &args.output)?;

    println!("pages:     {}", report.page_count);
    println!("kept:      {:?}", report.kept_pages);
    println!("discarded: {:?}", report.discarded_pages);
    for image in &report.images {
        println!(
            "  page {} image {}: {:.2}% ({})",
            image.page,
            image.image,
            image.result.coverage_percent,
            if image.keep_image { "keep" } else { "blank" }
        );
    }
    for warning in &report.warnings {
        println!("warning: {}", warning);
    }
    println!("output:    {}", report.output_path.display());

    Ok(())
}

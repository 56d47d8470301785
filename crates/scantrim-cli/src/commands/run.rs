use anyhow::Context;

use scantrim::config::Config;
use scantrim::worker::run_batch;

pub fn run(config: &Config) -> anyhow::Result<()> {
    run_batch(config).with_context(|| {
        format!(
            "Failed to list source directory {}",
            config.source_directory
        )
    })
}

use crate::config::schema::{CoverageConfig, PageAggregation, RetentionConfig};
use crate::config::Config;

pub struct PipelineConfig {
    pub ink_threshold: u16,
    pub threshold_percent: f64,
    pub aggregation: PageAggregation,
    pub write_masks: bool,
}

impl PipelineConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            ink_threshold: config.coverage.ink_threshold,
            threshold_percent: config.retention.threshold_percent,
            aggregation: config.retention.aggregation,
            write_masks: config.diagnostics.write_masks,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let coverage = CoverageConfig::default();
        let retention = RetentionConfig::default();
        Self {
            ink_threshold: coverage.ink_threshold,
            threshold_percent: retention.threshold_percent,
            aggregation: retention.aggregation,
            write_masks: false,
        }
    }
}

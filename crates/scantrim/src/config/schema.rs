use serde::{Deserialize, Serialize};

/// Near-white cutoff on the 16-bit channel scale (~91.6% brightness).
pub const DEFAULT_INK_THRESHOLD: u16 = 60000;

/// Pages whose coverage falls below this percentage are considered blank.
pub const DEFAULT_BLANK_THRESHOLD_PERCENT: f64 = 1.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_source_directory")]
    pub source_directory: String,
    #[serde(default = "default_archive_directory")]
    pub archive_directory: String,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_reserved_suffixes")]
    pub reserved_suffixes: Vec<String>,
    #[serde(default)]
    pub coverage: CoverageConfig,
    #[serde(default)]
    pub retention: RetentionConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_source_directory() -> String {
    "/home/printer/incoming".to_string()
}

fn default_archive_directory() -> String {
    "/home/printer/scans".to_string()
}

fn default_extension() -> String {
    "pdf".to_string()
}

fn default_reserved_suffixes() -> Vec<String> {
    vec!["-new.pdf".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            source_directory: default_source_directory(),
            archive_directory: default_archive_directory(),
            extension: default_extension(),
            reserved_suffixes: default_reserved_suffixes(),
            coverage: CoverageConfig::default(),
            retention: RetentionConfig::default(),
            archive: ArchiveConfig::default(),
            diagnostics: DiagnosticsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageConfig {
    /// A pixel counts as ink when any RGB channel is below this value.
    #[serde(default = "default_ink_threshold")]
    pub ink_threshold: u16,
}

fn default_ink_threshold() -> u16 {
    DEFAULT_INK_THRESHOLD
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            ink_threshold: DEFAULT_INK_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionConfig {
    #[serde(default = "default_threshold_percent")]
    pub threshold_percent: f64,
    #[serde(default)]
    pub aggregation: PageAggregation,
}

fn default_threshold_percent() -> f64 {
    DEFAULT_BLANK_THRESHOLD_PERCENT
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            threshold_percent: DEFAULT_BLANK_THRESHOLD_PERCENT,
            aggregation: PageAggregation::default(),
        }
    }
}

/// How the per-image decisions of a page with several images are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageAggregation {
    /// Keep the page only if every image on it passes.
    #[default]
    All,
    /// Keep the page if at least one image passes.
    Any,
    /// The last image evaluated on the page decides.
    Last,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Partition the archive by UTC instead of local time.
    #[serde(default)]
    pub utc: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Write a black/white coverage mask PNG for every evaluated image.
    #[serde(default)]
    pub write_masks: bool,
}

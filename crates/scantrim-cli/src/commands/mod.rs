pub mod coverage;
pub mod process;
pub mod run;

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use scantrim::config::{load_config as load_config_file, Config};

/// `<config dir>/scantrim/config.json`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scantrim").join("config.json"))
}

/// Loads `path` if given, else the default config file if it exists, else
/// the built-in defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = path {
        return load_config_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    match default_config_path() {
        Some(path) if path.is_file() => {
            debug!(path = %path.display(), "using default config file");
            load_config_file(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))
        }
        _ => {
            debug!("no config file, using defaults");
            Ok(Config::default())
        }
    }
}

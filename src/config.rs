//! Configuration loading.
//!
//! Precedence, lowest first: built-in defaults, `insightdash.toml` (or the
//! file passed with `--config`), `INSIGHTDASH_*` environment variables, then
//! command-line flags (applied by the command handlers).

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::path::{Path, PathBuf};

use insightdash_export::ExportConfig;
use insightdash_web::ServerConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "insightdash.toml";

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse config {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
}

/// Complete InsightDash configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Apply environment overrides to every section.
    #[must_use]
    pub fn with_env_overrides<F>(self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            server: self.server.with_env_overrides(&lookup),
            export: self.export.with_env_overrides(&lookup),
        }
    }
}

/// Load configuration from `explicit`, or from [`DEFAULT_CONFIG_FILE`] when it
/// exists, then apply environment overrides read through `lookup`.
///
/// # Errors
///
/// Returns an error if an explicitly named file is missing, or if a config
/// file cannot be read or parsed.
pub fn load_config<F>(explicit: Option<&Path>, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = match explicit {
        Some(path) => load_toml_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                load_toml_file(default_path)?
            } else {
                debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                Config::default()
            }
        }
    };

    Ok(config.with_env_overrides(lookup))
}

fn load_toml_file(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    debug!("Loaded config from {}", path.display());

    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

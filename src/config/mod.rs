//! Reporting configuration
//!
//! Configuration is read once at session start, either from a YAML file or
//! from the environment. Malformed pieces are recovered leniently; only
//! unreadable/unparsable files surface an error to the caller.

use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::session::SeverityFlags;


/// Environment variable holding comma-separated severity-action flags
pub const FLAGS_ENV: &str = "VIGIL_FLAGS";
/// Environment variable holding the reporting-detail configuration string
pub const DETAILS_ENV: &str = "VIGIL_REPORTING_DETAILS";
/// Environment variable holding the output sink list (path-separated)
pub const FILE_ENV: &str = "VIGIL_FILE";

/// Session-start configuration for the reporting subsystem
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportingConfig {
    /// Fatal/print switches over the severity set
    #[serde(default)]
    pub flags: SeverityFlags,

    /// Reporting-detail string, e.g. `"smart,demux*:all"`
    #[serde(default)]
    pub reporting_details: Option<String>,

    /// Output sinks: `stdout`, `stderr` or file paths; empty means stdout
    #[serde(default)]
    pub outputs: Vec<String>,
}

impl ReportingConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: ReportingConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Build configuration from the `VIGIL_*` environment variables
    pub fn from_env() -> Self {
        let mut config = ReportingConfig::default();

        if let Ok(value) = env::var(FLAGS_ENV) {
            if !value.is_empty() {
                config.flags = SeverityFlags::parse(&value);
            }
        }
        if let Ok(value) = env::var(DETAILS_ENV) {
            if !value.is_empty() {
                config.reporting_details = Some(value);
            }
        }
        if let Ok(value) = env::var(FILE_ENV) {
            config.outputs = env::split_paths(&value)
                .map(|path| path.display().to_string())
                .filter(|target| !target.is_empty())
                .collect();
        }

        config
    }
}

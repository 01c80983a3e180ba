//! CLI configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Identity service URL (e.g., http://iam.seagate.com:8080).
    #[serde(default = "default_iam_endpoint")]
    pub iam_endpoint: String,

    /// Token service URL (e.g., http://sts.seagate.com:8080).
    #[serde(default = "default_sts_endpoint")]
    pub sts_endpoint: String,

    /// Region used when signing requests.
    #[serde(default = "default_region")]
    pub region: String,

    /// Output format.
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_iam_endpoint() -> String {
    "http://iam.seagate.com:8080".to_string()
}

fn default_sts_endpoint() -> String {
    "http://sts.seagate.com:8080".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            iam_endpoint: default_iam_endpoint(),
            sts_endpoint: default_sts_endpoint(),
            region: default_region(),
            output_format: OutputFormat::default(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from the default file.
    ///
    /// Without a home directory there is no file and the defaults apply.
    pub fn load() -> crate::CliResult<Self> {
        Self::config_path().map_or_else(|| Ok(Self::default()), |path| Self::load_from(&path))
    }

    /// Loads configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load_from(path: &Path) -> crate::CliResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content).map_err(|e| {
                crate::CliError::Config(format!("failed to parse {}: {e}", path.display()))
            })?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Gets the configuration file path.
    pub fn config_path() -> Option<PathBuf> {
        dirs_next::home_dir().map(|home| home.join(".iamcli").join("config.toml"))
    }

    /// Resolves the service endpoints, preferring command-line overrides.
    pub fn endpoints(
        &self,
        iam_override: Option<&str>,
        sts_override: Option<&str>,
        region_override: Option<&str>,
    ) -> Endpoints {
        Endpoints {
            iam: iam_override.map_or_else(|| self.iam_endpoint.clone(), str::to_string),
            sts: sts_override.map_or_else(|| self.sts_endpoint.clone(), str::to_string),
            region: region_override.map_or_else(|| self.region.clone(), str::to_string),
        }
    }
}

/// Effective service endpoints for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Identity service base URL.
    pub iam: String,
    /// Token service base URL.
    pub sts: String,
    /// Signing region.
    pub region: String,
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
    /// Quiet (status messages only).
    Quiet,
}

impl OutputFormat {
    /// Format for data the service returns only once (secret keys,
    /// temporary credentials); quiet output falls back to a table.
    #[must_use]
    pub const fn visible(self) -> Self {
        match self {
            Self::Quiet => Self::Table,
            other => other,
        }
    }
}

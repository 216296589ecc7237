//! Configuration management.
//!
//! Settings are layered: command-line flag, then environment variable (both
//! handled by clap), then the TOML config file, then built-in defaults.

use anyhow::{bail, Context as _, Result};
use directories::ProjectDirs;
use dshield_client::{OpenCtiConfig, DEFAULT_FEED_URL, DEFAULT_LABEL_COLOR, DEFAULT_SCORE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::args::Cli;

/// Default export file for test mode
pub const DEFAULT_OUTPUT: &str = "dshield_export.json";

/// Contents of the config file. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// OpenCTI base URL.
    pub opencti_url: Option<String>,

    /// OpenCTI API token.
    pub opencti_token: Option<String>,

    /// Verify the OpenCTI TLS certificate.
    pub verify_ssl: Option<bool>,

    /// Score attached to observables.
    pub score: Option<u8>,

    /// DShield API base URL.
    pub feed_url: Option<String>,

    /// Export file written in test mode.
    pub output: Option<PathBuf>,

    /// Color for labels created on OpenCTI.
    pub label_color: Option<String>,

    /// Tag every observable with the "dshield" label.
    #[serde(default = "default_true")]
    pub source_label: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            opencti_url: None,
            opencti_token: None,
            verify_ssl: None,
            score: None,
            feed_url: None,
            output: None,
            label_color: None,
            source_label: true,
        }
    }
}

impl Config {
    /// Get the default config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("org", "dshield", "dshield-connector")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;

        Ok(config)
    }
}

/// Effective settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// DShield API base URL
    pub feed_url: String,

    /// Export file written in test mode
    pub output: PathBuf,

    /// OpenCTI base URL
    pub opencti_url: Option<String>,

    /// OpenCTI API token
    pub opencti_token: Option<String>,

    /// Verify the OpenCTI TLS certificate
    pub verify_ssl: bool,

    /// Score attached to observables
    pub score: u8,

    /// Color for new labels
    pub label_color: String,

    /// Tag every observable with the "dshield" label
    pub source_label: bool,
}

impl Settings {
    /// Merge command-line/environment values over the config file.
    pub fn resolve(cli: &Cli, config: Config) -> Self {
        Self {
            feed_url: cli
                .feed_url
                .clone()
                .or(config.feed_url)
                .unwrap_or_else(|| DEFAULT_FEED_URL.to_string()),
            output: cli
                .output
                .clone()
                .or(config.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            opencti_url: cli.opencti_url.clone().or(config.opencti_url),
            opencti_token: cli.opencti_token.clone().or(config.opencti_token),
            verify_ssl: cli.verify_ssl.or(config.verify_ssl).unwrap_or(false),
            score: cli.score.or(config.score).unwrap_or(DEFAULT_SCORE),
            label_color: cli
                .label_color
                .clone()
                .or(config.label_color)
                .unwrap_or_else(|| DEFAULT_LABEL_COLOR.to_string()),
            source_label: !cli.no_source_label && config.source_label,
        }
    }

    /// Platform client settings; URL and token are required.
    pub fn opencti(&self) -> Result<OpenCtiConfig> {
        let Some(url) = self.opencti_url.as_deref().filter(|u| !u.trim().is_empty()) else {
            bail!(
                "OpenCTI URL required in platform mode.\n\n\
                 Set it with --opencti-url, the OPENCTI_API_URL environment variable \
                 or opencti_url in the config file, or run with --test to write a file."
            );
        };
        let Some(token) = self.opencti_token.as_deref().filter(|t| !t.trim().is_empty()) else {
            bail!(
                "OpenCTI API token required in platform mode.\n\n\
                 Set it with --opencti-token, the OPENCTI_API_KEY environment variable \
                 or opencti_token in the config file."
            );
        };

        Ok(OpenCtiConfig::new(url, token)
            .verify_ssl(self.verify_ssl)
            .score(self.score)
            .label_color(self.label_color.clone()))
    }
}

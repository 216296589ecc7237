//! Command-line argument definitions using clap.

use clap::builder::BoolishValueParser;
use clap::Parser;
use std::fmt;
use std::path::PathBuf;

/// DShield intel feed importer for OpenCTI
///
/// Fetches the DShield intel feed, labels every reported address and
/// registers labels and IPv4 observables with OpenCTI. Use --test to write
/// the result to a JSON file instead.
#[derive(Parser, Debug, Clone)]
#[command(name = "dshield-connector")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run in test mode: write a JSON export, no OpenCTI integration
    #[arg(short, long)]
    pub test: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Export file written in test mode
    #[arg(short, long, env = "DSHIELD_OUTPUT")]
    pub output: Option<PathBuf>,

    /// DShield API base URL
    #[arg(long, env = "DSHIELD_FEED_URL")]
    pub feed_url: Option<String>,

    /// OpenCTI base URL
    #[arg(long, env = "OPENCTI_API_URL")]
    pub opencti_url: Option<String>,

    /// OpenCTI API token
    #[arg(long, env = "OPENCTI_API_KEY", hide_env_values = true)]
    pub opencti_token: Option<String>,

    /// Verify the OpenCTI TLS certificate
    #[arg(
        long,
        env = "OPENCTI_VERIFY_SSL",
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub verify_ssl: Option<bool>,

    /// Score (0-100) attached to created observables
    #[arg(long, env = "DSHIELD_CONFIDENCE_LEVEL", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub score: Option<u8>,

    /// Color for labels created on OpenCTI
    #[arg(long)]
    pub label_color: Option<String>,

    /// Do not tag every observable with the "dshield" label
    #[arg(long)]
    pub no_source_label: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, env = "DSHIELD_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Sink selected by the flags; fixed for the whole run
    #[must_use]
    pub const fn run_mode(&self) -> RunMode {
        if self.test {
            RunMode::File
        } else {
            RunMode::Platform
        }
    }
}

/// Where the export document goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Write the document to a local file
    File,
    /// Register labels and observables with OpenCTI
    Platform,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Platform => write!(f, "platform"),
        }
    }
}

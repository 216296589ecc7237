//! CLI argument parsing and run orchestration.

pub mod args;

use anyhow::{Context as _, Result};
use args::{Cli, RunMode};
use clap::Parser;
use dshield_client::{DshieldClient, OpenCtiClient};
use dshield_core::{ExportAssembler, LabelClassifier};
use tracing::{info, warn};

use crate::config::{Config, Settings};
use crate::logging;
use crate::sink::{DeliveryReport, FileSink, PlatformSink};

/// Label attached to every observable unless disabled
pub const SOURCE_LABEL: &str = "dshield";

/// What a run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Sink used
    pub mode: RunMode,
    /// Feed entries received
    pub records: usize,
    /// Entries dropped for an invalid address
    pub skipped: usize,
    /// Observables in the export document
    pub objects: usize,
    /// Distinct labels in the export document
    pub labels: usize,
    /// Platform outcome, in platform mode
    pub delivery: Option<DeliveryReport>,
}

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.debug);

    let summary = execute(cli).await?;
    info!(
        mode = %summary.mode,
        records = summary.records,
        objects = summary.objects,
        skipped = summary.skipped,
        "connector run completed"
    );
    Ok(())
}

/// Fetch, transform and deliver once.
///
/// Skipped records and per-item platform failures are reported in the
/// summary; only configuration, fetch and file errors fail the run.
pub async fn execute(cli: Cli) -> Result<RunSummary> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let settings = Settings::resolve(&cli, config);
    let mode = cli.run_mode();

    // settle platform settings before spending a feed download on them
    let opencti = match mode {
        RunMode::Platform => Some(settings.opencti()?),
        RunMode::File => None,
    };

    info!(mode = %mode, feed = %settings.feed_url, "fetching data from DShield");
    let feed = DshieldClient::builder()
        .base_url(&settings.feed_url)
        .build()
        .context("invalid DShield feed URL")?;
    let records = feed
        .feed()
        .intel()
        .await
        .context("failed to fetch DShield intel feed")?;
    if records.is_empty() {
        warn!("no data received from DShield");
    }

    let classifier = if settings.source_label {
        LabelClassifier::with_source_label(SOURCE_LABEL)
    } else {
        LabelClassifier::new()
    };
    let assembly = ExportAssembler::new(classifier).assemble(&records);
    let document = assembly.document;
    if document.is_empty() && !records.is_empty() {
        warn!(records = records.len(), "every feed record was skipped");
    }
    info!(
        labels = document.labels.len(),
        objects = document.objects.len(),
        skipped = assembly.skipped.len(),
        "export assembled"
    );

    let delivery = match opencti {
        None => {
            FileSink::new(&settings.output)
                .write(&document)
                .with_context(|| format!("failed to write {}", settings.output.display()))?;
            None
        }
        Some(opencti) => {
            let client = OpenCtiClient::new(opencti).context("invalid OpenCTI settings")?;
            client
                .prepare()
                .await
                .context("failed to register DShield identity with OpenCTI")?;
            Some(PlatformSink::new(client).deliver(&document).await)
        }
    };

    Ok(RunSummary {
        mode,
        records: records.len(),
        skipped: assembly.skipped.len(),
        objects: document.objects.len(),
        labels: document.labels.len(),
        delivery,
    })
}

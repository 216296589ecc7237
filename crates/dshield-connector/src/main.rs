//! dshield-connector - DShield intel feed importer
//!
//! Fetches the DShield intel feed and either writes an export file or
//! registers everything with OpenCTI.

use anyhow::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dshield_connector::run().await
}

//! Intel feed endpoints.

use crate::DshieldClient;
use dshield_core::{FeedRecord, Result};
use tracing::info;

/// Intel feed endpoints
pub struct FeedApi<'a> {
    client: &'a DshieldClient,
}

impl<'a> FeedApi<'a> {
    pub(crate) const fn new(client: &'a DshieldClient) -> Self {
        Self { client }
    }

    /// Fetch the complete intel feed
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let records = client.feed().intel().await?;
    /// println!("{} entries", records.len());
    /// ```
    pub async fn intel(&self) -> Result<Vec<FeedRecord>> {
        let records: Vec<FeedRecord> = self.client.get("/api/intelfeed").await?;
        info!(entries = records.len(), "fetched DShield intel feed");
        Ok(records)
    }
}

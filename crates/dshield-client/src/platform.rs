//! The seam between the connector and an intel platform.

use async_trait::async_trait;
use dshield_core::{Label, Result};
use serde::{Deserialize, Serialize};

/// A label as known to the platform
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelHandle {
    /// Platform id
    pub id: String,
    /// Label text as stored on the platform
    pub value: String,
}

/// An observable as known to the platform
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectHandle {
    /// Platform id
    pub id: String,
}

/// Idempotent upserts against an intel platform.
///
/// Calling either method twice with the same arguments must return the
/// existing entity rather than create a duplicate.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Create the label, or return the existing one with the same name
    async fn create_or_get_label(&self, name: &Label) -> Result<LabelHandle>;

    /// Create an IPv4 observable carrying `labels`, or return the existing one
    async fn create_or_get_ipv4_object(
        &self,
        address: &str,
        labels: &[LabelHandle],
    ) -> Result<ObjectHandle>;
}

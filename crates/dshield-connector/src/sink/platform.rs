use dshield_client::{LabelHandle, Platform};
use dshield_core::{ExportDocument, Label};
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

/// Outcome of a platform delivery; per-item failures never abort a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Labels registered (created or found)
    pub labels_registered: usize,
    /// Labels the platform rejected
    pub labels_failed: Vec<Label>,
    /// Observables registered
    pub objects_registered: usize,
    /// Addresses the platform rejected
    pub objects_failed: Vec<String>,
    /// Addresses not submitted because none of their labels could be registered
    pub objects_skipped: Vec<String>,
}

impl DeliveryReport {
    /// Returns true if every label and object made it to the platform
    pub fn is_complete(&self) -> bool {
        self.labels_failed.is_empty()
            && self.objects_failed.is_empty()
            && self.objects_skipped.is_empty()
    }
}

/// Registers an export document with an intel platform
pub struct PlatformSink<P> {
    platform: P,
}

impl<P: Platform> PlatformSink<P> {
    /// Sink submitting through `platform`
    pub const fn new(platform: P) -> Self {
        Self { platform }
    }

    /// Upsert every label, then every object with the labels that succeeded.
    ///
    /// Failed label references are dropped from an object. An object whose
    /// labels all failed is not submitted; an object without labels is.
    pub async fn deliver(&self, document: &ExportDocument) -> DeliveryReport {
        let mut report = DeliveryReport::default();
        let mut handles: HashMap<&Label, LabelHandle> = HashMap::new();

        for label in &document.labels {
            match self.platform.create_or_get_label(label).await {
                Ok(handle) => {
                    debug!(label = %label, id = %handle.id, "label registered");
                    handles.insert(label, handle);
                    report.labels_registered += 1;
                }
                Err(e) => {
                    error!(label = %label, error = %e, "failed to register label");
                    report.labels_failed.push(label.clone());
                }
            }
        }

        for object in &document.objects {
            let resolved: Vec<LabelHandle> = object
                .labels
                .iter()
                .filter_map(|label| handles.get(label).cloned())
                .collect();

            if resolved.is_empty() && !object.labels.is_empty() {
                warn!(ip = %object.value, "skipping observable, none of its labels were registered");
                report.objects_skipped.push(object.value.clone());
                continue;
            }
            if resolved.len() < object.labels.len() {
                warn!(
                    ip = %object.value,
                    missing = object.labels.len() - resolved.len(),
                    "registering observable without its failed labels"
                );
            }

            match self
                .platform
                .create_or_get_ipv4_object(&object.value, &resolved)
                .await
            {
                Ok(handle) => {
                    debug!(ip = %object.value, id = %handle.id, "observable registered");
                    report.objects_registered += 1;
                }
                Err(e) => {
                    error!(ip = %object.value, error = %e, "failed to register observable");
                    report.objects_failed.push(object.value.clone());
                }
            }
        }

        info!(
            labels = report.labels_registered,
            labels_failed = report.labels_failed.len(),
            objects = report.objects_registered,
            objects_failed = report.objects_failed.len(),
            objects_skipped = report.objects_skipped.len(),
            "platform delivery finished"
        );
        report
    }
}

use super::normalize::normalize;
use super::LabelClassifier;
use crate::types::{ExportDocument, FeedRecord, NormalizedObject};
use std::collections::HashSet;
use tracing::{debug, warn};

/// A feed record that produced no object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Position in the feed
    pub index: usize,
    /// Address as received
    pub ip: String,
    /// Why the record was dropped
    pub reason: String,
}

/// Output of [`ExportAssembler::assemble`]
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    /// The export document
    pub document: ExportDocument,
    /// Records dropped along the way, in feed order
    pub skipped: Vec<SkippedRecord>,
}

/// Turns a whole feed into one [`ExportDocument`]
#[derive(Debug, Clone, Default)]
pub struct ExportAssembler {
    classifier: LabelClassifier,
}

impl ExportAssembler {
    /// Create an assembler using `classifier` for every record
    #[must_use]
    pub const fn new(classifier: LabelClassifier) -> Self {
        Self { classifier }
    }

    /// Classify and normalize every record, in order.
    ///
    /// Records with an invalid address are reported and skipped; they never
    /// abort assembly and contribute no labels.
    #[must_use]
    pub fn assemble(&self, records: &[FeedRecord]) -> Assembly {
        let mut objects = Vec::with_capacity(records.len());
        let mut skipped = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let labels = self.classifier.classify(record);
            match normalize(record, labels) {
                Ok(object) => objects.push(object),
                Err(e) => {
                    warn!(index, ip = %record.ip, error = %e, "skipping feed record");
                    skipped.push(SkippedRecord {
                        index,
                        ip: record.ip.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let document: ExportDocument = objects.into_iter().collect();
        debug!(
            records = records.len(),
            objects = document.objects.len(),
            labels = document.labels.len(),
            skipped = skipped.len(),
            "assembled export"
        );

        Assembly { document, skipped }
    }
}

/// Builds the label universe from the objects: first-seen order, each label once.
impl FromIterator<NormalizedObject> for ExportDocument {
    fn from_iter<I: IntoIterator<Item = NormalizedObject>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let mut document = Self::default();

        for object in iter {
            for label in &object.labels {
                if seen.insert(label.clone()) {
                    document.labels.push(label.clone());
                }
            }
            document.objects.push(object);
        }

        document
    }
}

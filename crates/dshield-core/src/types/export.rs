use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A canonical category tag, e.g. `web-scanner`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    /// Create a label, normalizing it to lowercase
    #[must_use]
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(value.as_ref().trim().to_lowercase())
    }

    /// The label text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Kind of a normalized observable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ObservableKind {
    /// A single IPv4 address
    #[default]
    #[serde(rename = "ipv4-addr")]
    Ipv4Addr,
}

impl ObservableKind {
    /// STIX cyber-observable type name used by the platform API
    #[must_use]
    pub const fn stix_type(self) -> &'static str {
        match self {
            Self::Ipv4Addr => "IPv4-Addr",
        }
    }
}

impl fmt::Display for ObservableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ipv4Addr => write!(f, "IPv4 address"),
        }
    }
}

/// Platform-ready representation of one feed record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedObject {
    /// Observable kind
    #[serde(rename = "type")]
    pub kind: ObservableKind,

    /// Address, verbatim from the feed
    pub value: String,

    /// Attached label references, in classification order
    #[serde(default)]
    pub labels: Vec<Label>,
}

/// Everything one run produces: the label universe and every observable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    /// Distinct labels in first-seen order
    pub labels: Vec<Label>,

    /// Observables in feed order
    pub objects: Vec<NormalizedObject>,
}

impl ExportDocument {
    /// Returns true if the document carries no objects
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Returns true if `label` is part of the label universe
    #[must_use]
    pub fn has_label(&self, label: &Label) -> bool {
        self.labels.contains(label)
    }

    /// Serialize as indented JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn labels_are_lowercased() {
        assert_eq!(Label::new(" Web-Scanner").as_str(), "web-scanner");
    }

    #[test]
    fn document_has_exactly_two_fields() {
        let doc = ExportDocument {
            labels: vec![Label::new("dshield")],
            objects: vec![NormalizedObject {
                kind: ObservableKind::Ipv4Addr,
                value: "203.0.113.9".into(),
                labels: vec![Label::new("dshield")],
            }],
        };

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value,
            json!({
                "labels": ["dshield"],
                "objects": [
                    {"type": "ipv4-addr", "value": "203.0.113.9", "labels": ["dshield"]}
                ]
            })
        );
    }

    #[test]
    fn emptiness_follows_objects() {
        let mut doc = ExportDocument::default();
        assert!(doc.is_empty());

        doc.objects.push(NormalizedObject {
            kind: ObservableKind::Ipv4Addr,
            value: "192.0.2.1".into(),
            labels: Vec::new(),
        });
        assert!(!doc.is_empty());
    }

    #[test]
    fn kind_names() {
        assert_eq!(ObservableKind::Ipv4Addr.to_string(), "IPv4 address");
        assert_eq!(ObservableKind::Ipv4Addr.stix_type(), "IPv4-Addr");
    }
}

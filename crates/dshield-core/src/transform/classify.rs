use crate::types::{FeedRecord, Label};

/// Feed category → canonical label.
///
/// Order matters: labels are attached to objects in table order.
pub const CATEGORY_LABELS: &[(&str, &str)] = &[
    ("webscanner", "web-scanner"),
    ("ssh-scan", "ssh-scanner"),
    ("telnet-scan", "telnet-scanner"),
    ("ntp-server", "ntp-server"),
    ("tldns", "top-level-dns"),
    ("mastodon-instance", "mastodon-instance"),
    ("tor-exit", "tor-exit-node"),
    ("shodan", "shodan-crawler"),
    ("openbl", "openbl-blocklist"),
    ("ciarmy", "ciarmy-blocklist"),
    ("blocklistde", "blocklist-de"),
    ("forumspam", "forum-spammer"),
];

/// Canonical label for a feed category, if the category is known
#[must_use]
pub fn label_for(category: &str) -> Option<&'static str> {
    CATEGORY_LABELS
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(category.trim()))
        .map(|(_, label)| *label)
}

/// Maps a feed record's category flags to canonical labels
#[derive(Debug, Clone, Default)]
pub struct LabelClassifier {
    source_label: Option<Label>,
}

impl LabelClassifier {
    /// Classifier driven by [`CATEGORY_LABELS`] alone
    #[must_use]
    pub const fn new() -> Self {
        Self { source_label: None }
    }

    /// Classifier that also tags every record with the feed it came from
    #[must_use]
    pub fn with_source_label(label: impl AsRef<str>) -> Self {
        Self {
            source_label: Some(Label::new(label)),
        }
    }

    /// Label attached to every record, if any
    #[must_use]
    pub const fn source_label(&self) -> Option<&Label> {
        self.source_label.as_ref()
    }

    /// Labels that apply to `record`: the source label first, then table order.
    ///
    /// Unknown categories are ignored.
    #[must_use]
    pub fn classify(&self, record: &FeedRecord) -> Vec<Label> {
        let categories = CATEGORY_LABELS
            .iter()
            .filter(|(category, _)| record.has_flag(category))
            .map(|(_, label)| Label::new(label))
            .filter(|label| self.source_label.as_ref() != Some(label));

        self.source_label.iter().cloned().chain(categories).collect()
    }
}

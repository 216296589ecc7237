use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One entry of the DShield intel feed
///
/// The feed is IP-centric: every entry names an address plus the categories
/// it was reported under. A category is carried either as the entry's
/// `description` or as a key of its own with a truthy value; every key the
/// connector does not model explicitly lands in [`flags`](Self::flags).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedRecord {
    /// Reported address, dotted-quad as received (validated later)
    #[serde(default)]
    pub ip: String,

    /// Category name the feed filed this entry under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Remaining keys, category flags among them
    #[serde(flatten)]
    pub flags: BTreeMap<String, Value>,
}

impl FeedRecord {
    /// Create a record for an address with no categories
    #[must_use]
    pub fn new(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            ..Self::default()
        }
    }

    /// Set the feed description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Raise a category flag
    #[must_use]
    pub fn flag(mut self, category: impl Into<String>) -> Self {
        self.flags.insert(category.into(), Value::Bool(true));
        self
    }

    /// Returns true if the record was reported under `category`
    #[must_use]
    pub fn has_flag(&self, category: &str) -> bool {
        let described = self
            .description
            .as_deref()
            .is_some_and(|d| d.trim().eq_ignore_ascii_case(category));

        described || self.flags.get(category).is_some_and(is_truthy)
    }
}

/// Feed flags arrive as booleans, counts or strings depending on the category
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => {
            let s = s.trim();
            !s.is_empty()
                && !s.eq_ignore_ascii_case("false")
                && !s.eq_ignore_ascii_case("no")
                && s != "0"
        }
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Null => false,
    }
}

//! Document filters for count and find
//!
//! A filter is a partial document: a stored document matches when it
//! contains every key/value pair of the filter. The empty filter therefore
//! matches everything. Backends translate the same filter document into
//! their native containment query.

use serde::Serialize;
use serde_json::Value;

/// Filter over stored sensor records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordFilter {
    /// Match on the `hasSent` flag when set
    #[serde(rename = "hasSent", skip_serializing_if = "Option::is_none")]
    pub sent: Option<bool>,
}

impl RecordFilter {
    /// Matches every record
    pub fn all() -> Self {
        Self::default()
    }

    /// Records not yet picked up by a downstream consumer
    ///
    /// Compares `hasSent` with the boolean `false`.
    pub fn pending() -> Self {
        Self { sent: Some(false) }
    }

    /// Records whose `hasSent` flag equals `sent`
    pub fn sent(sent: bool) -> Self {
        Self { sent: Some(sent) }
    }

    /// Whether the filter has no conditions
    pub fn is_empty(&self) -> bool {
        self.sent.is_none()
    }

    /// The filter as a partial document
    pub fn to_document(&self) -> Value {
        let mut doc = serde_json::Map::new();
        if let Some(sent) = self.sent {
            doc.insert("hasSent".to_string(), Value::Bool(sent));
        }
        Value::Object(doc)
    }

    /// Whether `document` satisfies this filter
    pub fn matches(&self, document: &Value) -> bool {
        contains(document, &self.to_document())
    }
}

/// JSON containment: every part of `needle` appears in `haystack`
///
/// Objects match key by key, arrays match when each needle element is
/// contained in some haystack element, scalars must be equal. Values of
/// different JSON types never match, so `"false"` does not match `false`.
pub fn contains(haystack: &Value, needle: &Value) -> bool {
    match (haystack, needle) {
        (Value::Object(h), Value::Object(n)) => n
            .iter()
            .all(|(key, nv)| h.get(key).is_some_and(|hv| contains(hv, nv))),
        (Value::Array(h), Value::Array(n)) => {
            n.iter().all(|nv| h.iter().any(|hv| contains(hv, nv)))
        }
        (h, n) => h == n,
    }
}

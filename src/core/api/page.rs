//! One page of the character collection.

use serde_json::Value;

use crate::core::characters::CharacterRecord;

/// A decoded collection page: its records and the cursor to the next page.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub results: Vec<CharacterRecord>,
    pub next: Option<String>,
}

impl Page {
    /// Build a page from an already-parsed JSON body.
    ///
    /// Never fails: a missing or non-array `results` contributes nothing and
    /// a missing, null, or non-string `next` ends the pagination chain.
    pub fn from_value(body: Value) -> Self {
        let Value::Object(mut map) = body else {
            return Self::default();
        };

        let results = match map.remove("results") {
            Some(Value::Array(items)) => items.into_iter().map(CharacterRecord::from_value).collect(),
            _ => Vec::new(),
        };

        let next = match map.remove("next") {
            Some(Value::String(url)) if !url.is_empty() => Some(url),
            _ => None,
        };

        Self { results, next }
    }
}

//! Raw character records as delivered by the API.
//!
//! Every field is optional and decoded leniently: a value of the wrong JSON
//! type is treated as absent instead of failing the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A character exactly as received, before any formatting.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CharacterRecord {
    #[serde(deserialize_with = "lenient::integer")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub age: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub birthdate: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub gender: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub occupation: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub portrait_path: Option<String>,
    #[serde(deserialize_with = "lenient::phrases")]
    pub phrases: Option<Phrases>,
}

/// The `phrases` field: either one quote or an ordered list of quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phrases {
    One(String),
    /// Text elements in API order; non-text elements are dropped on decode.
    Many(Vec<String>),
}

impl CharacterRecord {
    /// Decode one element of a page's `results` array. Never fails.
    ///
    /// Only objects carry fields; serde would otherwise accept an array
    /// positionally.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Convenience constructor for a record with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

mod lenient {
    use super::*;

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s),
            _ => None,
        })
    }

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64(),
            _ => None,
        })
    }

    pub fn integer<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_i64(),
            _ => None,
        })
    }

    pub fn phrases<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Phrases>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(Phrases::One(s)),
            Value::Array(items) => Some(Phrases::Many(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            )),
            _ => None,
        })
    }
}

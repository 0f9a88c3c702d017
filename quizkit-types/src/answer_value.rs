use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single answer value emitted by a handler.
///
/// This is the only thing that crosses from the engine to the host. Its JSON
/// form is the bare value: a string, an array of strings, or an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Raw text (choice, fill-in, writing, correction, true/false, reading comprehension).
    Text(String),

    /// Items in submitted order (ordering).
    Sequence(Vec<String>),

    /// Id to id/text (matching, multi-blank fill-in).
    Map(BTreeMap<String, String>),

    /// Category name to assigned items (categorization).
    Buckets(BTreeMap<String, Vec<String>>),
}

impl AnswerValue {
    /// Encode a true/false judgement as its wire string.
    pub fn from_bool(value: bool) -> Self {
        Self::Text(if value { "true" } else { "false" }.to_string())
    }

    /// Try to get this value as a string reference.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to read a true/false judgement (only the literal `"true"`/`"false"`).
    pub fn as_bool(&self) -> Option<bool> {
        match self.as_text()? {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    /// Try to get this value as an ordered sequence.
    pub fn as_sequence(&self) -> Option<&[String]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get this value as an id map.
    pub fn as_map(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Try to get this value as category buckets.
    ///
    /// An empty `Map` is accepted too, since `{}` is ambiguous on the wire.
    pub fn as_buckets(&self) -> Option<BTreeMap<String, Vec<String>>> {
        match self {
            Self::Buckets(buckets) => Some(buckets.clone()),
            Self::Map(map) if map.is_empty() => Some(BTreeMap::new()),
            _ => None,
        }
    }

    /// Get the type name of this value for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "Text",
            Self::Sequence(_) => "Sequence",
            Self::Map(_) => "Map",
            Self::Buckets(_) => "Buckets",
        }
    }

    /// Coerce to a single string, as stored by the reading comprehension composer.
    ///
    /// Text is kept verbatim, sequences are comma-joined and maps are
    /// rendered as compact JSON.
    pub fn coerce_to_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Sequence(items) => f.write_str(&items.join(",")),
            Self::Map(map) => {
                let json = serde_json::to_string(map).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
            Self::Buckets(buckets) => {
                let json = serde_json::to_string(buckets).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        Self::from_bool(b)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(items: Vec<String>) -> Self {
        Self::Sequence(items)
    }
}

impl From<BTreeMap<String, String>> for AnswerValue {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self::Map(map)
    }
}

impl From<BTreeMap<String, Vec<String>>> for AnswerValue {
    fn from(buckets: BTreeMap<String, Vec<String>>) -> Self {
        Self::Buckets(buckets)
    }
}

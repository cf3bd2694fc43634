//! Purpose: Decode the two JSON layers of a rule-match dump.
//! Exports: `Document`, `decode_matches`.
//! Role: Owns decode error wording; rendering never parses on its own.
//! Invariants: Entry order equals insertion order of the source document.
//! Invariants: Values stay JSON-encoded inside `Document`; the second
//! decode happens per rule so malformed match data fails on its own rule.
use serde_json::Value;

use crate::core::error::{Error, ErrorKind};

/// Parsed outer document: rule names with their still-encoded match data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    entries: Vec<(String, String)>,
}

impl Document {
    /// Decode the outer layer: one JSON object mapping rule names to
    /// JSON-encoded strings. Anything else is a parse error.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let value: Value = serde_json::from_str(text).map_err(|err| {
            Error::new(ErrorKind::Parse, "input is not valid JSON")
                .with_hint(
                    "The input must be a JSON object mapping rule names to JSON-encoded match strings.",
                )
                .with_source(err)
        })?;
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(Error::new(
                    ErrorKind::Parse,
                    format!(
                        "expected a top-level JSON object, got {}",
                        json_type_name(&other)
                    ),
                )
                .with_hint(
                    "The input must be a JSON object mapping rule names to JSON-encoded match strings.",
                ));
            }
        };
        let mut entries = Vec::with_capacity(map.len());
        for (name, value) in map {
            match value {
                Value::String(encoded) => entries.push((name, encoded)),
                other => {
                    return Err(Error::new(
                        ErrorKind::Parse,
                        format!(
                            "match data must be a JSON-encoded string, got {}",
                            json_type_name(&other)
                        ),
                    )
                    .with_rule(name)
                    .with_hint(
                        "Encode each rule's matches as a JSON string (double-encoded JSON).",
                    ));
                }
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(name, encoded)| (name.as_str(), encoded.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decode one rule's match data (the inner layer).
pub fn decode_matches(name: &str, encoded: &str) -> Result<Value, Error> {
    serde_json::from_str(encoded).map_err(|err| {
        Error::new(ErrorKind::Parse, "match data is not valid JSON")
            .with_rule(name)
            .with_hint("Each rule's value must decode to JSON a second time (double-encoded JSON).")
            .with_source(err)
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

//! A single delta operation and its translation between formats.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::attributes::{translate_attributes, Direction};
use crate::error::ConvertError;

pub const ATTRIBUTES: &str = "attributes";

/// One `insert` / `retain` / `delete` unit.
///
/// Stored as an ordered JSON object so that payload keys (and any embed
/// objects) survive translation byte-for-byte and in their original order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Op(Map<String, Value>);

impl Op {
    pub fn new() -> Self {
        Op(Map::new())
    }

    /// Builds an `insert` op with optional attributes.
    pub fn insert(text: impl Into<String>, attributes: Option<Map<String, Value>>) -> Self {
        let mut fields = Map::new();
        fields.insert("insert".into(), Value::String(text.into()));
        if let Some(attrs) = attributes {
            fields.insert(ATTRIBUTES.into(), Value::Object(attrs));
        }
        Op(fields)
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        Op(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn attributes(&self) -> Option<&Map<String, Value>> {
        self.0.get(ATTRIBUTES).and_then(Value::as_object)
    }

    /// Name of the op kind, if it has one of the three recognized keys.
    pub fn kind(&self) -> Option<&'static str> {
        ["insert", "retain", "delete"]
            .into_iter()
            .find(|k| self.0.contains_key(*k))
    }
}

/// Translates one op in the given direction.
///
/// Every key other than `attributes` is copied through unchanged. The
/// `attributes` object, if present, is rebuilt from the mapping table in
/// place, so it keeps its position among the op's keys.
pub fn translate_op(op: &Op, direction: Direction) -> Result<Op, ConvertError> {
    let mut out = Map::new();
    for (key, value) in op.fields() {
        if key == ATTRIBUTES {
            let attrs = value.as_object().ok_or_else(|| {
                ConvertError::malformed("operation attributes must be an object")
            })?;
            let translated = translate_attributes(attrs, direction)?;
            out.insert(key.clone(), Value::Object(translated));
        } else {
            out.insert(key.clone(), value.clone());
        }
    }
    Ok(Op(out))
}

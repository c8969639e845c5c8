//! Whole-document translation.
//!
//! The web document is wrapped as `{"ops": [...]}`; the mobile document is a
//! bare array of ops. Operations keep their order in both directions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::attributes::Direction;
use crate::error::ConvertError;
use crate::op::{translate_op, Op};

/// Web (Quill) document.
///
/// Keys other than `ops` are carried in `rest` so the client's document is
/// written back unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Delta {
    pub ops: Vec<Op>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Mobile document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MDelta(pub Vec<Op>);

impl Delta {
    pub fn new(ops: Vec<Op>) -> Self {
        Delta {
            ops,
            rest: Map::new(),
        }
    }

    pub fn to_mdelta(&self) -> Result<MDelta, ConvertError> {
        delta_to_mdelta(self)
    }
}

impl MDelta {
    pub fn ops(&self) -> &[Op] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_delta(&self) -> Result<Delta, ConvertError> {
        mdelta_to_delta(self)
    }
}

fn translate_ops(ops: &[Op], direction: Direction) -> Result<Vec<Op>, ConvertError> {
    ops.iter().map(|op| translate_op(op, direction)).collect()
}

/// Converts a web document to the mobile form.
pub fn delta_to_mdelta(delta: &Delta) -> Result<MDelta, ConvertError> {
    Ok(MDelta(translate_ops(&delta.ops, Direction::WebToMobile)?))
}

/// Converts a mobile document to the web form.
pub fn mdelta_to_delta(mdelta: &MDelta) -> Result<Delta, ConvertError> {
    Ok(Delta::new(translate_ops(&mdelta.0, Direction::MobileToWeb)?))
}

/// Converts a web change diff (`{"ops": [...]}`) to mobile ops.
///
/// Diffs use `null` attribute values to erase a format; those entries are
/// skipped like any other null.
pub fn diff_to_mdiff(diff: &Value) -> Result<MDelta, ConvertError> {
    let delta: Delta = serde_json::from_value(diff.clone())?;
    delta_to_mdelta(&delta)
}

/// Converts a bare document, given as JSON, in the given direction.
///
/// The input is a web document for [`Direction::WebToMobile`] and a mobile
/// document for [`Direction::MobileToWeb`]. Returns the other form as JSON.
pub fn convert_document(doc: &Value, direction: Direction) -> Result<Value, ConvertError> {
    let out = match direction {
        Direction::WebToMobile => {
            let delta: Delta = serde_json::from_value(doc.clone())?;
            serde_json::to_value(delta_to_mdelta(&delta)?)?
        }
        Direction::MobileToWeb => {
            let mdelta: MDelta = serde_json::from_value(doc.clone())?;
            serde_json::to_value(mdelta_to_delta(&mdelta)?)?
        }
    };
    Ok(out)
}

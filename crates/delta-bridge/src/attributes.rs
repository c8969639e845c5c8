//! Attribute mapping tables between the web (Quill) and mobile formats.
//!
//! Each direction has its own explicit rule list. The lists are not inverses
//! of one another: `blockquote` maps to `block: "quote"` whenever the key is
//! present (even when `false`), while `block: "quote"` always comes back as
//! `blockquote: true`.
//!
//! Rules are scanned in table order, which fixes the key order of the
//! produced attributes object.

use serde_json::{Map, Value};

use crate::error::ConvertError;

// ── Direction ─────────────────────────────────────────────────────────────

/// Which way a document is being translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Verbose `delta` attributes to compact `mdelta` attributes.
    WebToMobile,
    /// Compact `mdelta` attributes to verbose `delta` attributes.
    MobileToWeb,
}

impl Direction {
    /// The rule table consulted for this direction.
    pub fn rules(self) -> &'static [AttributeRule] {
        match self {
            Direction::WebToMobile => WEB_TO_MOBILE,
            Direction::MobileToWeb => MOBILE_TO_WEB,
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Direction::WebToMobile => Direction::MobileToWeb,
            Direction::MobileToWeb => Direction::WebToMobile,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::WebToMobile => "web_to_mobile",
            Direction::MobileToWeb => "mobile_to_web",
        }
    }
}

// ── Rule types ────────────────────────────────────────────────────────────

/// A constant value emitted by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    Str(&'static str),
    Bool(bool),
}

impl Emit {
    fn to_value(self) -> Value {
        match self {
            Emit::Str(s) => Value::String(s.to_string()),
            Emit::Bool(b) => Value::Bool(b),
        }
    }
}

/// How a source attribute value becomes a target value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Boolean copied as-is.
    Flag,
    /// String copied as-is.
    Text,
    /// Number truncated toward zero to an integer.
    Level,
    /// String value looked up as `(source value, target key, target value)`.
    /// Values missing from the list produce nothing.
    Lookup(&'static [(&'static str, &'static str, Emit)]),
    /// Boolean; emits the constant only when `true`.
    IfTrue(Emit),
    /// Any non-null value emits the constant.
    Presence(Emit),
}

/// One row of a directional mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeRule {
    pub source: &'static str,
    /// Target key for every transform except [`Transform::Lookup`], whose
    /// entries carry their own target keys.
    pub target: &'static str,
    pub transform: Transform,
}

const fn rule(source: &'static str, target: &'static str, transform: Transform) -> AttributeRule {
    AttributeRule {
        source,
        target,
        transform,
    }
}

// ── Tables ────────────────────────────────────────────────────────────────

const LIST_TO_BLOCK: &[(&str, &str, Emit)] = &[
    ("ordered", "block", Emit::Str("ol")),
    ("bullet", "block", Emit::Str("ul")),
];

const BLOCK_TO_WEB: &[(&str, &str, Emit)] = &[
    ("ol", "list", Emit::Str("ordered")),
    ("ul", "list", Emit::Str("bullet")),
    ("code", "code-block", Emit::Bool(true)),
    ("quote", "blockquote", Emit::Bool(true)),
];

pub static WEB_TO_MOBILE: &[AttributeRule] = &[
    rule("bold", "b", Transform::Flag),
    rule("italic", "i", Transform::Flag),
    rule("link", "a", Transform::Text),
    rule("header", "heading", Transform::Level),
    rule("list", "block", Transform::Lookup(LIST_TO_BLOCK)),
    rule("code-block", "block", Transform::IfTrue(Emit::Str("code"))),
    rule("blockquote", "block", Transform::Presence(Emit::Str("quote"))),
];

pub static MOBILE_TO_WEB: &[AttributeRule] = &[
    rule("b", "bold", Transform::Flag),
    rule("i", "italic", Transform::Flag),
    rule("a", "link", Transform::Text),
    rule("heading", "header", Transform::Level),
    rule("block", "list", Transform::Lookup(BLOCK_TO_WEB)),
];

// ── Translation ───────────────────────────────────────────────────────────

impl AttributeRule {
    /// Applies this rule to a non-null source value.
    ///
    /// Returns `Ok(None)` when the value is recognized but maps to nothing
    /// (e.g. `code-block: false`, `list: "checked"`).
    pub fn apply(&self, value: &Value) -> Result<Option<(&'static str, Value)>, ConvertError> {
        match self.transform {
            Transform::Flag => {
                let b = self.expect_bool(value)?;
                Ok(Some((self.target, Value::Bool(b))))
            }
            Transform::Text => {
                let s = value.as_str().ok_or_else(|| self.wrong_type("a string"))?;
                Ok(Some((self.target, Value::String(s.to_string()))))
            }
            Transform::Level => {
                if !value.is_number() {
                    return Err(self.wrong_type("a number"));
                }
                let level = truncate_level(value).ok_or_else(|| {
                    ConvertError::malformed(format!("attribute \"{}\" is out of range", self.source))
                })?;
                Ok(Some((self.target, level)))
            }
            Transform::Lookup(entries) => {
                let s = value.as_str().ok_or_else(|| self.wrong_type("a string"))?;
                Ok(entries
                    .iter()
                    .find(|(from, _, _)| *from == s)
                    .map(|(_, key, emit)| (*key, emit.to_value())))
            }
            Transform::IfTrue(emit) => {
                if self.expect_bool(value)? {
                    Ok(Some((self.target, emit.to_value())))
                } else {
                    Ok(None)
                }
            }
            Transform::Presence(emit) => Ok(Some((self.target, emit.to_value()))),
        }
    }

    fn expect_bool(&self, value: &Value) -> Result<bool, ConvertError> {
        value.as_bool().ok_or_else(|| self.wrong_type("a boolean"))
    }

    fn wrong_type(&self, expected: &str) -> ConvertError {
        ConvertError::malformed(format!("attribute \"{}\" must be {expected}", self.source))
    }
}

/// Truncates a numeric heading level toward zero.
///
/// Integers are kept exactly. A float whose integer part does not fit an
/// `i64` yields `None`.
fn truncate_level(value: &Value) -> Option<Value> {
    if value.is_i64() || value.is_u64() {
        return Some(value.clone());
    }
    let n = value.as_f64()?.trunc();
    if n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Some(Value::from(n as i64))
    } else {
        None
    }
}

/// Returns true if `key` has a rule in the given direction.
pub fn is_recognized(direction: Direction, key: &str) -> bool {
    direction.rules().iter().any(|r| r.source == key)
}

/// Translates one attributes object.
///
/// Recognized keys are visited in table order; null values and keys with no
/// rule are skipped. When two rules write the same target key the later
/// value wins and the key keeps its first position.
pub fn translate_attributes(
    attrs: &Map<String, Value>,
    direction: Direction,
) -> Result<Map<String, Value>, ConvertError> {
    let mut out = Map::new();
    for rule in direction.rules() {
        let value = match attrs.get(rule.source) {
            Some(v) if !v.is_null() => v,
            _ => continue,
        };
        if let Some((key, translated)) = rule.apply(value)? {
            out.insert(key.to_string(), translated);
        }
    }
    for key in attrs.keys() {
        if !is_recognized(direction, key) {
            tracing::trace!(key = %key, direction = direction.as_str(), "dropping unrecognized attribute");
        }
    }
    Ok(out)
}

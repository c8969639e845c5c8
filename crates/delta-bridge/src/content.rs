//! Content records: the stored envelope around a rich-text body.
//!
//! A client submits a record holding either `delta` (web) or `mdelta`
//! (mobile). Before storage the record is supplemented once with the other
//! format so both client populations can read it. `###html###` and any other
//! top-level fields are carried through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::{delta_to_mdelta, mdelta_to_delta, Delta, MDelta};
use crate::error::ConvertError;

/// A parsed content record. A `null` document field counts as absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<Delta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mdelta: Option<MDelta>,
    /// Rendered HTML, kept verbatim. `Some(Value::Null)` when the field was
    /// present as `null`.
    #[serde(
        rename = "###html###",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub html: Option<Value>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Which document field was authoritative in a submitted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Delta,
    MDelta,
}

/// Output options for [`supplement_with`].
#[derive(Debug, Clone, Default)]
pub struct SupplementOptions {
    /// Pretty-print the resulting record instead of emitting compact JSON.
    pub pretty: bool,
}

impl ContentRecord {
    pub fn parse(text: &str) -> Result<Self, ConvertError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reports which single format is present.
    pub fn source_format(&self) -> Result<SourceFormat, ConvertError> {
        match (&self.delta, &self.mdelta) {
            (Some(_), Some(_)) => Err(ConvertError::ConflictingFormats),
            (Some(_), None) => Ok(SourceFormat::Delta),
            (None, Some(_)) => Ok(SourceFormat::MDelta),
            (None, None) => Err(ConvertError::MissingFormat),
        }
    }

    /// Derives the missing format from the present one.
    pub fn supplement(&mut self) -> Result<SourceFormat, ConvertError> {
        let source = self.source_format()?;
        if let Some(delta) = &self.delta {
            tracing::debug!(ops = delta.ops.len(), "supplementing mdelta from delta");
            let mdelta = delta_to_mdelta(delta)?;
            self.mdelta = Some(mdelta);
        } else if let Some(mdelta) = &self.mdelta {
            tracing::debug!(ops = mdelta.len(), "supplementing delta from mdelta");
            let delta = mdelta_to_delta(mdelta)?;
            self.delta = Some(delta);
        }
        Ok(source)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, ConvertError> {
        let text = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(text)
    }
}

/// Parses a client-submitted record, attaches the missing format and
/// returns the record as compact JSON.
///
/// Must be called once per fresh record: running it on its own output fails
/// with [`ConvertError::ConflictingFormats`].
pub fn supplement(content_text: &str) -> Result<String, ConvertError> {
    supplement_with(content_text, &SupplementOptions::default())
}

pub fn supplement_with(
    content_text: &str,
    options: &SupplementOptions,
) -> Result<String, ConvertError> {
    let mut record = ContentRecord::parse(content_text)?;
    record.supplement()?;
    record.to_json(options.pretty)
}

/// Takes `{"delta": {...}}` text and returns the mobile array as text.
pub fn delta_to_mdelta_str(text: &str) -> Result<String, ConvertError> {
    let record = ContentRecord::parse(text)?;
    let delta = record.delta.ok_or(ConvertError::MissingFormat)?;
    Ok(serde_json::to_string(&delta_to_mdelta(&delta)?)?)
}

/// Takes a bare mobile array as text and returns `{"delta": {...}}` text.
pub fn mdelta_to_delta_str(text: &str) -> Result<String, ConvertError> {
    let mdelta: MDelta = serde_json::from_str(text)?;
    let record = ContentRecord {
        delta: Some(mdelta_to_delta(&mdelta)?),
        ..ContentRecord::default()
    };
    record.to_json(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn web_record_gains_mdelta() {
        let out = supplement(
            r#"{"delta":{"ops":[{"insert":"hi\n","attributes":{"bold":true,"header":2}}]}}"#,
        )
        .unwrap();
        assert_eq!(
            parse(&out)["mdelta"],
            json!([{"insert": "hi\n", "attributes": {"b": true, "heading": 2}}])
        );
    }

    #[test]
    fn mobile_record_gains_delta() {
        let out = supplement(r#"{"mdelta":[{"insert":"x","attributes":{"block":"ol"}}]}"#).unwrap();
        assert_eq!(
            parse(&out)["delta"],
            json!({"ops": [{"insert": "x", "attributes": {"list": "ordered"}}]})
        );
    }

    #[test]
    fn both_formats_conflict() {
        assert_eq!(
            supplement(r#"{"delta":{"ops":[]},"mdelta":[]}"#),
            Err(ConvertError::ConflictingFormats)
        );
    }

    #[test]
    fn neither_format_is_missing() {
        assert_eq!(
            supplement(r####"{"###html###":"<p></p>"}"####),
            Err(ConvertError::MissingFormat)
        );
    }

    #[test]
    fn null_fields_count_as_absent() {
        let out = supplement(r#"{"delta":null,"mdelta":[{"insert":"a"}]}"#).unwrap();
        assert_eq!(parse(&out)["delta"], json!({"ops": [{"insert": "a"}]}));
    }

    #[test]
    fn second_pass_conflicts() {
        let once = supplement(r#"{"mdelta":[]}"#).unwrap();
        assert_eq!(supplement(&once), Err(ConvertError::ConflictingFormats));
    }

    #[test]
    fn html_and_extra_fields_pass_through() {
        let out = supplement(
            r####"{"owner":"u1","delta":{"ops":[{"insert":"a\n"}]},"###html###":"<p>a</p>"}"####,
        )
        .unwrap();
        assert_eq!(
            out,
            r####"{"delta":{"ops":[{"insert":"a\n"}]},"mdelta":[{"insert":"a\n"}],"###html###":"<p>a</p>","owner":"u1"}"####
        );
    }

    #[test]
    fn null_html_is_kept() {
        let out = supplement(r####"{"delta":{"ops":[]},"###html###":null}"####).unwrap();
        assert_eq!(
            out,
            r####"{"delta":{"ops":[]},"mdelta":[],"###html###":null}"####
        );
    }

    #[test]
    fn extra_delta_keys_are_kept() {
        let out = supplement(r#"{"delta":{"ops":[{"insert":"a"}],"v":1}}"#).unwrap();
        assert_eq!(
            out,
            r#"{"delta":{"ops":[{"insert":"a"}],"v":1},"mdelta":[{"insert":"a"}]}"#
        );
    }

    #[test]
    fn malformed_inputs() {
        for text in [
            "not json",
            "[]",
            r#"{"delta":[]}"#,
            r#"{"delta":{"ops":{}}}"#,
            r#"{"mdelta":{"ops":[]}}"#,
            r#"{"mdelta":[1]}"#,
        ] {
            assert!(
                matches!(supplement(text), Err(ConvertError::MalformedJson(_))),
                "expected malformed for {text}"
            );
        }
    }

    #[test]
    fn pretty_output() {
        let options = SupplementOptions { pretty: true };
        let out = supplement_with(r#"{"mdelta":[]}"#, &options).unwrap();
        assert!(out.contains('\n'));
        assert_eq!(parse(&out), json!({"delta": {"ops": []}, "mdelta": []}));
    }

    #[test]
    fn source_format_detection() {
        let mut record = ContentRecord::parse(r#"{"delta":{"ops":[]}}"#).unwrap();
        assert_eq!(record.source_format(), Ok(SourceFormat::Delta));
        assert_eq!(record.supplement(), Ok(SourceFormat::Delta));
        assert_eq!(record.source_format(), Err(ConvertError::ConflictingFormats));
    }

    #[test]
    fn string_helpers() {
        let m = delta_to_mdelta_str(r#"{"delta":{"ops":[{"insert":"q","attributes":{"blockquote":true}}]}}"#)
            .unwrap();
        assert_eq!(m, r#"[{"insert":"q","attributes":{"block":"quote"}}]"#);

        let d = mdelta_to_delta_str(&m).unwrap();
        assert_eq!(d, r#"{"delta":{"ops":[{"insert":"q","attributes":{"blockquote":true}}]}}"#);

        assert_eq!(delta_to_mdelta_str("{}"), Err(ConvertError::MissingFormat));
    }
}

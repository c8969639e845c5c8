//! Error type shared by every conversion entry point.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// The record carries both `delta` and `mdelta`.
    #[error("Cannot have both delta and mdelta")]
    ConflictingFormats,
    /// The record carries neither `delta` nor `mdelta`.
    #[error("None of delta and mdelta exists")]
    MissingFormat,
    /// The text is not JSON, or a document/operation/attribute has the wrong shape.
    #[error("MALFORMED_JSON: {0}")]
    MalformedJson(String),
}

impl ConvertError {
    /// Returns true for errors caused by a well-formed but unacceptable
    /// record. HTTP callers answer these with `400 Bad Request`.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ConvertError::ConflictingFormats | ConvertError::MissingFormat
        )
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        ConvertError::MalformedJson(msg.into())
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(e: serde_json::Error) -> Self {
        ConvertError::MalformedJson(e.to_string())
    }
}

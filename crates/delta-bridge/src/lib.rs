//! delta-bridge — transcoder between the two rich-text content formats.
//!
//! Web clients edit documents as Quill deltas (`{"ops": [...]}` with verbose
//! attribute names). Mobile clients use the compact mdelta form: a bare op
//! array with short attribute keys and a single `block` key for list, code
//! and quote styling.
//!
//! # Example
//!
//! ```
//! use delta_bridge::supplement;
//!
//! let out = supplement(r#"{"mdelta":[{"insert":"x","attributes":{"block":"ol"}}]}"#).unwrap();
//! let record: serde_json::Value = serde_json::from_str(&out).unwrap();
//! assert_eq!(record["delta"]["ops"][0]["attributes"]["list"], "ordered");
//! ```

pub mod attributes;     // mapping tables
pub mod op;
pub mod document;
pub mod content;        // record envelope
pub mod template;
pub mod error;
pub mod cli;

pub use attributes::{translate_attributes, Direction};
pub use content::{
    delta_to_mdelta_str, mdelta_to_delta_str, supplement, supplement_with, ContentRecord,
    SourceFormat, SupplementOptions,
};
pub use document::{convert_document, delta_to_mdelta, diff_to_mdiff, mdelta_to_delta, Delta, MDelta};
pub use error::ConvertError;
pub use op::{translate_op, Op};
pub use template::generate_template;

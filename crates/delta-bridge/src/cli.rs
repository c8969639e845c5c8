//! Core logic behind the `delta-bridge` binary.
//!
//! Each command takes JSON text and returns JSON text so the binary only has
//! to deal with argument parsing and I/O:
//! - `supplement` — attach the missing format to a content record
//! - `convert`    — translate a bare document in either direction
//! - `template`   — print the initial record for a plain string

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

use crate::attributes::Direction;
use crate::content::{supplement_with, SupplementOptions};
use crate::document::convert_document;
use crate::error::ConvertError;
use crate::template::generate_template;

#[derive(Debug, Parser)]
#[command(name = "delta-bridge", version, about = "Convert rich-text content between delta and mdelta")]
pub struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Attach the missing delta or mdelta to a content record
    Supplement {
        /// Read the record from this file instead of stdin
        file: Option<std::path::PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
    /// Convert a bare document to the other format
    Convert {
        /// Target format
        #[arg(long, value_enum)]
        to: Target,
        file: Option<std::path::PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
    /// Print the initial content record for a plain string
    Template { text: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    Web,
    Mobile,
}

impl Target {
    pub fn direction(self) -> Direction {
        match self {
            Target::Web => Direction::MobileToWeb,
            Target::Mobile => Direction::WebToMobile,
        }
    }
}

/// Supplements a content record.
pub fn run_supplement(input: &str, pretty: bool) -> Result<String, ConvertError> {
    supplement_with(input.trim(), &SupplementOptions { pretty })
}

/// Converts a bare document (`{"ops": [...]}` or an op array) to `target`.
pub fn run_convert(input: &str, target: Target, pretty: bool) -> Result<String, ConvertError> {
    let doc: Value = serde_json::from_str(input.trim())?;
    let out = convert_document(&doc, target.direction())?;
    let text = if pretty {
        serde_json::to_string_pretty(&out)?
    } else {
        serde_json::to_string(&out)?
    };
    Ok(text)
}

pub fn run_template(text: &str) -> String {
    generate_template(text)
}

/// Process exit code for a failed command.
///
/// Client errors (conflicting or missing formats) exit with 2, malformed
/// input with 1.
pub fn exit_code(err: &ConvertError) -> i32 {
    if err.is_client_error() {
        2
    } else {
        1
    }
}

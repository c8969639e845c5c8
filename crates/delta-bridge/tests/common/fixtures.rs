use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

/// One supplement case: an input record and either the expected output
/// record or the expected error kind.
#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    pub name: String,
    /// A JSON string is used verbatim as input text; anything else is
    /// serialized first.
    pub input: Value,
    #[serde(default)]
    pub expected: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Fixture {
    pub fn input_text(&self) -> String {
        match &self.input {
            Value::String(s) => s.clone(),
            other => serde_json::to_string(other).expect("fixture input serializes"),
        }
    }
}

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Loads every `*.json` fixture file, sorted by file name. Each file holds an
/// array of fixtures.
pub fn load_fixtures() -> Vec<(String, Fixture)> {
    let dir = fixtures_dir();
    let mut files: Vec<PathBuf> = fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("failed to read {:?}: {e}", dir))
        .map(|entry| entry.expect("dir entry").path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();
    files.sort();

    let mut out = Vec::new();
    for path in files {
        let text = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read {:?}: {e}", path));
        let cases: Vec<Fixture> = serde_json::from_str(&text)
            .unwrap_or_else(|e| panic!("failed to parse {:?}: {e}", path));
        let file = path.file_name().unwrap().to_string_lossy().into_owned();
        out.extend(cases.into_iter().map(|c| (file.clone(), c)));
    }
    out
}

//! Query document input
//!
//! Documents arrive as JSONL (one JSON object per line) or as a single JSON
//! value. A top-level array is flattened into its elements so both shapes
//! yield a flat list of document objects.

use crate::document::error::DocumentError;
use crate::log_debug;
use serde_json::Value;
use std::path::Path;

/// Parse document input text into a list of document values
pub fn read_documents(input: &str) -> Result<Vec<Value>, DocumentError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    match read_jsonl(input) {
        Ok(docs) => Ok(docs),
        // Not line-delimited; fall back to one JSON value for the whole input
        Err(line_error) => {
            let value: Value =
                serde_json::from_str(input).map_err(|_| DocumentError::InvalidDocument {
                    reason: line_error,
                })?;
            Ok(flatten(value))
        }
    }
}

/// Load documents from a file path
pub fn load_documents(path: &Path) -> Result<Vec<Value>, DocumentError> {
    let contents = std::fs::read_to_string(path).map_err(|err| DocumentError::Read {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;

    let docs = read_documents(&contents)?;
    log_debug!("Documents loaded",
        "path" => path.display(),
        "count" => docs.len()
    );
    Ok(docs)
}

fn read_jsonl(input: &str) -> Result<Vec<Value>, String> {
    let mut docs = Vec::new();
    for (index, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line)
            .map_err(|err| format!("line {}: {}", index + 1, err))?;
        docs.extend(flatten(value));
    }
    Ok(docs)
}

fn flatten(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

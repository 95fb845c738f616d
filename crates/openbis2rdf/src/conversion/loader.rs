//! Read openBIS JSON documents.

use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::error::Result;

/// Path argument that stands for standard input.
pub const STDIN_PATH: &str = "-";

/// Load a JSON document from disk.
pub fn load_json(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    parse_json(&content)
}

/// Read a JSON document from any reader.
pub fn read_document<R: Read>(mut reader: R) -> Result<Value> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    parse_json(&content)
}

/// Load from `path`, or from stdin when `path` is `-`.
pub fn load_input(path: &Path) -> Result<Value> {
    if path.as_os_str() == STDIN_PATH {
        read_document(std::io::stdin().lock())
    } else {
        load_json(path)
    }
}

fn parse_json(content: &str) -> Result<Value> {
    // Some exports start with a UTF-8 byte order mark.
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    Ok(serde_json::from_str(content)?)
}

//! Loading binding contexts from JSON or YAML documents.
//! Key order of the document is kept, since substitution follows it.

use crate::error::{Error, Result};
use crate::value::{Context, Value};
use log::debug;
use std::io::Read;
use std::path::Path;

/// Parses a context document, trying JSON first and falling back to YAML.
///
/// # Arguments
/// * `content` - Raw document text
///
/// # Returns
/// * `Result<Context>` - Ordered binding context; empty for a blank or null document
///
/// # Errors
/// * `Error::ContextError` if the document is neither JSON nor YAML, or is not a mapping
pub fn parse_context(content: &str) -> Result<Context> {
    if content.trim().is_empty() {
        return Ok(Context::new());
    }

    let raw: serde_json::Value = match serde_json::from_str(content) {
        Ok(v) => v,
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ContextError(format!("Invalid context format: {e}")))?,
    };

    match Value::from(raw) {
        Value::Map(map) => Ok(map),
        Value::Scalar(s) if s.is_empty() => Ok(Context::new()),
        other => Err(Error::ContextError(format!(
            "expected a mapping at the top level, found {}",
            other.kind()
        ))),
    }
}

/// Reads and parses a context file.
pub fn load_context<P: AsRef<Path>>(path: P) -> Result<Context> {
    let path = path.as_ref();
    debug!("Loading context from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(Error::IoError)?;
    parse_context(&content)
}

/// Reads and parses a context document from stdin.
pub fn load_from_stdin() -> Result<Context> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    parse_context(&buffer)
}

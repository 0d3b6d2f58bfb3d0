//! Argument resolution for `call`.
//!
//! Tool arguments come from an inline JSON object (`--args`) or a JSON file
//! (`--args-file`, `-` for stdin). The file wins when both are given.

use std::io::Read;
use std::path::Path;

use serde_json::{Map, Value};

/// Resolves the tool arguments object.
pub fn resolve_arguments(
    inline: &str,
    file: Option<&str>,
) -> anyhow::Result<Map<String, Value>> {
    let text = match file {
        Some("-") => read_from_stdin()?,
        Some(path) => read_from_file(path)?,
        None => inline.to_string(),
    };
    parse_object(text.trim())
}

fn read_from_file(path: &str) -> anyhow::Result<String> {
    let file_path = Path::new(path);
    if !file_path.exists() {
        anyhow::bail!("arguments file not found: {path}");
    }
    std::fs::read_to_string(file_path)
        .map_err(|e| anyhow::anyhow!("failed to read arguments file: {e}"))
}

fn read_from_stdin() -> anyhow::Result<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("failed to read stdin: {e}"))?;
    Ok(buffer)
}

fn parse_object(text: &str) -> anyhow::Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => anyhow::bail!("arguments must be a JSON object"),
        Err(e) => anyhow::bail!("invalid JSON arguments: {e}"),
    }
}

//! License header loading and formatting.

use crate::error::{EnumeratorError, Result};
use std::fs;
use std::path::Path;

/// Reads the license text, if one is configured.
pub fn load(path: Option<&Path>) -> Result<Option<String>> {
    let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(None);
    };

    tracing::debug!("Reading license from {:?}", path);
    let text = fs::read_to_string(path).map_err(|source| EnumeratorError::License {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(text))
}

/// Formats license text as a `//` comment block closed by a bare `//` line.
///
/// Returns `None` for blank text so no empty header is emitted.
pub fn comment_block(license: &str) -> Option<String> {
    if license.trim().is_empty() {
        return None;
    }

    let mut output = String::new();
    for line in license.trim_end().lines() {
        let line = line.trim_end();
        if line.is_empty() {
            output.push_str("//\n");
        } else {
            output.push_str(&format!("// {}\n", line));
        }
    }
    output.push_str("//\n");
    Some(output)
}

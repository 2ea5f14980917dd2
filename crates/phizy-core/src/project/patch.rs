//! Marker-based patching of generated source files

use crate::error::{Result, StackError};
use regex::Regex;
use std::path::Path;

/// Text inserted right after an anchor, guarded by a marker
#[derive(Debug, Clone, Copy)]
pub struct Insertion<'a> {
    /// If this string is already in the file the insertion is skipped
    pub marker: &'a str,
    /// Existing text the insertion goes after
    pub anchor: &'a str,
    pub text: &'a str,
}

impl Insertion<'_> {
    /// Apply to `content`; unchanged if the marker exists or the anchor is missing
    pub fn apply(&self, content: &str) -> String {
        if content.contains(self.marker) {
            return content.to_string();
        }
        content.replacen(self.anchor, &format!("{}{}", self.anchor, self.text), 1)
    }
}

/// Remove every match of `patterns`, then squeeze runs of blank lines
pub fn strip_patterns(content: &str, patterns: &[&str]) -> std::result::Result<String, regex::Error> {
    let mut out = content.to_string();
    for pattern in patterns {
        let re = Regex::new(pattern)?;
        out = re.replace_all(&out, "").into_owned();
    }
    let blank_runs = Regex::new(r"\n{3,}")?;
    Ok(blank_runs.replace_all(&out, "\n\n").into_owned())
}

/// Apply all insertions to the file at `path`, writing it back if anything changed
///
/// Returns `Ok(false)` when the file is missing or already patched.
pub fn insert_into_file(path: &Path, insertions: &[Insertion<'_>]) -> Result<bool> {
    if !path.is_file() {
        return Ok(false);
    }

    let original = std::fs::read_to_string(path)
        .map_err(|e| StackError::fs("Failed to read source file", path, e))?;
    let patched = insertions
        .iter()
        .fold(original.clone(), |content, insertion| insertion.apply(&content));

    if patched == original {
        return Ok(false);
    }

    std::fs::write(path, patched).map_err(|e| StackError::fs("Failed to write source file", path, e))?;
    Ok(true)
}

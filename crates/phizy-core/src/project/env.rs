//! `.env` file editing

use crate::error::{Result, StackError};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// File name of the environment file at the project root
pub const ENV_FILE: &str = ".env";

/// Append `content` to the env file, creating it if needed
pub async fn append(path: &Path, content: &str) -> Result<()> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(|e| StackError::fs("Failed to open env file", path, e))?;
    file.write_all(content.as_bytes())
        .await
        .map_err(|e| StackError::fs("Failed to write env file", path, e))?;
    file.flush()
        .await
        .map_err(|e| StackError::fs("Failed to write env file", path, e))?;
    Ok(())
}

/// Remove every `KEY=...` line whose key is in `keys`
///
/// Comments and blank lines are always kept. The rewritten file ends with a
/// single newline and keeps CRLF line endings if it had them. A missing file
/// is left missing.
pub async fn remove_keys(path: &Path, keys: &[&str]) -> Result<()> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        return Ok(());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| StackError::fs("Failed to read env file", path, e))?;
    let stripped = strip_keys(&content, keys);
    fs::write(path, stripped)
        .await
        .map_err(|e| StackError::fs("Failed to write env file", path, e))
}

fn strip_keys(content: &str, keys: &[&str]) -> String {
    let newline = if content.contains("\r\n") { "\r\n" } else { "\n" };

    let mut kept: Vec<&str> = content
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return true;
            }
            match trimmed.split_once('=') {
                Some((key, _)) => !keys.contains(&key.trim()),
                None => true,
            }
        })
        .collect();

    while kept.last().is_some_and(|line| line.trim().is_empty()) {
        kept.pop();
    }

    let mut out = kept.join(newline);
    out.push_str(newline);
    out
}

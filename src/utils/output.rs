use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

pub fn shared_value_line(key: &str, value: &str) -> String {
    format!("{}={}", key, value)
}

/// Appends `key=value` to a pipeline output file such as `$GITHUB_OUTPUT`.
pub fn append_shared_value(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    writeln!(file, "{}", shared_value_line(key, value))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

//! Plain text: one resource per line.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::fs::atomic_write;
use crate::resource::Resource;

/// Line separator used when writing text files.
pub const LINE_BREAK: &str = "\r\n";

/// Reads one resource per non-empty line.
pub fn read(path: &Path) -> Result<Vec<Resource>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    Ok(parse(&path.to_string_lossy(), &content))
}

/// Splits `content` into resources, dropping empty lines and a leading BOM.
pub fn parse(file_name: &str, content: &str) -> Vec<Resource> {
    content
        .trim_start_matches('\u{feff}')
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| Resource::new(file_name, "", line))
        .collect()
}

/// Overwrites `path` with the destination texts joined by CRLF.
pub fn write(path: &Path, resources: &[Resource]) -> Result<()> {
    let content = resources
        .iter()
        .map(|r| r.destination_text.as_str())
        .collect::<Vec<_>>()
        .join(LINE_BREAK);

    atomic_write(path, &content)
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

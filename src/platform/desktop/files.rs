use std::path::Path;

use anyhow::{Context, Result};

/// File name and contents of a picked upload.
pub fn read_upload(path: &Path) -> Result<(String, Vec<u8>)> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read file: {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload.xlsx")
        .to_string();
    Ok((file_name, bytes))
}

pub fn write_export(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes)
        .with_context(|| format!("failed to write export: {}", path.display()))
}

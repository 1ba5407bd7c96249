use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

pub fn read_to_string(path: &Path, what: &str) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} file `{}`", path.display()))
}

pub fn read(path: &Path, what: &str) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {what} file `{}`", path.display()))
}

/// Writes `bytes` to `path` through a temporary file in the same directory,
/// so `path` is either left untouched or fully written.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(&dir)
        .with_context(|| format!("failed to create a temporary file in `{}`", dir.display()))?;
    file.write_all(bytes)
        .and_then(|()| file.as_file().sync_all())
        .context("failed to write temporary file")?;
    file.persist(path)
        .with_context(|| format!("failed to write `{}`", path.display()))?;

    Ok(())
}

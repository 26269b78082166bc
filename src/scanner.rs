use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Takes a snapshot of the data directory: every regular file directly
/// inside it, excluding the manifest file itself.
///
/// Subdirectories are not descended into and non-regular entries are
/// skipped. Results are sorted by filename.
///
/// # Errors
/// Returns an error if the directory cannot be traversed.
pub fn snapshot(data_dir: &Path, manifest_name: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(data_dir).min_depth(1).max_depth(1) {
        let entry = entry
            .with_context(|| format!("Failed to read data directory: {}", data_dir.display()))?;

        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name() == manifest_name {
            continue;
        }

        files.push(entry.into_path());
    }

    files.sort();
    debug!(count = files.len(), dir = %data_dir.display(), "directory snapshot");
    Ok(files)
}

/// Extracts the bare filename of a snapshot entry as UTF-8.
///
/// Manifest keys carry no path component, so only the final component is
/// kept.
///
/// # Errors
/// Returns an error if the filename is not valid UTF-8.
pub fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(ToString::to_string)
        .ok_or_else(|| anyhow::anyhow!("Non-UTF-8 filename in data directory: {}", path.display()))
}

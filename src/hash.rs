use anyhow::{Context, Result};
use memmap2::MmapOptions;
use std::fs::File;
use std::path::Path;
use tracing::debug;
use xxhash_rust::xxh3::xxh3_128;

/// Default memory-mapping threshold in bytes.
pub const DEFAULT_MMAP_THRESHOLD: u64 = 1_048_576;

/// Computes the xxHash3 128-bit checksum of raw bytes as lowercase hex.
#[must_use]
pub fn hash_bytes(data: &[u8]) -> String {
    let hash = xxh3_128(data);
    format!("{hash:032x}")
}

/// Computes the content checksum of a file.
///
/// Small files are read whole; files at or above `mmap_threshold` are
/// memory-mapped to avoid a full copy.
///
/// # Errors
/// Returns an error if the file cannot be opened or read.
pub fn hash_file(path: &Path, mmap_threshold: u64) -> Result<String> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open file for hashing: {}", path.display()))?;
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to get metadata for: {}", path.display()))?;

    let size = metadata.len();
    let checksum = if size == 0 {
        hash_bytes(b"")
    } else if size < mmap_threshold {
        let content = std::fs::read(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        hash_bytes(&content)
    } else {
        let mmap = unsafe { MmapOptions::new().map(&file) }
            .with_context(|| format!("Failed to mmap file: {}", path.display()))?;
        hash_bytes(&mmap)
    };

    debug!(path = %path.display(), size, %checksum, "hashed file");
    Ok(checksum)
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::path::Path;

use crate::MANIFEST_VERSION;

/// Persisted mapping of filenames to content checksums.
///
/// The on-disk format is pretty-printed JSON with 4-space indentation:
///
/// ```json
/// {
///     "manifest_version": "0.1",
///     "files": {
///         "index.html": "7f3c…"
///     }
/// }
/// ```
///
/// `files` keys are sorted on write so an unchanged state always serializes
/// to identical bytes. Top-level fields other than `manifest_version` and
/// `files` are preserved across a rewrite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Schema version tag. Only [`MANIFEST_VERSION`] is recognized; any
    /// other value is treated as legacy and carried through unchanged.
    pub manifest_version: String,

    /// Filename (no path component) to hex checksum of file content.
    pub files: BTreeMap<String, String>,

    /// Unknown top-level fields, kept verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Manifest {
    /// Creates an empty manifest with the current schema version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            manifest_version: MANIFEST_VERSION.to_string(),
            files: BTreeMap::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Whether the version tag matches the recognized schema revision.
    #[must_use]
    pub fn is_current_version(&self) -> bool {
        self.manifest_version == MANIFEST_VERSION
    }

    /// Load a manifest from disk.
    ///
    /// A missing or unparsable manifest is fatal; no repair is attempted.
    /// A missing `files` or `manifest_version` key counts as unparsable.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The manifest file does not exist or cannot be read
    /// - The content is not valid JSON for this schema
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Malformed manifest file: {}", path.display()))
    }

    /// Write the manifest to disk as formatted JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be
    /// written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut out = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)
            .context("Failed to serialize manifest")?;
        out.push(b'\n');

        std::fs::write(path, &out)
            .with_context(|| format!("Failed to write manifest file: {}", path.display()))?;
        Ok(())
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_new_manifest_is_current() {
        let manifest = Manifest::new();
        assert!(manifest.is_current_version());
        assert!(manifest.files.is_empty());
    }

    #[test]
    fn test_load_parses_files_and_version() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("spiffs_manifest.json");
        std::fs::write(
            &path,
            r#"{"manifest_version": "0.1", "files": {"a.txt": "aaa", "b.txt": "bbb"}}"#,
        )?;

        let manifest = Manifest::load(&path)?;
        assert!(manifest.is_current_version());
        assert_eq!(manifest.files.len(), 2);
        assert_eq!(manifest.files["a.txt"], "aaa");
        Ok(())
    }

    #[test]
    fn test_load_missing_file_is_fatal() {
        let result = Manifest::load(Path::new("/nonexistent/spiffs_manifest.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_files_key_is_fatal() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("spiffs_manifest.json");
        std::fs::write(&path, r#"{"manifest_version": "0.1"}"#)?;

        assert!(Manifest::load(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_load_garbage_is_fatal() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("spiffs_manifest.json");
        std::fs::write(&path, "not json at all")?;

        assert!(Manifest::load(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_legacy_version_detected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("spiffs_manifest.json");
        std::fs::write(&path, r#"{"manifest_version": "0.0", "files": {}}"#)?;

        let manifest = Manifest::load(&path)?;
        assert!(!manifest.is_current_version());
        Ok(())
    }

    #[test]
    fn test_save_is_deterministic() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("spiffs_manifest.json");

        let mut manifest = Manifest::new();
        manifest.files.insert("b.txt".to_string(), "bbb".to_string());
        manifest.files.insert("a.txt".to_string(), "aaa".to_string());

        manifest.save(&path)?;
        let first = std::fs::read(&path)?;
        manifest.save(&path)?;
        let second = std::fs::read(&path)?;
        assert_eq!(first, second);

        // Sorted key order regardless of insertion order.
        let text = String::from_utf8(first)?;
        let a_pos = text.find("a.txt").unwrap();
        let b_pos = text.find("b.txt").unwrap();
        assert!(a_pos < b_pos);
        Ok(())
    }

    #[test]
    fn test_unknown_top_level_fields_survive_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("spiffs_manifest.json");
        std::fs::write(
            &path,
            r#"{"manifest_version": "0.1", "files": {}, "partition": "spiffs0"}"#,
        )?;

        let mut manifest = Manifest::load(&path)?;
        manifest.files.insert("a.txt".to_string(), "aaa".to_string());
        manifest.save(&path)?;

        let reloaded = Manifest::load(&path)?;
        assert_eq!(
            reloaded.extra.get("partition"),
            Some(&serde_json::Value::String("spiffs0".to_string()))
        );
        Ok(())
    }

    #[test]
    fn test_save_uses_four_space_indent() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("spiffs_manifest.json");

        let mut manifest = Manifest::new();
        manifest.files.insert("a.txt".to_string(), "aaa".to_string());
        manifest.save(&path)?;

        let text = std::fs::read_to_string(&path)?;
        assert!(text.contains("\n    \"manifest_version\""));
        assert!(text.contains("\n        \"a.txt\""));
        Ok(())
    }
}

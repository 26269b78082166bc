use std::collections::BTreeMap;

/// A single difference between the recorded manifest and the directory
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// File present in the directory but not in the manifest.
    Added {
        /// Bare filename.
        name: String,
        /// Checksum of the new file.
        checksum: String,
    },
    /// File present in both with differing checksums.
    Changed {
        /// Bare filename.
        name: String,
        /// Checksum recorded in the manifest.
        old: String,
        /// Checksum of the file on disk.
        new: String,
    },
    /// File recorded in the manifest but absent from the directory.
    Removed {
        /// Bare filename.
        name: String,
    },
}

impl Change {
    /// Returns the filename the change applies to.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Added { name, .. } | Self::Changed { name, .. } | Self::Removed { name } => name,
        }
    }

    /// Returns a single-character representation of the change kind.
    #[must_use]
    pub const fn status_char(&self) -> char {
        match self {
            Self::Added { .. } => 'A',
            Self::Changed { .. } => 'M',
            Self::Removed { .. } => 'D',
        }
    }

    /// Human-readable one-line description for the run log.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Added { name, checksum } => {
                format!("Adding checksum of new file {name} : {checksum}")
            }
            Self::Changed { name, old, new } => {
                format!("Updating checksum of file {name} from {old} -> {new}")
            }
            Self::Removed { name } => {
                format!("Removing checksum of deleted file {name}")
            }
        }
    }
}

/// Result of diffing the manifest's recorded checksums against a fresh
/// directory snapshot. The three categories are disjoint by construction.
#[derive(Debug, Clone, Default)]
pub struct ManifestDiff {
    /// All differences, added/changed first (snapshot order), removals last.
    pub changes: Vec<Change>,
}

impl ManifestDiff {
    /// Computes the diff between the recorded `files` mapping and the
    /// freshly hashed snapshot mapping.
    #[must_use]
    pub fn compute(old: &BTreeMap<String, String>, new: &BTreeMap<String, String>) -> Self {
        let mut changes = Vec::new();

        for (name, checksum) in new {
            match old.get(name) {
                Some(recorded) if recorded != checksum => changes.push(Change::Changed {
                    name: name.clone(),
                    old: recorded.clone(),
                    new: checksum.clone(),
                }),
                Some(_) => {}
                None => changes.push(Change::Added {
                    name: name.clone(),
                    checksum: checksum.clone(),
                }),
            }
        }

        for name in old.keys() {
            if !new.contains_key(name) {
                changes.push(Change::Removed { name: name.clone() });
            }
        }

        Self { changes }
    }

    /// Whether the manifest already matches the snapshot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of added entries.
    #[must_use]
    pub fn added(&self) -> usize {
        self.count(|c| matches!(c, Change::Added { .. }))
    }

    /// Number of changed entries.
    #[must_use]
    pub fn changed(&self) -> usize {
        self.count(|c| matches!(c, Change::Changed { .. }))
    }

    /// Number of removed entries.
    #[must_use]
    pub fn removed(&self) -> usize {
        self.count(|c| matches!(c, Change::Removed { .. }))
    }

    fn count(&self, pred: impl Fn(&Change) -> bool) -> usize {
        self.changes.iter().filter(|c| pred(c)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_no_changes() {
        let old = map(&[("a.txt", "aaa"), ("b.txt", "bbb")]);
        let diff = ManifestDiff::compute(&old, &old.clone());
        assert!(diff.is_empty());
    }

    #[test]
    fn test_added_file() {
        let old = map(&[("a.txt", "aaa")]);
        let new = map(&[("a.txt", "aaa"), ("b.txt", "bbb")]);

        let diff = ManifestDiff::compute(&old, &new);
        assert_eq!(diff.added(), 1);
        assert_eq!(diff.changed(), 0);
        assert_eq!(diff.removed(), 0);
        assert_eq!(diff.changes[0].name(), "b.txt");
        assert_eq!(diff.changes[0].status_char(), 'A');
    }

    #[test]
    fn test_removed_file() {
        let old = map(&[("a.txt", "aaa"), ("b.txt", "bbb")]);
        let new = map(&[("a.txt", "aaa")]);

        let diff = ManifestDiff::compute(&old, &new);
        assert_eq!(diff.removed(), 1);
        assert_eq!(diff.changes[0], Change::Removed {
            name: "b.txt".to_string()
        });
    }

    #[test]
    fn test_changed_file() {
        let old = map(&[("a.txt", "aaa")]);
        let new = map(&[("a.txt", "bbb")]);

        let diff = ManifestDiff::compute(&old, &new);
        assert_eq!(diff.changed(), 1);
        assert_eq!(
            diff.changes[0].describe(),
            "Updating checksum of file a.txt from aaa -> bbb"
        );
    }

    #[test]
    fn test_all_categories_at_once() {
        let old = map(&[("keep.txt", "k"), ("change.txt", "old"), ("gone.txt", "g")]);
        let new = map(&[("keep.txt", "k"), ("change.txt", "new"), ("fresh.txt", "f")]);

        let diff = ManifestDiff::compute(&old, &new);
        assert_eq!(diff.added(), 1);
        assert_eq!(diff.changed(), 1);
        assert_eq!(diff.removed(), 1);
        assert_eq!(diff.changes.len(), 3);
    }

    #[test]
    fn test_empty_to_populated() {
        let old = BTreeMap::new();
        let new = map(&[("a.txt", "aaa")]);

        let diff = ManifestDiff::compute(&old, &new);
        assert_eq!(diff.added(), 1);
        assert_eq!(
            diff.changes[0].describe(),
            "Adding checksum of new file a.txt : aaa"
        );
    }
}

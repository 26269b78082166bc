use crate::diff::ManifestDiff;
use crate::manifest::Manifest;
use crate::{SyncContext, hash, output, scanner};
use anyhow::Result;
use std::collections::BTreeMap;
use tracing::info;

/// Runs the manifest synchronization pass.
///
/// Reads the manifest, hashes every file in the data directory, diffs, and
/// rewrites the manifest only when a difference exists. The rewrite happens
/// strictly after all hashing succeeded, so any failure leaves the manifest
/// in its prior state. With `dry_run` the diff is reported but nothing is
/// written.
///
/// # Errors
/// Returns an error if the manifest is missing or malformed, or if any data
/// file cannot be hashed.
pub fn execute(ctx: &SyncContext, dry_run: bool) -> Result<()> {
    ctx.check_data_dir()?;

    let manifest_path = ctx.manifest_path();
    let mut manifest = Manifest::load(&manifest_path)?;
    if !manifest.is_current_version() {
        output::warning("Legacy manifest file found");
    }

    let newfiles = collect_checksums(ctx)?;
    let diff = ManifestDiff::compute(&manifest.files, &newfiles);

    for change in &diff.changes {
        println!("{}", change.describe());
    }

    if diff.is_empty() {
        println!("No changes in manifest file required");
        return Ok(());
    }

    info!(
        added = diff.added(),
        changed = diff.changed(),
        removed = diff.removed(),
        dry_run,
        "manifest drift detected"
    );

    if dry_run {
        output::info(&format!(
            "Dry run: {} added, {} changed, {} removed (manifest not written)",
            diff.added(),
            diff.changed(),
            diff.removed()
        ));
        return Ok(());
    }

    manifest.files = newfiles;
    manifest.save(&manifest_path)?;

    output::success(&format!(
        "Manifest updated: {} added, {} changed, {} removed",
        diff.added(),
        diff.changed(),
        diff.removed()
    ));
    Ok(())
}

/// Hashes every file in the data directory snapshot into a fresh
/// filename-to-checksum mapping.
///
/// # Errors
/// Returns an error if the directory cannot be read or any file cannot be
/// hashed.
pub fn collect_checksums(ctx: &SyncContext) -> Result<BTreeMap<String, String>> {
    let files = scanner::snapshot(&ctx.data_dir, &ctx.manifest_name)?;

    let mut newfiles = BTreeMap::new();
    for path in files {
        let name = scanner::file_name(&path)?;
        let checksum = hash::hash_file(&path, ctx.config.hash.mmap_threshold)?;
        output::verbose(&format!("hashed {name} -> {checksum}"));
        newfiles.insert(name, checksum);
    }
    Ok(newfiles)
}

use crate::diff::{Change, ManifestDiff};
use crate::manifest::Manifest;
use crate::{SyncContext, output};
use anyhow::Result;
use colored::Colorize;

/// Reports pending manifest drift without writing anything.
///
/// Returns `true` when the manifest differs from the directory state, so
/// the caller can turn drift into a non-zero exit code for build pipelines.
///
/// # Errors
/// Returns an error if the manifest is missing or malformed, or if any data
/// file cannot be hashed.
pub fn execute(ctx: &SyncContext) -> Result<bool> {
    ctx.check_data_dir()?;

    let manifest = Manifest::load(&ctx.manifest_path())?;
    if !manifest.is_current_version() {
        output::warning("Legacy manifest file found");
    }

    let newfiles = super::sync::collect_checksums(ctx)?;
    let diff = ManifestDiff::compute(&manifest.files, &newfiles);

    if diff.is_empty() {
        println!("Manifest up to date");
        return Ok(false);
    }

    print_group(&diff, 'A', "New files");
    print_group(&diff, 'M', "Changed files");
    print_group(&diff, 'D', "Deleted files");

    println!(
        "\n{} added, {} changed, {} removed",
        diff.added(),
        diff.changed(),
        diff.removed()
    );
    Ok(true)
}

fn print_group(diff: &ManifestDiff, kind: char, header: &str) {
    let entries: Vec<&Change> = diff
        .changes
        .iter()
        .filter(|c| c.status_char() == kind)
        .collect();

    if entries.is_empty() {
        return;
    }

    println!("{}:", header.bold());
    for change in entries {
        let label = match change {
            Change::Added { .. } => "added".green(),
            Change::Changed { .. } => "changed".yellow(),
            Change::Removed { .. } => "removed".red(),
        };
        println!("  {}: {}", label, change.name());
    }
}

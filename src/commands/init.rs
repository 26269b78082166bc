use crate::manifest::Manifest;
use crate::{SyncContext, output};
use anyhow::{Context, Result};

/// Creates a fresh empty manifest in the data directory.
///
/// The data directory is created if it does not exist. An existing manifest
/// is never overwritten unless `force` is set; `sync` deliberately treats a
/// missing manifest as fatal, so this is how a new data directory is
/// bootstrapped.
///
/// # Errors
/// Returns an error if the manifest already exists (without `force`) or if
/// the directory or file cannot be created.
pub fn execute(ctx: &SyncContext, force: bool) -> Result<()> {
    std::fs::create_dir_all(&ctx.data_dir).with_context(|| {
        format!(
            "Failed to create data directory: {}",
            ctx.data_dir.display()
        )
    })?;

    let manifest_path = ctx.manifest_path();
    if manifest_path.exists() && !force {
        return Err(anyhow::anyhow!(
            "Manifest already exists: {} (use --force to overwrite)",
            manifest_path.display()
        ));
    }

    Manifest::new().save(&manifest_path)?;
    output::success(&format!(
        "Initialized empty manifest at {}",
        manifest_path.display()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_manifest_and_dir() -> Result<()> {
        let dir = tempdir()?;
        let ctx = SyncContext::new_explicit(dir.path().join("data"));

        execute(&ctx, false)?;

        let manifest = Manifest::load(&ctx.manifest_path())?;
        assert!(manifest.is_current_version());
        assert!(manifest.files.is_empty());
        Ok(())
    }

    #[test]
    fn test_init_refuses_to_overwrite() -> Result<()> {
        let dir = tempdir()?;
        let ctx = SyncContext::new_explicit(dir.path().to_path_buf());

        execute(&ctx, false)?;
        assert!(execute(&ctx, false).is_err());
        Ok(())
    }

    #[test]
    fn test_init_force_overwrites() -> Result<()> {
        let dir = tempdir()?;
        let ctx = SyncContext::new_explicit(dir.path().to_path_buf());

        std::fs::write(
            ctx.manifest_path(),
            r#"{"manifest_version": "0.1", "files": {"a.txt": "aaa"}}"#,
        )?;
        execute(&ctx, true)?;

        let manifest = Manifest::load(&ctx.manifest_path())?;
        assert!(manifest.files.is_empty());
        Ok(())
    }
}

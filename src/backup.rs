//! Backup-by-rename for pre-existing configuration.
//!
//! The only recovery mechanism this tool carries: anything about to be
//! overwritten is renamed to a timestamped sibling first, never deleted.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

/// Rename `path` to a `<name>.bak.<YYYYMMDD_HHMMSS>` sibling if it exists.
/// Returns the backup path, or `None` when there was nothing to back up.
pub fn backup_existing(path: &Path) -> Result<Option<PathBuf>> {
    if !path.exists() && !path.is_symlink() {
        return Ok(None);
    }

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("no usable file name in {}", path.display()))?;
    let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();

    // rename() overwrites an existing target, so two backups within the same
    // second must not share a name.
    let mut backup = path.with_file_name(format!("{file_name}.bak.{stamp}"));
    let mut counter = 1;
    while backup.exists() || backup.is_symlink() {
        backup = path.with_file_name(format!("{file_name}.bak.{stamp}.{counter}"));
        counter += 1;
    }

    std::fs::rename(path, &backup).with_context(|| {
        format!("backing up {} to {}", path.display(), backup.display())
    })?;
    Ok(Some(backup))
}

use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// List the candidate timing logs in `dir`, in directory-listing order.
///
/// A candidate is any non-directory entry whose file name contains the
/// substring `.dat`. Subdirectories are not entered.
pub fn scan_directory(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("read log directory {}", dir.display()))?;

    let mut out = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read log directory {}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        if entry.file_name().to_string_lossy().contains(".dat") {
            out.push(path);
        }
    }
    Ok(out)
}

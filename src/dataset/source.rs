//! Dataset source resolution
//!
//! Resolves a local directory of class-labeled image folders into the
//! effective dataset root and discovers the class directories within it.
//! Fetching or extracting a remote archive is deliberately not handled
//! here; the CLI's `download` command prints manual instructions instead.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

/// Resolve a local path into the effective dataset root.
///
/// The path must exist and be a directory. No download or extraction is
/// performed; the caller hands over an already-materialized dataset.
pub fn resolve_source(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        anyhow::bail!("Dataset directory does not exist: {:?}", path);
    }
    if !path.is_dir() {
        anyhow::bail!("Dataset path is not a directory: {:?}", path);
    }

    info!("Using dataset at {:?}", path);
    Ok(path.to_path_buf())
}

/// List the class directories directly under `root`, sorted by name.
///
/// Only entries whose file type is a directory are kept. Regular files at
/// the root (manifests, archives, hidden files) are skipped by type, so a
/// class name containing a dot is a valid class.
pub fn list_class_dirs(root: &Path) -> Result<Vec<String>> {
    let mut classes = Vec::new();

    for entry in std::fs::read_dir(root)
        .with_context(|| format!("Failed to read dataset directory {:?}", root))?
    {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            if let Some(name) = entry.file_name().to_str() {
                classes.push(name.to_string());
            }
        }
    }

    classes.sort();
    Ok(classes)
}

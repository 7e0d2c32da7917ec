//! Random train/val splitting
//!
//! For each class folder under the source root, shuffles the image list
//! and copies a fixed-size prefix into `train/<class>` and the following
//! slice into `val/<class>`, mirroring the class layout under both trees.
//! The two slices are disjoint by construction; any remainder past
//! `train_count + val_count` stays untouched in the source.
//!
//! Splitting only ever writes: directories are created idempotently and
//! source files are copied, never moved or modified. Re-running merges
//! into an existing destination without removing previously copied files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;
use walkdir::WalkDir;

use crate::dataset::source::list_class_dirs;
use crate::{DEFAULT_TRAIN_COUNT, DEFAULT_VAL_COUNT, TRAIN_DIR, VAL_DIR};

/// Name of the JSON manifest written into the destination directory
pub const MANIFEST_FILE: &str = "split_manifest.json";

/// Configuration for dataset splitting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Maximum number of training images sampled per class
    pub train_count: usize,
    /// Maximum number of validation images sampled per class
    pub val_count: usize,
    /// Random seed for a reproducible shuffle; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            train_count: DEFAULT_TRAIN_COUNT,
            val_count: DEFAULT_VAL_COUNT,
            seed: None,
        }
    }
}

/// Per-class outcome of a split
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSplit {
    /// Class name (the source folder name)
    pub name: String,
    /// Number of files found in the source class folder
    pub available: usize,
    /// Number of files copied into the train tree
    pub train: usize,
    /// Number of files copied into the val tree
    pub val: usize,
}

/// Summary of a completed split, also persisted as JSON in the destination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitReport {
    pub train_dir: PathBuf,
    pub val_dir: PathBuf,
    pub classes: Vec<ClassSplit>,
    pub total_train: usize,
    pub total_val: usize,
    pub config: SplitConfig,
}

impl std::fmt::Display for SplitReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Split summary:")?;
        writeln!(f, "  Classes: {}", self.classes.len())?;
        for class in &self.classes {
            writeln!(
                f,
                "  {}: {} train, {} val ({} available)",
                class.name, class.train, class.val, class.available
            )?;
        }
        writeln!(f, "  Total train images: {}", self.total_train)?;
        writeln!(f, "  Total val images: {}", self.total_val)?;
        Ok(())
    }
}

/// Split a class-folder dataset into train and val trees.
///
/// For every class directory under `root`, shuffles the file list and
/// copies the first `train_count` entries into
/// `destination/train/<class>` and the next `val_count` entries into
/// `destination/val/<class>`. Classes with fewer images yield smaller
/// or empty slices; this is not an error.
///
/// Copy failures propagate immediately and may leave a half-populated
/// destination tree behind; no cleanup is attempted.
pub fn split_dataset(
    root: &Path,
    destination: &Path,
    config: &SplitConfig,
) -> Result<SplitReport> {
    let classes = list_class_dirs(root)?;
    if classes.is_empty() {
        anyhow::bail!("No class directories found in {:?}", root);
    }

    info!(
        "Splitting {} classes: {} train / {} val images per class",
        classes.len(),
        config.train_count,
        config.val_count
    );

    let train_dir = destination.join(TRAIN_DIR);
    let val_dir = destination.join(VAL_DIR);
    fs::create_dir_all(&train_dir)
        .with_context(|| format!("Failed to create train directory {:?}", train_dir))?;
    fs::create_dir_all(&val_dir)
        .with_context(|| format!("Failed to create val directory {:?}", val_dir))?;

    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut class_splits = Vec::with_capacity(classes.len());
    let mut total_train = 0;
    let mut total_val = 0;

    for class_name in &classes {
        let class_train_dir = train_dir.join(class_name);
        let class_val_dir = val_dir.join(class_name);
        fs::create_dir_all(&class_train_dir)
            .with_context(|| format!("Failed to create {:?}", class_train_dir))?;
        fs::create_dir_all(&class_val_dir)
            .with_context(|| format!("Failed to create {:?}", class_val_dir))?;

        let mut files = list_class_files(&root.join(class_name));
        let available = files.len();

        // Sort before shuffling so a fixed seed selects the same files
        // regardless of directory listing order.
        files.sort();
        files.shuffle(&mut rng);

        let train_slice = &files[..config.train_count.min(files.len())];
        let val_end = (config.train_count + config.val_count).min(files.len());
        let val_slice = &files[train_slice.len()..val_end];

        copy_into(train_slice, &class_train_dir)?;
        copy_into(val_slice, &class_val_dir)?;

        info!(
            "Copied images for {}: {} train, {} val",
            class_name,
            train_slice.len(),
            val_slice.len()
        );

        total_train += train_slice.len();
        total_val += val_slice.len();
        class_splits.push(ClassSplit {
            name: class_name.clone(),
            available,
            train: train_slice.len(),
            val: val_slice.len(),
        });
    }

    let report = SplitReport {
        train_dir,
        val_dir,
        classes: class_splits,
        total_train,
        total_val,
        config: config.clone(),
    };

    let manifest_path = destination.join(MANIFEST_FILE);
    let manifest = serde_json::to_string_pretty(&report)?;
    fs::write(&manifest_path, manifest)
        .with_context(|| format!("Failed to write manifest {:?}", manifest_path))?;

    Ok(report)
}

/// List the regular files directly under a class folder.
///
/// Every file is treated as an image; decodability is only checked later
/// by the statistics pass.
fn list_class_files(class_dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(class_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .collect()
}

fn copy_into(files: &[PathBuf], target_dir: &Path) -> Result<()> {
    for src in files {
        let file_name = src
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("Invalid file name: {:?}", src))?;
        let dst = target_dir.join(file_name);
        fs::copy(src, &dst)
            .with_context(|| format!("Failed to copy {:?} to {:?}", src, dst))?;
    }
    Ok(())
}

//! Dataset statistics
//!
//! Walks the produced `train/` and `val/` trees, decodes every image's
//! pixel dimensions and accumulates per-class counts plus global
//! min/max/average height and width. Statistics are ephemeral: computed
//! fresh on every invocation, returned and printed, never persisted.
//!
//! A file that cannot be decoded as an image aborts the pass; there is
//! no skip-and-continue policy.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use image::ImageReader;
use serde::{Deserialize, Serialize};
use tracing::info;
use walkdir::WalkDir;

use crate::dataset::source::list_class_dirs;
use crate::{TRAIN_DIR, VAL_DIR};

/// Denominator used for the average height/width figures.
///
/// The dimension sums always cover both splits. The original tool divided
/// them by the train count alone, inflating the average whenever a val
/// split exists; `TrainOnly` reproduces that figure when parity with old
/// reports matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum AverageBasis {
    /// Divide by the combined train + val image count
    Combined,
    /// Divide by the train image count only (legacy behavior)
    TrainOnly,
}

impl std::fmt::Display for AverageBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AverageBasis::Combined => write!(f, "combined"),
            AverageBasis::TrainOnly => write!(f, "train-only"),
        }
    }
}

/// Configuration for the statistics pass
#[derive(Debug, Clone)]
pub struct StatsConfig {
    pub average_basis: AverageBasis,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            average_basis: AverageBasis::Combined,
        }
    }
}

/// Image count for a single class directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassCount {
    pub name: String,
    pub images: usize,
}

/// Aggregate statistics over a train/val split tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetReport {
    pub num_classes: usize,
    pub train_dir: PathBuf,
    pub val_dir: PathBuf,
    pub train_classes: Vec<ClassCount>,
    pub val_classes: Vec<ClassCount>,
    pub total_train: usize,
    pub total_val: usize,
    /// Average height in pixels (integer division, basis per config)
    pub avg_height: u32,
    /// Average width in pixels (integer division, basis per config)
    pub avg_width: u32,
    pub min_height: u32,
    pub min_width: u32,
    pub max_height: u32,
    pub max_width: u32,
}

impl std::fmt::Display for DatasetReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Training dataset stats:")?;
        for class in &self.train_classes {
            writeln!(f, "  Images in {}: {}", class.name, class.images)?;
        }
        writeln!(f)?;
        writeln!(f, "Validation dataset stats:")?;
        for class in &self.val_classes {
            writeln!(f, "  Images in {}: {}", class.name, class.images)?;
        }
        writeln!(f)?;
        writeln!(f, "AVG_IMG_HEIGHT: {}", self.avg_height)?;
        writeln!(f, "AVG_IMG_WIDTH: {}", self.avg_width)?;
        writeln!(f, "MIN_HEIGHT: {}", self.min_height)?;
        writeln!(f, "MIN_WIDTH: {}", self.min_width)?;
        writeln!(f, "MAX_HEIGHT: {}", self.max_height)?;
        writeln!(f, "MAX_WIDTH: {}", self.max_width)?;
        Ok(())
    }
}

/// Running dimension aggregates, local to a single statistics pass
#[derive(Debug)]
struct DimAccumulator {
    sum_height: u64,
    sum_width: u64,
    min_height: u32,
    min_width: u32,
    max_height: u32,
    max_width: u32,
}

impl DimAccumulator {
    fn new() -> Self {
        Self {
            sum_height: 0,
            sum_width: 0,
            min_height: u32::MAX,
            min_width: u32::MAX,
            max_height: 0,
            max_width: 0,
        }
    }

    fn record(&mut self, width: u32, height: u32) {
        self.sum_height += u64::from(height);
        self.sum_width += u64::from(width);
        self.min_height = self.min_height.min(height);
        self.min_width = self.min_width.min(width);
        self.max_height = self.max_height.max(height);
        self.max_width = self.max_width.max(width);
    }
}

/// Compute aggregate statistics over a split destination directory.
///
/// `destination` must contain `train/` and `val/` subtrees with the same
/// number of class directories; a mismatch is a fatal error. Every file
/// under a class directory is decoded for its dimensions, so a single
/// corrupt or non-image file aborts the whole pass.
pub fn report(destination: &Path, config: &StatsConfig) -> Result<DatasetReport> {
    let train_dir = destination.join(TRAIN_DIR);
    let val_dir = destination.join(VAL_DIR);

    let train_class_names = list_class_dirs(&train_dir)?;
    let val_class_names = list_class_dirs(&val_dir)?;

    if train_class_names.len() != val_class_names.len() {
        anyhow::bail!(
            "Class directory count mismatch: {} in {:?} vs {} in {:?}",
            train_class_names.len(),
            train_dir,
            val_class_names.len(),
            val_dir
        );
    }

    let mut acc = DimAccumulator::new();

    let (train_classes, total_train) = scan_split(&train_dir, &train_class_names, &mut acc)?;
    let (val_classes, total_val) = scan_split(&val_dir, &val_class_names, &mut acc)?;

    let denominator = match config.average_basis {
        AverageBasis::Combined => total_train + total_val,
        AverageBasis::TrainOnly => total_train,
    };
    if denominator == 0 {
        anyhow::bail!(
            "No images found under {:?}; cannot compute averages",
            destination
        );
    }

    info!(
        "Scanned {} train and {} val images across {} classes",
        total_train,
        total_val,
        train_class_names.len()
    );

    Ok(DatasetReport {
        num_classes: train_class_names.len(),
        train_dir,
        val_dir,
        train_classes,
        val_classes,
        total_train,
        total_val,
        avg_height: (acc.sum_height / denominator as u64) as u32,
        avg_width: (acc.sum_width / denominator as u64) as u32,
        min_height: acc.min_height,
        min_width: acc.min_width,
        max_height: acc.max_height,
        max_width: acc.max_width,
    })
}

/// Scan one split tree: per-class image counts plus dimension aggregates.
fn scan_split(
    split_dir: &Path,
    class_names: &[String],
    acc: &mut DimAccumulator,
) -> Result<(Vec<ClassCount>, usize)> {
    let mut counts = Vec::with_capacity(class_names.len());
    let mut total = 0;

    for class_name in class_names {
        let class_dir = split_dir.join(class_name);
        let mut images = 0;

        for entry in WalkDir::new(&class_dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let (width, height) = image_dimensions(entry.path())?;
            acc.record(width, height);
            images += 1;
        }

        total += images;
        counts.push(ClassCount {
            name: class_name.clone(),
            images,
        });
    }

    Ok((counts, total))
}

fn image_dimensions(path: &Path) -> Result<(u32, u32)> {
    ImageReader::open(path)
        .with_context(|| format!("Failed to open image {:?}", path))?
        .with_guessed_format()
        .with_context(|| format!("Failed to probe image format of {:?}", path))?
        .into_dimensions()
        .with_context(|| format!("Failed to decode image {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_image(path: &Path, width: u32, height: u32) {
        let img = image::ImageBuffer::from_fn(width, height, |_, _| image::Rgb([200u8, 0u8, 0u8]));
        img.save(path).unwrap();
    }

    fn create_split_class(dest: &Path, split: &str, class: &str, count: usize, w: u32, h: u32) {
        let dir = dest.join(split).join(class);
        fs::create_dir_all(&dir).unwrap();
        for i in 0..count {
            create_test_image(&dir.join(format!("img_{:02}.png", i)), w, h);
        }
    }

    #[test]
    fn test_fixed_dimensions_collapse_aggregates() {
        let dest = TempDir::new().unwrap();
        create_split_class(dest.path(), "train", "daisy", 3, 20, 10);
        create_split_class(dest.path(), "train", "roses", 2, 20, 10);
        create_split_class(dest.path(), "val", "daisy", 1, 20, 10);
        create_split_class(dest.path(), "val", "roses", 1, 20, 10);

        let stats = report(dest.path(), &StatsConfig::default()).unwrap();

        assert_eq!(stats.num_classes, 2);
        assert_eq!(stats.total_train, 5);
        assert_eq!(stats.total_val, 2);
        assert_eq!(stats.avg_height, 10);
        assert_eq!(stats.min_height, 10);
        assert_eq!(stats.max_height, 10);
        assert_eq!(stats.avg_width, 20);
        assert_eq!(stats.min_width, 20);
        assert_eq!(stats.max_width, 20);
    }

    #[test]
    fn test_per_class_counts_match_listings() {
        let dest = TempDir::new().unwrap();
        create_split_class(dest.path(), "train", "daisy", 4, 8, 8);
        create_split_class(dest.path(), "train", "roses", 2, 8, 8);
        create_split_class(dest.path(), "val", "daisy", 1, 8, 8);
        create_split_class(dest.path(), "val", "roses", 0, 8, 8);

        let stats = report(dest.path(), &StatsConfig::default()).unwrap();

        assert_eq!(stats.train_classes[0].name, "daisy");
        assert_eq!(stats.train_classes[0].images, 4);
        assert_eq!(stats.train_classes[1].images, 2);
        assert_eq!(stats.val_classes[0].images, 1);
        assert_eq!(stats.val_classes[1].images, 0);
    }

    #[test]
    fn test_class_count_mismatch_is_fatal() {
        let dest = TempDir::new().unwrap();
        create_split_class(dest.path(), "train", "daisy", 1, 8, 8);
        create_split_class(dest.path(), "train", "roses", 1, 8, 8);
        create_split_class(dest.path(), "val", "daisy", 1, 8, 8);

        assert!(report(dest.path(), &StatsConfig::default()).is_err());
    }

    #[test]
    fn test_undecodable_file_is_fatal() {
        let dest = TempDir::new().unwrap();
        create_split_class(dest.path(), "train", "daisy", 1, 8, 8);
        create_split_class(dest.path(), "val", "daisy", 1, 8, 8);
        fs::write(dest.path().join("train/daisy/notes.txt"), b"not an image").unwrap();

        assert!(report(dest.path(), &StatsConfig::default()).is_err());
    }

    #[test]
    fn test_average_basis_changes_denominator() {
        let dest = TempDir::new().unwrap();
        create_split_class(dest.path(), "train", "daisy", 1, 10, 10);
        create_split_class(dest.path(), "val", "daisy", 1, 30, 30);

        let combined = report(dest.path(), &StatsConfig::default()).unwrap();
        assert_eq!(combined.avg_height, 20); // (10 + 30) / 2

        let legacy = report(
            dest.path(),
            &StatsConfig {
                average_basis: AverageBasis::TrainOnly,
            },
        )
        .unwrap();
        // Sums still cover both splits but divide by the train count alone.
        assert_eq!(legacy.avg_height, 40);
        assert_eq!(legacy.min_height, 10);
        assert_eq!(legacy.max_height, 30);
    }

    #[test]
    fn test_empty_split_tree_is_an_error() {
        let dest = TempDir::new().unwrap();
        fs::create_dir_all(dest.path().join("train/daisy")).unwrap();
        fs::create_dir_all(dest.path().join("val/daisy")).unwrap();

        assert!(report(dest.path(), &StatsConfig::default()).is_err());
    }

    #[test]
    fn test_missing_val_tree_is_an_error() {
        let dest = TempDir::new().unwrap();
        create_split_class(dest.path(), "train", "daisy", 1, 8, 8);

        assert!(report(dest.path(), &StatsConfig::default()).is_err());
    }
}

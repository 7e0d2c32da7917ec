//! # dataprep
//!
//! Tooling for preparing image classification datasets. Given a root
//! directory with one subdirectory per class, this crate copies a random
//! sample of each class's images into parallel `train/` and `val/` trees
//! and reports aggregate statistics over the result.
//!
//! ## Modules
//!
//! - `dataset::source`: dataset root resolution and class discovery
//! - `dataset::split`: random train/val splitting with per-class copy
//! - `dataset::stats`: image dimension and count statistics
//! - `utils`: logging setup
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dataprep::dataset::source::resolve_source;
//! use dataprep::dataset::split::{split_dataset, SplitConfig};
//! use dataprep::dataset::stats::{report, StatsConfig};
//!
//! let root = resolve_source(Path::new("flower_photos"))?;
//! let split = split_dataset(&root, Path::new("dataset"), &SplitConfig::default())?;
//! let stats = report(Path::new("dataset"), &StatsConfig::default())?;
//! ```

pub mod dataset;
pub mod utils;

// Re-export commonly used items for convenience
pub use dataset::source::{list_class_dirs, resolve_source};
pub use dataset::split::{split_dataset, ClassSplit, SplitConfig, SplitReport};
pub use dataset::stats::{report, AverageBasis, DatasetReport, StatsConfig};

/// Name of the training subtree inside the destination directory
pub const TRAIN_DIR: &str = "train";

/// Name of the validation subtree inside the destination directory
pub const VAL_DIR: &str = "val";

/// Default destination directory for the produced split
pub const DEFAULT_OUTPUT_DIR: &str = "dataset";

/// Default number of training images sampled per class
pub const DEFAULT_TRAIN_COUNT: usize = 300;

/// Default number of validation images sampled per class
pub const DEFAULT_VAL_COUNT: usize = 50;

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Dataset preparation pipeline
//!
//! Three sequential stages, each a pure function over the filesystem:
//!
//! 1. `source`: resolve the dataset root and discover class folders
//! 2. `split`: shuffle each class and copy train/val slices into the
//!    destination tree
//! 3. `stats`: walk the produced trees and aggregate image dimensions
//!    and counts
//!
//! The expected source layout is one directory per class:
//!
//! ```text
//! root/
//! ├── daisy/
//! │   ├── image1.jpg
//! │   └── image2.jpg
//! ├── roses/
//! │   └── ...
//! └── ...
//! ```

pub mod source;
pub mod split;
pub mod stats;

pub use source::{list_class_dirs, resolve_source};
pub use split::{split_dataset, ClassSplit, SplitConfig, SplitReport};
pub use stats::{report, AverageBasis, DatasetReport, StatsConfig};

//! dataprep CLI
//!
//! Command-line entry point for preparing image classification datasets:
//! split a class-folder tree into train/val sets and report aggregate
//! statistics over the result.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use dataprep::dataset::source::resolve_source;
use dataprep::dataset::split::{split_dataset, SplitConfig, SplitReport};
use dataprep::dataset::stats::{report, AverageBasis, DatasetReport, StatsConfig};
use dataprep::{DEFAULT_OUTPUT_DIR, DEFAULT_TRAIN_COUNT, DEFAULT_VAL_COUNT};

/// Image classification dataset preparation
///
/// Copies a random per-class sample of images into train/val directory
/// trees and reports image counts and dimension statistics.
#[derive(Parser, Debug)]
#[command(name = "dataprep")]
#[command(version)]
#[command(about = "Split class-folder image datasets and report statistics", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split a dataset and report statistics over the result
    Run {
        /// Path to the dataset root (one subdirectory per class)
        #[arg(long)]
        data_path: PathBuf,

        /// Number of training images to copy per class
        #[arg(long, default_value_t = DEFAULT_TRAIN_COUNT)]
        train_count: usize,

        /// Number of validation images to copy per class
        #[arg(long, default_value_t = DEFAULT_VAL_COUNT)]
        val_count: usize,

        /// Destination directory for the train/val trees
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Random seed for a reproducible shuffle
        #[arg(long)]
        seed: Option<u64>,

        /// Denominator for the average dimension figures
        #[arg(long, value_enum, default_value_t = AverageBasis::Combined)]
        average_basis: AverageBasis,
    },

    /// Split a dataset into train/val trees without reporting
    Split {
        /// Path to the dataset root (one subdirectory per class)
        #[arg(long)]
        data_path: PathBuf,

        /// Number of training images to copy per class
        #[arg(long, default_value_t = DEFAULT_TRAIN_COUNT)]
        train_count: usize,

        /// Number of validation images to copy per class
        #[arg(long, default_value_t = DEFAULT_VAL_COUNT)]
        val_count: usize,

        /// Destination directory for the train/val trees
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Random seed for a reproducible shuffle
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Report statistics over an existing train/val tree
    Stats {
        /// Directory containing the train/ and val/ trees
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Denominator for the average dimension figures
        #[arg(long, value_enum, default_value_t = AverageBasis::Combined)]
        average_basis: AverageBasis,
    },

    /// Show how to obtain a dataset to split
    Download,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _ = dataprep::utils::init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            data_path,
            train_count,
            val_count,
            output_dir,
            seed,
            average_basis,
        } => {
            let split_report = cmd_split(&data_path, &output_dir, train_count, val_count, seed)?;
            print_split(&split_report);
            let stats = cmd_stats(&output_dir, average_basis)?;
            print_stats(&stats);
        }

        Commands::Split {
            data_path,
            train_count,
            val_count,
            output_dir,
            seed,
        } => {
            let split_report = cmd_split(&data_path, &output_dir, train_count, val_count, seed)?;
            print_split(&split_report);
        }

        Commands::Stats {
            output_dir,
            average_basis,
        } => {
            let stats = cmd_stats(&output_dir, average_basis)?;
            print_stats(&stats);
        }

        Commands::Download => {
            cmd_download();
        }
    }

    Ok(())
}

fn cmd_split(
    data_path: &Path,
    output_dir: &Path,
    train_count: usize,
    val_count: usize,
    seed: Option<u64>,
) -> Result<SplitReport> {
    let root = resolve_source(data_path)?;

    info!(
        "Splitting {:?} into {:?} ({} train / {} val per class)",
        root, output_dir, train_count, val_count
    );

    let config = SplitConfig {
        train_count,
        val_count,
        seed,
    };
    split_dataset(&root, output_dir, &config)
}

fn cmd_stats(output_dir: &Path, average_basis: AverageBasis) -> Result<DatasetReport> {
    info!("Computing dataset statistics for {:?}", output_dir);
    let config = StatsConfig { average_basis };
    report(output_dir, &config)
}

fn print_split(split: &SplitReport) {
    println!("{}", "Split complete".green().bold());
    print!("{}", split);
    println!();
}

fn print_stats(stats: &DatasetReport) {
    println!("{}", "Dataset Statistics".cyan().bold());
    println!("  Classes: {}", stats.num_classes);
    println!("  Train dir: {:?}", stats.train_dir);
    println!("  Val dir: {:?}", stats.val_dir);
    println!();
    print!("{}", stats);
}

fn cmd_download() {
    println!(
        "{} No download is performed; point --data-path at a local class-folder tree.",
        "Note:".yellow()
    );
    println!();
    println!("{}", "Example: TensorFlow flower photos".cyan());
    println!("  curl -LO http://download.tensorflow.org/example_images/flower_photos.tgz");
    println!("  tar -xzf flower_photos.tgz");
    println!();
    println!("{}", "Expected structure:".yellow());
    println!("  flower_photos/");
    println!("  ├── daisy/");
    println!("  ├── dandelion/");
    println!("  ├── roses/");
    println!("  ├── sunflowers/");
    println!("  └── tulips/");
    println!();
    println!("{}", "Then run:".green());
    println!("  dataprep run --data-path flower_photos --train-count 300 --val-count 50");
}

//! CLI argument parsing with clap

use crate::config::{Config, Verbosity};
use clap::Parser;
use std::path::PathBuf;

/// exif-from-filename - fill in missing EXIF capture dates
///
/// Walks a directory tree and, for every JPEG without a DateTimeOriginal
/// tag, derives the capture time from the filename and writes it back
/// into the file's EXIF block.
#[derive(Parser, Debug)]
#[command(name = "exif-from-filename")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory to scan
    pub directory: PathBuf,

    /// Logging threshold: 10 debug, 20 info, 30 warning, 40 error, 50 critical
    /// (level names are accepted too)
    #[arg(short, long, default_value_t = Verbosity::INFO)]
    pub verbosity: Verbosity,

    /// Dry run mode - show what would be written without doing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Keep the original modification time of rewritten files
    #[arg(long)]
    pub preserve_mtime: bool,

    /// Hide the progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Output log format as JSON
    #[arg(long)]
    pub json_log: bool,
}

impl Cli {
    /// Convert CLI arguments to Config
    pub fn to_config(&self) -> Config {
        Config {
            directory: self.directory.clone(),
            verbosity: self.verbosity,
            dry_run: self.dry_run,
            preserve_mtime: self.preserve_mtime,
            show_progress: !self.no_progress,
        }
    }
}

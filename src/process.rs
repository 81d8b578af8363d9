//! Directory walk and per-file EXIF date update
//!
//! Handles the core logic of:
//! - Walking the root directory
//! - Checking each image for an existing DateTimeOriginal
//! - Deriving the date from the filename and writing it back
//!
//! Files without the JPEG signature and without a JPEG extension (PNG, GIF,
//! sidecars, ...) are skipped as [`ProcessingStatus::NoMatch`]; a `.jpg`
//! that cannot be decoded is a failure.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::jpeg::JpegFile;
use crate::time::exif::MetadataBlock;
use crate::time::filename::{FilenameDateParser, has_jpeg_extension};
use filetime::FileTime;
use indicatif::ProgressBar;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info, span, warn};
use walkdir::WalkDir;

/// Result of processing a single file
#[derive(Debug, Clone)]
pub struct FileResult {
    /// Image file path
    pub path: PathBuf,
    /// Processing status
    pub status: ProcessingStatus,
    /// Timestamp written (or that would be written in dry run mode)
    pub timestamp: Option<String>,
    /// Error message (if failed)
    pub error: Option<String>,
}

/// Status of file processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStatus {
    /// DateTimeOriginal was written
    Updated,
    /// Dry run - would have written DateTimeOriginal
    DryRun,
    /// DateTimeOriginal already present, file untouched
    AlreadySet,
    /// Filename carries no recognizable date, file untouched
    NoMatch,
    /// Reading, decoding or writing failed
    Failed,
}

impl FileResult {
    fn new(path: &Path, status: ProcessingStatus) -> Self {
        Self {
            path: path.to_path_buf(),
            status,
            timestamp: None,
            error: None,
        }
    }

    fn with_timestamp(mut self, timestamp: String) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    fn failed(path: &Path, error: &Error) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::new(path, ProcessingStatus::Failed)
        }
    }
}

/// Fill in DateTimeOriginal for one image if it is missing
///
/// Never returns an error: any failure is logged as a warning and reported
/// as [`ProcessingStatus::Failed`], leaving the file as it was.
pub fn update_exif_date(path: &Path, parser: &FilenameDateParser, config: &Config) -> FileResult {
    match try_update_exif_date(path, parser, config) {
        Ok(result) => result,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Error processing file");
            FileResult::failed(path, &e)
        }
    }
}

fn try_update_exif_date(
    path: &Path,
    parser: &FilenameDateParser,
    config: &Config,
) -> Result<FileResult> {
    let mut jpeg = match JpegFile::open(path) {
        Err(Error::NotJpeg { .. }) if !has_jpeg_extension(path) => {
            debug!(path = %path.display(), "Not a JPEG file, skipping");
            return Ok(FileResult::new(path, ProcessingStatus::NoMatch));
        }
        other => other?,
    };
    let mut metadata = jpeg.metadata()?.unwrap_or_else(MetadataBlock::empty);

    if metadata.has_date_time_original() {
        debug!(path = %path.display(), "EXIF date already set");
        return Ok(FileResult::new(path, ProcessingStatus::AlreadySet));
    }

    let Some(timestamp) = parser.parse(path) else {
        debug!(path = %path.display(), "Could not parse date from filename");
        return Ok(FileResult::new(path, ProcessingStatus::NoMatch));
    };

    if config.dry_run {
        info!(path = %path.display(), %timestamp, "Would update EXIF date");
        return Ok(FileResult::new(path, ProcessingStatus::DryRun).with_timestamp(timestamp));
    }

    let mtime = if config.preserve_mtime {
        Some(FileTime::from_last_modification_time(&fs::metadata(path)?))
    } else {
        None
    };

    metadata.set_date_time_original(&timestamp);
    jpeg.set_metadata(&metadata)?;
    jpeg.save()?;

    if let Some(mtime) = mtime {
        filetime::set_file_mtime(path, mtime)?;
    }

    info!(path = %path.display(), %timestamp, "Updated EXIF date");
    Ok(FileResult::new(path, ProcessingStatus::Updated).with_timestamp(timestamp))
}

/// Walks a directory tree and updates every image in it
pub struct Processor {
    config: Config,
    parser: FilenameDateParser,
    progress: ProgressBar,
}

impl Processor {
    /// Create a processor with the default filename conventions
    pub fn new(config: Config) -> Self {
        Self {
            config,
            parser: FilenameDateParser::default(),
            progress: ProgressBar::hidden(),
        }
    }

    /// Use a custom set of filename conventions
    pub fn with_parser(mut self, parser: FilenameDateParser) -> Self {
        self.parser = parser;
        self
    }

    /// Report visited directories on `progress`
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Run over every file below the root directory
    ///
    /// Per-file failures are contained in the returned results; errors while
    /// listing directories abort the run.
    pub fn run(&self) -> Result<Vec<FileResult>> {
        let _span = span!(Level::INFO, "processor_run").entered();

        let root = &self.config.directory;
        if !root.is_dir() {
            return Err(Error::NotADirectory(root.clone()));
        }

        let mut results = Vec::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();

            if entry.file_type().is_dir() {
                info!(directory = %path.display(), "Processing directory");
                self.progress.inc(1);
                self.progress.set_message(path.display().to_string());
                continue;
            }

            if !path.is_file() {
                debug!(path = %path.display(), "Not a regular file, skipping");
                continue;
            }

            info!(file = %entry.file_name().to_string_lossy(), "Processing file");
            results.push(update_exif_date(path, &self.parser, &self.config));
        }

        self.progress.finish();

        Ok(results)
    }
}

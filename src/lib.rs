//! exif-from-filename - fill in missing EXIF capture dates from filenames
//!
//! This library walks a photo library and, for every JPEG that lacks an
//! EXIF `DateTimeOriginal` tag, derives the capture time from the filename
//! and writes it back in place:
//! - Filename conventions are pluggable matchers, consulted in order
//! - Existing capture dates are never overwritten
//! - Only the EXIF segment is rewritten; image data is kept byte for byte
//! - Per-file failures are logged and never stop the walk

pub mod cli;
pub mod config;
pub mod error;
pub mod jpeg;
pub mod process;
pub mod progress;
pub mod time;

pub use cli::Cli;
pub use config::{Config, Verbosity};
pub use error::{Error, Result};
pub use process::{FileResult, ProcessingStatus, Processor, update_exif_date};
pub use time::filename::{FilenameDateParser, FilenameMatcher, LegacyIosMatcher};

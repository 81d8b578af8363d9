//! Capture time handling
//!
//! This module provides:
//! - Filename timestamp parsing (`filename`)
//! - The EXIF metadata block and its DateTimeOriginal tag (`exif`)

pub mod exif;
pub mod filename;

use chrono::NaiveDateTime;

/// EXIF datetime layout: "YYYY:MM:DD HH:MM:SS"
pub const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Render a timestamp in the EXIF datetime layout
pub fn format_exif_datetime(timestamp: &NaiveDateTime) -> String {
    timestamp.format(EXIF_DATETIME_FORMAT).to_string()
}

//! Filename timestamp parsing
//!
//! Each naming convention is a [`FilenameMatcher`]. [`FilenameDateParser`]
//! consults its matchers in order and returns the first hit, already in
//! EXIF datetime layout.

use super::format_exif_datetime;
use chrono::{Datelike, NaiveDateTime, Timelike};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, trace};

/// Extensions treated as JPEG, compared case-insensitively
pub const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// Pattern: YYYY-MM-DD HH.MM.SS (whole stem)
static PATTERN_LEGACY_IOS: OnceLock<Regex> = OnceLock::new();

fn legacy_ios_pattern() -> &'static Regex {
    PATTERN_LEGACY_IOS.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}\.\d{2}\.\d{2}$").expect("valid legacy iOS pattern")
    })
}

/// A filename naming convention that may encode the capture time
pub trait FilenameMatcher: Send + Sync {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    /// Try to extract a capture time from `path`
    fn match_path(&self, path: &Path) -> Option<NaiveDateTime>;
}

/// Check whether `path` carries one of the JPEG extensions
pub fn has_jpeg_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| JPEG_EXTENSIONS.contains(&e.as_str()))
}

/// Photos named by older iPhones: `2021-03-15 14.30.05.jpg`
#[derive(Debug, Default, Clone, Copy)]
pub struct LegacyIosMatcher;

impl FilenameMatcher for LegacyIosMatcher {
    fn name(&self) -> &'static str {
        "legacy-ios"
    }

    fn match_path(&self, path: &Path) -> Option<NaiveDateTime> {
        if !has_jpeg_extension(path) {
            return None;
        }

        let stem = path.file_stem()?.to_str()?;
        if !legacy_ios_pattern().is_match(stem) {
            return None;
        }

        let dt = NaiveDateTime::parse_from_str(stem, "%Y-%m-%d %H.%M.%S").ok()?;

        // chrono admits year 0 and a leap second of 60
        if dt.year() < 1 || dt.nanosecond() != 0 {
            return None;
        }

        Some(dt)
    }
}

/// Ordered list of filename conventions
pub struct FilenameDateParser {
    matchers: Vec<Box<dyn FilenameMatcher>>,
}

impl Default for FilenameDateParser {
    fn default() -> Self {
        Self::empty().with_matcher(LegacyIosMatcher)
    }
}

impl FilenameDateParser {
    /// Parser without any conventions; it never matches
    pub fn empty() -> Self {
        Self {
            matchers: Vec::new(),
        }
    }

    /// Append a convention, consulted after the existing ones
    pub fn with_matcher<M: FilenameMatcher + 'static>(mut self, matcher: M) -> Self {
        self.push(matcher);
        self
    }

    /// Append a convention in place
    pub fn push<M: FilenameMatcher + 'static>(&mut self, matcher: M) {
        self.matchers.push(Box::new(matcher));
    }

    /// Names of the registered conventions, in consultation order
    pub fn matcher_names(&self) -> Vec<&'static str> {
        self.matchers.iter().map(|m| m.name()).collect()
    }

    /// Extract the capture time from `path` as "YYYY:MM:DD HH:MM:SS"
    pub fn parse(&self, path: &Path) -> Option<String> {
        for matcher in &self.matchers {
            trace!(path = %path.display(), matcher = matcher.name(), "Trying filename matcher");
            if let Some(dt) = matcher.match_path(path) {
                debug!(path = %path.display(), matcher = matcher.name(), "Matched filename");
                return Some(format_exif_datetime(&dt));
            }
        }

        None
    }
}

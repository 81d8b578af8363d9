//! Configuration types for exif-from-filename

use crate::error::Error;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::Level;

/// Logging threshold on the numeric severity scale
///
/// `10` DEBUG, `20` INFO, `30` WARNING, `40` ERROR, `50` CRITICAL.
/// Anything below `10` also enables trace output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Verbosity(u8);

impl Verbosity {
    pub const DEBUG: Verbosity = Verbosity(10);
    pub const INFO: Verbosity = Verbosity(20);
    pub const WARNING: Verbosity = Verbosity(30);
    pub const ERROR: Verbosity = Verbosity(40);
    pub const CRITICAL: Verbosity = Verbosity(50);

    pub fn new(value: u8) -> Self {
        Verbosity(value)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Map onto the closest `tracing` level, rounding down
    ///
    /// CRITICAL has no `tracing` counterpart and shares ERROR.
    pub fn level(&self) -> Level {
        match self.0 {
            0..=9 => Level::TRACE,
            10..=19 => Level::DEBUG,
            20..=29 => Level::INFO,
            30..=39 => Level::WARN,
            _ => Level::ERROR,
        }
    }
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity::INFO
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Verbosity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(value) = s.parse::<u8>() {
            return Ok(Verbosity(value));
        }

        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(Verbosity(5)),
            "debug" => Ok(Verbosity::DEBUG),
            "info" => Ok(Verbosity::INFO),
            "warn" | "warning" => Ok(Verbosity::WARNING),
            "error" => Ok(Verbosity::ERROR),
            "critical" | "fatal" => Ok(Verbosity::CRITICAL),
            _ => Err(Error::InvalidVerbosity(s.to_string())),
        }
    }
}

/// Configuration for a single run
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory to scan
    pub directory: PathBuf,

    /// Logging threshold
    pub verbosity: Verbosity,

    /// Report what would be written without touching any file
    pub dry_run: bool,

    /// Restore the modification time of rewritten files
    pub preserve_mtime: bool,

    /// Show the per-directory progress spinner
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            verbosity: Verbosity::default(),
            dry_run: false,
            preserve_mtime: false,
            show_progress: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_number() {
        assert_eq!("10".parse::<Verbosity>().unwrap(), Verbosity::DEBUG);
        assert_eq!("20".parse::<Verbosity>().unwrap(), Verbosity::INFO);
        assert_eq!(" 30 ".parse::<Verbosity>().unwrap(), Verbosity::WARNING);
        assert_eq!("25".parse::<Verbosity>().unwrap().value(), 25);
    }

    #[test]
    fn test_verbosity_from_name() {
        assert_eq!("debug".parse::<Verbosity>().unwrap(), Verbosity::DEBUG);
        assert_eq!("WARNING".parse::<Verbosity>().unwrap(), Verbosity::WARNING);
        assert_eq!("Warn".parse::<Verbosity>().unwrap(), Verbosity::WARNING);
        assert_eq!("critical".parse::<Verbosity>().unwrap(), Verbosity::CRITICAL);
        assert!("loud".parse::<Verbosity>().is_err());
        assert!("-1".parse::<Verbosity>().is_err());
    }

    #[test]
    fn test_verbosity_level() {
        assert_eq!(Verbosity::new(0).level(), Level::TRACE);
        assert_eq!(Verbosity::DEBUG.level(), Level::DEBUG);
        assert_eq!(Verbosity::INFO.level(), Level::INFO);
        assert_eq!(Verbosity::new(25).level(), Level::INFO);
        assert_eq!(Verbosity::WARNING.level(), Level::WARN);
        assert_eq!(Verbosity::ERROR.level(), Level::ERROR);
        assert_eq!(Verbosity::CRITICAL.level(), Level::ERROR);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.verbosity, Verbosity::INFO);
        assert!(!config.dry_run);
        assert!(!config.preserve_mtime);
        assert!(config.show_progress);
    }
}

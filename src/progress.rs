//! Progress display for directory traversal

use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;

/// Spinner advanced once per visited directory, hidden when disabled
pub fn directory_progress(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {pos} directories {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    let progress = ProgressBar::new_spinner();
    progress.set_style(style);
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}

/// Log writer that clears the spinner while a line goes to stderr
#[derive(Clone)]
pub struct ProgressWriter {
    progress: ProgressBar,
}

impl ProgressWriter {
    pub fn new(progress: ProgressBar) -> Self {
        Self { progress }
    }
}

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.progress.suspend(|| io::stderr().write(buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.progress.suspend(|| io::stderr().write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_progress_is_hidden() {
        let progress = directory_progress(false);
        assert!(progress.is_hidden());
        progress.inc(3);
        assert_eq!(progress.position(), 3);
    }

    #[test]
    fn test_writer_passes_bytes_through() {
        let mut writer = ProgressWriter::new(ProgressBar::hidden());
        assert_eq!(writer.write(b"line\n").unwrap(), 5);
        writer.flush().unwrap();
    }
}

//! exif-from-filename - fill in missing EXIF capture dates
//!
//! Walks a directory tree and writes a DateTimeOriginal tag derived from
//! the filename into every JPEG that does not have one yet.

use anyhow::Result;
use clap::Parser;
use exif_from_filename::progress::{ProgressWriter, directory_progress};
use exif_from_filename::{Cli, Processor};
use indicatif::ProgressBar;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.to_config();

    let progress = directory_progress(config.show_progress);
    setup_logging(&cli, progress.clone());

    info!(
        version = env!("CARGO_PKG_VERSION"),
        directory = %config.directory.display(),
        dry_run = config.dry_run,
        "exif-from-filename starting"
    );

    let processor = Processor::new(config).with_progress(progress);

    match processor.run() {
        Ok(_) => Ok(()),
        Err(e) => {
            error!(error = %e, "Processing failed");
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Setup logging to stderr, threshold taken from `--verbosity`
///
/// `RUST_LOG` still overrides the threshold when set.
fn setup_logging(cli: &Cli, progress: ProgressBar) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(cli.verbosity.level().into())
        .from_env_lossy();

    let make_writer = move || ProgressWriter::new(progress.clone());
    let subscriber = tracing_subscriber::registry().with(env_filter);

    if cli.json_log {
        subscriber
            .with(fmt::layer().json().with_writer(make_writer))
            .init();
    } else {
        subscriber.with(fmt::layer().with_writer(make_writer)).init();
    }
}

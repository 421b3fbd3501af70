//! CLI entry point for emoji mosaic conversion

use clap::Parser;
use emoji_mosaic::io::cli::{Cli, FileProcessor};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> emoji_mosaic::Result<()> {
    let cli = Cli::parse();

    // Quiet mode keeps warnings so skipped emoji and failed images still show
    let level = if cli.quiet { "warn" } else { cli.log_level.as_str() };
    let log_filter = format!("emoji_mosaic={level}");
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| log_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut processor = FileProcessor::new(cli);
    processor.process()
}

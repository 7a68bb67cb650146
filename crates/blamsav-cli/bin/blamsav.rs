//! `blamsav` binary entry point.
//!
//! Parses arguments, installs logging on stderr, then runs the selected
//! subcommand with results on stdout.

use anyhow::Result;
use blamsav_cli::{Cli, handle};

fn main() -> Result<()> {
    let cli = Cli::from_args();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_level.as_filter())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Codec options: {:?}", cli.codec_options());

    handle(&cli, &mut std::io::stdout().lock())
}

//! # Shotify CLI
//!
//! Plans and previews store screenshot exports from template documents.

use clap::Parser;
use shotify_cli::{CliArgs, CliConfig, LogFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shotify_core=info"));

    // Logs go to stderr so plan and preview output can be piped.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init(),
    }
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let config = CliConfig::from(args);

    init_tracing(config.log_format);
    tracing::debug!(command = ?config.command, "Starting shotify");

    shotify_cli::run(&config)
}

use anyhow::Result;
use clap::Parser;
use std::io;
use tracing_subscriber::EnvFilter;
use varmap::cli::{Cli, Commands};
use varmap::commands::{self, AnalyzeConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    match cli.command {
        Commands::Analyze {
            events,
            output,
            stats,
            config,
            no_parallel,
            pretty,
        } => {
            commands::handle_analyze(AnalyzeConfig {
                events,
                output,
                stats,
                config,
                no_parallel,
                pretty,
            })?;
        }
        Commands::Init { force } => commands::init_config(force)?,
    }
    Ok(())
}

/// `RUST_LOG` wins; otherwise each `-v` raises the level one step from `warn`.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod output;

use commands::{Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Hints(cmd) => commands::hints::run(cmd),
        Commands::InitiationUrl(args) => commands::initiation::run(args),
        Commands::Config(cmd) => commands::settings::run(cmd)
    }
}

mod footprint;
mod geocode;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "okssang-cli")]
#[command(about = "Okssang rooftop greening command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a Korean road address to coordinates
    Geocode {
        /// Road address, e.g. "서울특별시 중구 세종대로 110"
        address: String,
    },
    /// Compute the area in m² of a footprint polygon
    FootprintArea {
        /// JSON file holding an array of [lon, lat] pairs
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = okssang_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Geocode { address } => geocode::run_geocode(&config, &address).await,
        Commands::FootprintArea { file } => footprint::run_footprint_area(&file),
    }
}

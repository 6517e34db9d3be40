use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

mod commands;
mod config;

use commands::{ChartCommand, ConfigCommand, RecordCommand, RecordRepository, StatsCommand};
use config::Config;
use fuel_track_core::{ApiConnection, FileCacheStore, HttpRecordGateway};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "fuel")]
#[command(version)]
#[command(about = "Track fuel purchases, mileage and efficiency", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage fuel records
    Record(RecordCommand),

    /// Show summary statistics
    Stats(StatsCommand),

    /// Plot a metric over time
    Chart(ChartCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Record(cmd)) => {
            let repo = open_repository(&config);
            cmd.run(&repo, &config).await?;
        }
        Some(Commands::Stats(cmd)) => {
            let repo = open_repository(&config);
            cmd.run(&repo, &config).await?;
        }
        Some(Commands::Chart(cmd)) => {
            let repo = open_repository(&config);
            cmd.run(&repo).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

fn open_repository(config: &Config) -> RecordRepository {
    let connection = Arc::new(ApiConnection::new(config.api_url.value.clone()));
    let gateway = HttpRecordGateway::new(connection);
    let cache = FileCacheStore::new(config.data_dir.value.clone());
    RecordRepository::new(cache, gateway)
}

mod config;
mod database;
mod entities;
mod http_server;
mod logging;
mod ports;
mod services;
#[cfg(test)]
mod test_utils;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::Context};

use crate::{
    config::Config, database::Database, http_server::state::AppState, logging::init_telemetry,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    #[arg(short, long, env = "FAN_PAGES_CONFIG")]
    config: Option<PathBuf>,

    /// Tracing filter directive, e.g. `info` or `fan_pages=debug,tower_http=info`
    #[arg(long, default_value = "info", global = true, env = "RUST_LOG")]
    tracing_level: String,

    /// OTLP/gRPC endpoint to export traces to
    #[arg(long, global = true, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    otlp_endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the fan pages over HTTP
    Serve {
        /// The port to run the server on
        #[arg(short, long, default_value = "3000", env = "FAN_PAGES_HTTP_PORT")]
        port: u16,
    },
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Create a default config file, if it doesn't exist
    CreateDefault,
    /// Print the path to the config file
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let telemetry = init_telemetry(args.otlp_endpoint.as_deref(), &args.tracing_level)?;

    let result = run(args).await;
    telemetry.shutdown();

    result
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Commands::Config(config_commands) => match config_commands {
            ConfigCommands::CreateDefault => {
                tracing::debug!("Creating default config");
                let path = Config::create_default()?;
                tracing::info!("Default config at {}", path.display());
            }
            ConfigCommands::Path => match Config::config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No default config path found"),
            },
        },
        Commands::Serve { port } => {
            tracing::debug!("Loading configuration");
            let config = {
                if let Some(config) = &args.config {
                    Config::from_file(config)
                } else {
                    Config::load()
                }
            }
            .with_context(|| "Failed to load fan-pages config")?;

            let database = Arc::new(Database::open(&config.database_path()).await?);
            let state = AppState::from_config(database, config).await?;

            tracing::info!("Starting HTTP server on port: {}", port);
            http_server::app::start(port, Arc::new(state)).await?;
        }
    }

    Ok(())
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use schoolreg_core::{config::Config, migration, server, telemetry};
use tracing::info;

/// School registration and student account provisioning service.
#[derive(Parser, Debug)]
#[command(name = "schoolreg-core", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Create the database if needed and apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let prometheus = telemetry::init(&config.telemetry)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => {
            info!("Running database migrations");
            migration::run_migrations(&config).await
        }
        Command::Serve => {
            info!("Starting SchoolReg Core Service");
            info!("HTTP server listening on {}", config.http_addr());
            server::run(config, prometheus).await
        }
    }
}

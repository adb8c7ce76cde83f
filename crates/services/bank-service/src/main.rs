//! Bank Service - gRPC server for the banking API.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bank_service_lib::config::BankServiceConfig;
use bank_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "bank-service")]
#[command(about = "Banking gRPC service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gRPC server and the task processor
    Serve {
        /// Overrides GRPC_SERVER_ADDRESS
        #[arg(long)]
        address: Option<String>,
    },
    /// Start only the task processor
    Worker,
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = BankServiceConfig::from_env()?;

    match cli.command {
        Commands::Serve { address } => {
            if let Some(address) = address {
                config.grpc.address = address;
            }
            bank_service_lib::run_server(config).await?;
        }
        Commands::Worker => {
            bank_service_lib::run_worker(config).await?;
        }
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            bank_service_lib::run_migrations(config, migrate_action).await?;
        }
    }

    Ok(())
}

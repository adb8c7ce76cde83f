//! Bank Service Library
//!
//! This crate provides the banking gRPC service: the server composition
//! root, wire conversions, token maker, user store and background tasks.

pub mod config;
pub mod grpc;
pub mod infra;
pub mod repository;
pub mod token;
pub mod worker;

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server as GrpcServer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::BankServiceConfig;
use crate::grpc::{Server, ServerError};
use crate::infra::Database;
use crate::repository::{SqlStore, Store};
use crate::worker::{run_task_processor, PostgresTaskDistributor};

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Run the gRPC server together with the task processor.
///
/// Returns when either of them stops. A missing or malformed token key
/// aborts startup before the database is contacted.
pub async fn run_server(config: BankServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Reject a missing or malformed key before any I/O
    config.require_token_key()?;
    Server::check_config(&config).map_err(log_construction_error)?;
    let addr: SocketAddr = config.grpc.address.parse()?;

    let db = Database::connect(&config.database).await?;
    let store: Arc<dyn Store> = Arc::new(SqlStore::new(db.get_connection()));

    let distributor = PostgresTaskDistributor::connect(&config.database.url).await?;
    let storage = distributor.storage();

    if !config.is_production() {
        info!(environment = %config.environment, "Running with development settings");
    }

    let server = Server::new(config, store.clone(), Arc::new(distributor))
        .map_err(log_construction_error)?;

    let processor_handle = tokio::spawn(async move {
        if let Err(e) = run_task_processor(storage, store).await {
            error!("Task processor failed: {}", e);
        }
    });

    info!("gRPC server listening on {}", addr);

    let server_handle = tokio::spawn(async move {
        let result = GrpcServer::builder()
            .layer(TraceLayer::new_for_grpc())
            .add_service(proto::BasicBankServer::new(server))
            .serve(addr)
            .await;

        if let Err(e) = result {
            error!("gRPC server failed: {}", e);
        }
    });

    // Wait for either half to exit
    tokio::select! {
        _ = server_handle => {
            error!("gRPC server exited");
        }
        _ = processor_handle => {
            info!("Task processor exited");
        }
    }

    Ok(())
}

fn log_construction_error(err: ServerError) -> ServerError {
    error!(stage = err.stage().id(), "{}", err);
    err
}

/// Run only the task processor.
pub async fn run_worker(config: BankServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    let store: Arc<dyn Store> = Arc::new(SqlStore::new(db.get_connection()));

    let distributor = PostgresTaskDistributor::connect(&config.database.url).await?;
    run_task_processor(distributor.storage(), store).await?;

    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: BankServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                let marker = if applied { "[x]" } else { "[ ]" };
                info!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

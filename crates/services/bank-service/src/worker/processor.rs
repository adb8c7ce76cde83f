//! Task processor - consumes queued tasks with an apalis worker.

use std::sync::Arc;

use apalis::prelude::*;
use apalis_sql::postgres::PostgresStorage;
use tracing::{error, info};

use common::{AppError, AppResult};

use super::task_send_verify_email::send_verify_email;
use super::PayloadSendVerifyEmail;
use crate::repository::Store;

/// Run the task processor until the monitor stops or Ctrl+C is received.
pub async fn run_task_processor(
    storage: PostgresStorage<PayloadSendVerifyEmail>,
    store: Arc<dyn Store>,
) -> AppResult<()> {
    let worker = WorkerBuilder::new("send-verify-email-worker")
        .data(store)
        .backend(storage)
        .build_fn(send_verify_email);

    info!("Task processor started");

    let monitor = Monitor::new().register(worker);

    tokio::select! {
        result = monitor.run() => {
            if let Err(e) = result {
                error!("Task processor error: {}", e);
                return Err(AppError::internal(format!("Task processor failed: {}", e)));
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal, stopping task processor...");
        }
    }

    info!("Task processor stopped");
    Ok(())
}

//! Task distributor contract and its apalis/Postgres implementation.

use std::time::Duration;

use apalis::prelude::Storage;
use apalis_sql::postgres::PostgresStorage;
use apalis_sql::sqlx::postgres::PgPoolOptions;
use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tracing::info;

use domain::{SEND_VERIFY_EMAIL_DELAY_SECONDS, TASK_SEND_VERIFY_EMAIL};

use super::PayloadSendVerifyEmail;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Errors raised while handing a task to the queue.
#[derive(Error, Debug)]
pub enum DistributeError {
    #[error("failed to connect task queue: {0}")]
    Connect(String),

    #[error("failed to enqueue task: {0}")]
    Enqueue(String),
}

/// Per-task delivery options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskOptions {
    /// Delay before the task becomes visible to workers
    pub process_in: Option<Duration>,
}

impl TaskOptions {
    /// Deliver as soon as a worker is free
    pub fn immediate() -> Self {
        Self::default()
    }

    /// Deliver after `delay`
    pub fn delayed(delay: Duration) -> Self {
        Self {
            process_in: Some(delay),
        }
    }

    /// Default options for the verification email task
    pub fn send_verify_email() -> Self {
        Self::delayed(Duration::from_secs(SEND_VERIFY_EMAIL_DELAY_SECONDS))
    }
}

/// Enqueues units of asynchronous work.
///
/// Shared by every request handler; enqueueing is the only operation.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TaskDistributor: Send + Sync {
    /// Enqueue the verification email for a freshly created user
    async fn distribute_task_send_verify_email(
        &self,
        payload: PayloadSendVerifyEmail,
        options: TaskOptions,
    ) -> Result<(), DistributeError>;
}

/// Task distributor backed by apalis Postgres storage.
#[derive(Clone)]
pub struct PostgresTaskDistributor {
    storage: PostgresStorage<PayloadSendVerifyEmail>,
}

impl PostgresTaskDistributor {
    /// Connect to the queue database and create the apalis tables if needed.
    pub async fn connect(database_url: &str) -> Result<Self, DistributeError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| DistributeError::Connect(e.to_string()))?;

        PostgresStorage::setup(&pool)
            .await
            .map_err(|e| DistributeError::Connect(e.to_string()))?;

        Ok(Self {
            storage: PostgresStorage::new(pool),
        })
    }

    /// Storage handle for the task processor.
    pub fn storage(&self) -> PostgresStorage<PayloadSendVerifyEmail> {
        self.storage.clone()
    }
}

/// Unix time at which a task delayed by `delay` becomes runnable.
fn schedule_at(now: i64, delay: Duration) -> Result<i64, DistributeError> {
    i64::try_from(delay.as_secs())
        .ok()
        .and_then(|secs| now.checked_add(secs))
        .ok_or_else(|| DistributeError::Enqueue(format!("delay of {:?} is out of range", delay)))
}

#[async_trait]
impl TaskDistributor for PostgresTaskDistributor {
    async fn distribute_task_send_verify_email(
        &self,
        payload: PayloadSendVerifyEmail,
        options: TaskOptions,
    ) -> Result<(), DistributeError> {
        let username = payload.username.clone();
        let mut storage = self.storage.clone();

        let result = match options.process_in {
            Some(delay) => {
                let run_at = schedule_at(Utc::now().timestamp(), delay)?;
                storage.schedule(payload, run_at).await.map(|_| ())
            }
            None => storage.push(payload).await.map(|_| ()),
        };
        result.map_err(|e| DistributeError::Enqueue(e.to_string()))?;

        info!(
            task = TASK_SEND_VERIFY_EMAIL,
            username = %username,
            delay_seconds = options.process_in.map(|d| d.as_secs()).unwrap_or(0),
            "Enqueued task"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_at_adds_delay() {
        let run_at = schedule_at(1_700_000_000, Duration::from_secs(10)).unwrap();
        assert_eq!(run_at, 1_700_000_010);
    }

    #[test]
    fn test_schedule_at_rejects_huge_delay() {
        let err = schedule_at(1_700_000_000, Duration::from_secs(u64::MAX)).unwrap_err();
        assert!(matches!(err, DistributeError::Enqueue(_)));

        let err = schedule_at(1_700_000_000, Duration::from_secs(i64::MAX as u64)).unwrap_err();
        assert!(matches!(err, DistributeError::Enqueue(_)));
    }

    #[test]
    fn test_send_verify_email_is_delayed() {
        let options = TaskOptions::send_verify_email();
        assert_eq!(
            options.process_in,
            Some(Duration::from_secs(SEND_VERIFY_EMAIL_DELAY_SECONDS))
        );
        assert_eq!(TaskOptions::immediate().process_in, None);
    }

    #[test]
    fn test_enqueue_error_message() {
        let err = DistributeError::Enqueue("connection reset".to_string());
        assert_eq!(err.to_string(), "failed to enqueue task: connection reset");
    }

    #[tokio::test]
    async fn test_mock_distributor_receives_payload() {
        let mut distributor = MockTaskDistributor::new();
        distributor
            .expect_distribute_task_send_verify_email()
            .withf(|payload, options| payload.username == "alice" && options.process_in.is_some())
            .times(1)
            .returning(|_, _| Ok(()));

        distributor
            .distribute_task_send_verify_email(
                PayloadSendVerifyEmail::new("alice"),
                TaskOptions::send_verify_email(),
            )
            .await
            .unwrap();
    }
}

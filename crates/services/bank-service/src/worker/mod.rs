//! Background task distribution and processing.
//!
//! Request handlers enqueue tasks through a [`TaskDistributor`]; the
//! processor consumes them out of band.

mod distributor;
mod processor;
mod task_send_verify_email;

pub use distributor::{DistributeError, PostgresTaskDistributor, TaskDistributor, TaskOptions};
pub use processor::run_task_processor;
pub use task_send_verify_email::{process_send_verify_email, PayloadSendVerifyEmail};

#[cfg(any(test, feature = "test-utils"))]
pub use distributor::MockTaskDistributor;

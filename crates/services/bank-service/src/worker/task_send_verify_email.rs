//! Verification email task.

use std::sync::Arc;

use apalis::prelude::Data;
use serde::{Deserialize, Serialize};
use tracing::info;

use common::{AppError, AppResult};
use domain::TASK_SEND_VERIFY_EMAIL;

use crate::repository::Store;

/// Task payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadSendVerifyEmail {
    pub username: String,
}

impl PayloadSendVerifyEmail {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Process one verification email task.
///
/// The user must exist; already verified users are skipped. Mail delivery is
/// logged rather than sent.
pub async fn process_send_verify_email(
    payload: &PayloadSendVerifyEmail,
    store: &dyn Store,
) -> AppResult<()> {
    let user = store
        .get_user(&payload.username)
        .await?
        .ok_or(AppError::NotFound)?;

    if user.is_email_verified {
        info!(
            task = TASK_SEND_VERIFY_EMAIL,
            username = %user.username,
            "Email already verified, skipping"
        );
        return Ok(());
    }

    info!(
        task = TASK_SEND_VERIFY_EMAIL,
        username = %user.username,
        email = %user.email,
        "Processed task"
    );

    Ok(())
}

/// apalis entry point for the task.
pub(crate) async fn send_verify_email(
    payload: PayloadSendVerifyEmail,
    store: Data<Arc<dyn Store>>,
) -> Result<(), AppError> {
    process_send_verify_email(&payload, &**store).await
}

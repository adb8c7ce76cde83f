//! Store capability and its SeaORM implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set, SqlErr};

use super::entities::user::{ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult, OptionExt};
use domain::{password_never_changed, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Input for creating a user. The password is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserParams {
    pub username: String,
    pub hashed_password: String,
    pub full_name: String,
    pub email: String,
}

/// Partial update of a user; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserParams {
    pub username: String,
    pub hashed_password: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub is_email_verified: Option<bool>,
}

/// Persistent store used by request handlers and background tasks.
///
/// Shared across all handlers; implementations handle their own
/// concurrency.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Store: Send + Sync {
    /// Find a user by username
    async fn get_user(&self, username: &str) -> AppResult<Option<User>>;

    /// Create a new user
    async fn create_user(&self, params: CreateUserParams) -> AppResult<User>;

    /// Update user fields. Changing the password records the rotation time.
    async fn update_user(&self, params: UpdateUserParams) -> AppResult<User>;
}

/// Postgres-backed store
#[derive(Clone)]
pub struct SqlStore {
    db: DatabaseConnection,
}

impl SqlStore {
    /// Create new store instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Map unique violations to a conflict, everything else to a database error.
fn map_write_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("User"),
        _ => AppError::from(err),
    }
}

#[async_trait]
impl Store for SqlStore {
    async fn get_user(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(username.to_string())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create_user(&self, params: CreateUserParams) -> AppResult<User> {
        let active_model = ActiveModel {
            username: Set(params.username),
            hashed_password: Set(params.hashed_password),
            full_name: Set(params.full_name),
            email: Set(params.email),
            is_email_verified: Set(false),
            password_changed_at: Set(password_never_changed()),
            created_at: Set(Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(map_write_error)?;
        Ok(User::from(model))
    }

    async fn update_user(&self, params: UpdateUserParams) -> AppResult<User> {
        let model = UserEntity::find_by_id(params.username)
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        let mut user = User::from(model.clone());
        let mut active: ActiveModel = model.into();

        if let Some(hashed_password) = params.hashed_password {
            user.change_password(hashed_password);
            active.hashed_password = Set(user.hashed_password);
            active.password_changed_at = Set(user.password_changed_at);
        }
        if let Some(full_name) = params.full_name {
            active.full_name = Set(full_name);
        }
        if let Some(email) = params.email {
            active.email = Set(email);
        }
        if let Some(verified) = params.is_email_verified {
            active.is_email_verified = Set(verified);
        }

        let model = active.update(&self.db).await.map_err(map_write_error)?;
        Ok(User::from(model))
    }
}

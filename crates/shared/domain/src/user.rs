//! User domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `0001-01-01T00:00:00Z` as seconds since the Unix epoch.
const PASSWORD_NEVER_CHANGED_SECONDS: i64 = -62_135_596_800;

/// Timestamp stored for users that never rotated their password.
///
/// Matches the `password_changed_at` column default, so rows created by the
/// store and users built in memory agree on the value.
pub fn password_never_changed() -> DateTime<Utc> {
    DateTime::from_timestamp(PASSWORD_NEVER_CHANGED_SECONDS, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub is_email_verified: bool,
    pub password_changed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new, unverified user
    pub fn new(username: String, hashed_password: String, full_name: String, email: String) -> Self {
        Self {
            username,
            hashed_password,
            full_name,
            email,
            is_email_verified: false,
            password_changed_at: password_never_changed(),
            created_at: Utc::now(),
        }
    }

    /// Check if the password was ever rotated
    pub fn has_changed_password(&self) -> bool {
        self.password_changed_at != password_never_changed()
    }

    /// Replace the password hash and record the rotation time
    pub fn change_password(&mut self, hashed_password: String) {
        self.hashed_password = hashed_password;
        self.password_changed_at = Utc::now();
    }
}

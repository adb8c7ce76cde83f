//! Token payload.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity carried by a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub id: Uuid,
    pub username: String,
    pub issued_at: DateTime<Utc>,
    pub expired_at: DateTime<Utc>,
}

impl Payload {
    /// Create a payload for `username`, starting now.
    pub fn new(username: impl Into<String>, duration: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            issued_at: now,
            expired_at: now + duration,
        }
    }

    /// Check whether the payload has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expired_at
    }
}

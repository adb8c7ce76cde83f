//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Authentication
// =============================================================================

/// Exact symmetric key size accepted by the token maker, in bytes
pub const TOKEN_SYMMETRIC_KEY_SIZE: usize = 32;

/// Default access token lifetime in minutes
pub const DEFAULT_ACCESS_TOKEN_DURATION_MINUTES: i64 = 15;

/// Default refresh token lifetime in hours
pub const DEFAULT_REFRESH_TOKEN_DURATION_HOURS: i64 = 24;

// =============================================================================
// Background tasks
// =============================================================================

/// Task type for the verification email sent after sign-up
pub const TASK_SEND_VERIFY_EMAIL: &str = "task:send_verify_email";

/// Delay applied to the verification email so the user row is committed first
pub const SEND_VERIFY_EMAIL_DELAY_SECONDS: u64 = 10;

// =============================================================================
// Environments
// =============================================================================

/// Environment name enabling development defaults
pub const ENV_DEVELOPMENT: &str = "development";

/// Environment name for production deployments
pub const ENV_PRODUCTION: &str = "production";

//! Bank service configuration.

use common::{env_var, parse_env, ConfigError, DatabaseConfig, GrpcServerConfig, TokenConfig};
use domain::{
    DEFAULT_ACCESS_TOKEN_DURATION_MINUTES, DEFAULT_REFRESH_TOKEN_DURATION_HOURS, ENV_DEVELOPMENT,
    ENV_PRODUCTION,
};

const TOKEN_SYMMETRIC_KEY_VAR: &str = "TOKEN_SYMMETRIC_KEY";

/// Bank service configuration.
///
/// Read once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct BankServiceConfig {
    /// Deployment environment ("development" or "production")
    pub environment: String,
    pub database: DatabaseConfig,
    pub grpc: GrpcServerConfig,
    pub token: TokenConfig,
}

impl BankServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// `TOKEN_SYMMETRIC_KEY` may be unset here: only `serve` needs it, and
    /// it checks with [`require_token_key`](Self::require_token_key).
    ///
    /// # Errors
    /// Fails when a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_defaults = DatabaseConfig::default();
        let grpc_defaults = GrpcServerConfig::default();

        Ok(Self {
            environment: env_var(&["ENVIRONMENT"]).unwrap_or_else(|| ENV_DEVELOPMENT.to_string()),
            database: DatabaseConfig {
                url: env_var(&["BANK_SERVICE_DATABASE_URL", "DATABASE_URL"])
                    .unwrap_or(database_defaults.url),
                max_connections: parse_env(
                    "DATABASE_MAX_CONNECTIONS",
                    database_defaults.max_connections,
                )?,
            },
            grpc: GrpcServerConfig {
                address: env_var(&["GRPC_SERVER_ADDRESS"]).unwrap_or(grpc_defaults.address),
            },
            token: TokenConfig {
                symmetric_key: env_var(&[TOKEN_SYMMETRIC_KEY_VAR]).unwrap_or_default(),
                access_token_duration_minutes: parse_env(
                    "ACCESS_TOKEN_DURATION_MINUTES",
                    DEFAULT_ACCESS_TOKEN_DURATION_MINUTES,
                )?,
                refresh_token_duration_hours: parse_env(
                    "REFRESH_TOKEN_DURATION_HOURS",
                    DEFAULT_REFRESH_TOKEN_DURATION_HOURS,
                )?,
            },
        })
    }

    /// Symmetric key for the token maker.
    ///
    /// # Errors
    /// `ConfigError::Missing` when `TOKEN_SYMMETRIC_KEY` was unset or empty.
    /// Key length is checked by the token maker.
    pub fn require_token_key(&self) -> Result<&str, ConfigError> {
        if self.token.symmetric_key.is_empty() {
            return Err(ConfigError::Missing(TOKEN_SYMMETRIC_KEY_VAR));
        }
        Ok(&self.token.symmetric_key)
    }

    /// Check whether the service runs in production.
    pub fn is_production(&self) -> bool {
        self.environment == ENV_PRODUCTION
    }

    /// Access token lifetime.
    pub fn access_token_duration(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.token.access_token_duration_minutes)
    }

    /// Refresh token lifetime.
    pub fn refresh_token_duration(&self) -> chrono::Duration {
        chrono::Duration::hours(self.token.refresh_token_duration_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_durations() {
        let config = BankServiceConfig::default();

        assert_eq!(
            config.access_token_duration(),
            chrono::Duration::minutes(DEFAULT_ACCESS_TOKEN_DURATION_MINUTES)
        );
        assert_eq!(
            config.refresh_token_duration(),
            chrono::Duration::hours(DEFAULT_REFRESH_TOKEN_DURATION_HOURS)
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = BankServiceConfig {
            token: TokenConfig {
                symmetric_key: "12345678901234567890123456789012".to_string(),
                ..TokenConfig::default()
            },
            ..BankServiceConfig::default()
        };

        let debug = format!("{:?}", config);
        assert!(!debug.contains("12345678901234567890123456789012"));
    }

    #[test]
    fn test_require_token_key() {
        let mut config = BankServiceConfig::default();
        assert_eq!(
            config.require_token_key(),
            Err(ConfigError::Missing("TOKEN_SYMMETRIC_KEY"))
        );

        config.token.symmetric_key = "short".to_string();
        assert_eq!(config.require_token_key(), Ok("short"));
    }

    #[test]
    fn test_is_production() {
        let mut config = BankServiceConfig::default();
        assert!(!config.is_production());

        config.environment = ENV_PRODUCTION.to_string();
        assert!(config.is_production());
    }
}

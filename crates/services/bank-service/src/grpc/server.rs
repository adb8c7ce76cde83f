//! Server composition - binds store, token maker and task distributor.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::config::BankServiceConfig;
use crate::repository::Store;
use crate::token::{JwtMaker, TokenError, TokenMaker};
use crate::worker::TaskDistributor;

/// Construction stage that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    TokenMaker,
}

impl Stage {
    /// Stable identifier, suitable for matching and structured logs.
    pub fn id(&self) -> &'static str {
        match self {
            Stage::TokenMaker => "token-maker-construction",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::TokenMaker => write!(f, "token maker"),
        }
    }
}

/// Errors raised while building the server.
#[derive(Error, Debug)]
pub enum ServerError {
    /// A collaborator could not be built; the service cannot start.
    #[error("cannot create {stage}: {source}")]
    ConstructionFailed {
        stage: Stage,
        #[source]
        source: TokenError,
    },
}

impl ServerError {
    /// Stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            ServerError::ConstructionFailed { stage, .. } => *stage,
        }
    }
}

fn build_token_maker(config: &BankServiceConfig) -> Result<JwtMaker, ServerError> {
    JwtMaker::new(&config.token.symmetric_key).map_err(|source| ServerError::ConstructionFailed {
        stage: Stage::TokenMaker,
        source,
    })
}

/// gRPC server for the banking service.
///
/// Built once at startup and shared by every request handler.
pub struct Server {
    config: BankServiceConfig,
    store: Arc<dyn Store>,
    token_maker: Box<dyn TokenMaker>,
    task_distributor: Arc<dyn TaskDistributor>,
}

impl Server {
    /// Create a new server.
    ///
    /// The token maker is derived from `config.token.symmetric_key`; the
    /// store and task distributor are shared handles owned by the caller.
    ///
    /// # Errors
    /// Returns `ServerError::ConstructionFailed` when the token maker cannot
    /// be created. No partially built server is returned.
    pub fn new(
        config: BankServiceConfig,
        store: Arc<dyn Store>,
        task_distributor: Arc<dyn TaskDistributor>,
    ) -> Result<Self, ServerError> {
        let token_maker = build_token_maker(&config)?;

        Ok(Self {
            config,
            store,
            token_maker: Box::new(token_maker),
            task_distributor,
        })
    }

    /// Check that `config` can build a server, without any collaborators.
    ///
    /// Lets startup reject a bad key before connecting to anything.
    pub fn check_config(config: &BankServiceConfig) -> Result<(), ServerError> {
        build_token_maker(config).map(|_| ())
    }

    pub fn config(&self) -> &BankServiceConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    pub fn token_maker(&self) -> &dyn TokenMaker {
        self.token_maker.as_ref()
    }

    pub fn task_distributor(&self) -> &dyn TaskDistributor {
        self.task_distributor.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use chrono::Duration;
    use common::TokenConfig;

    use super::*;
    use crate::repository::MockStore;
    use crate::worker::MockTaskDistributor;

    const KEY: &str = "12345678901234567890123456789012";

    fn config_with_key(key: &str) -> BankServiceConfig {
        BankServiceConfig {
            token: TokenConfig {
                symmetric_key: key.to_string(),
                ..TokenConfig::default()
            },
            ..BankServiceConfig::default()
        }
    }

    fn build(key: &str) -> Result<Server, ServerError> {
        Server::new(
            config_with_key(key),
            Arc::new(MockStore::new()),
            Arc::new(MockTaskDistributor::new()),
        )
    }

    #[test]
    fn test_new_server_token_maker_usable() {
        let server = build(KEY).unwrap();

        let (token, payload) = server
            .token_maker()
            .create_token("alice", Duration::minutes(15))
            .unwrap();
        let verified = server.token_maker().verify_token(&token).unwrap();

        assert_eq!(verified, payload);
        assert_eq!(server.config().token.symmetric_key, KEY);
    }

    #[test]
    fn test_short_key_fails_construction() {
        let err = build("8bytes!!").err().unwrap();

        assert_eq!(err.stage(), Stage::TokenMaker);
        assert_eq!(err.stage().id(), "token-maker-construction");
        assert!(err.to_string().starts_with("cannot create token maker"));
        assert!(matches!(
            err,
            ServerError::ConstructionFailed {
                source: TokenError::InvalidKey { expected: 32, actual: 8 },
                ..
            }
        ));
    }

    #[test]
    fn test_check_config_matches_new() {
        assert!(Server::check_config(&config_with_key(KEY)).is_ok());

        let err = Server::check_config(&config_with_key("8bytes!!")).unwrap_err();
        assert_eq!(err.stage().id(), "token-maker-construction");
        assert!(matches!(
            err,
            ServerError::ConstructionFailed {
                source: TokenError::InvalidKey { actual: 8, .. },
                ..
            }
        ));
    }

    #[test]
    fn test_cause_is_inspectable() {
        let err = build("").err().unwrap();
        let source = err.source().unwrap();

        assert_eq!(
            source.to_string(),
            TokenError::InvalidKey { expected: 32, actual: 0 }.to_string()
        );
    }

    #[test]
    fn test_identical_inputs_interoperate() {
        let first = build(KEY).unwrap();
        let second = build(KEY).unwrap();

        let (token, _) = first
            .token_maker()
            .create_token("bob", Duration::minutes(5))
            .unwrap();

        assert_eq!(second.token_maker().verify_token(&token).unwrap().username, "bob");
    }

    #[tokio::test]
    async fn test_collaborators_are_shared_not_copied() {
        let mut store = MockStore::new();
        store.expect_get_user().times(1).returning(|_| Ok(None));
        let store: Arc<dyn Store> = Arc::new(store);

        let server = Server::new(
            config_with_key(KEY),
            store.clone(),
            Arc::new(MockTaskDistributor::new()),
        )
        .unwrap();

        assert_eq!(Arc::strong_count(&store), 2);
        assert!(server.store().get_user("alice").await.unwrap().is_none());
    }
}

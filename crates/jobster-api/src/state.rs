//! Application state.

use std::sync::Arc;

use jobster_store::{DocumentStore, JobRepository, UserRepository};

use crate::auth::TokenService;
use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub jobs: JobRepository,
    pub users: UserRepository,
    pub tokens: TokenService,
}

impl AppState {
    /// Create new application state over an injected store handle.
    ///
    /// The store is passed in rather than opened here so callers (the
    /// binary, integration tests) control its lifecycle.
    pub fn new(config: ApiConfig, store: Arc<DocumentStore>) -> Self {
        let tokens = TokenService::new(config.jwt_secret.clone(), config.token_ttl_hours);
        Self {
            jobs: JobRepository::new(Arc::clone(&store)),
            users: UserRepository::new(store),
            tokens,
            config,
        }
    }
}

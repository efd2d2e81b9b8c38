//! Application state.

use std::sync::Arc;

use mason_points_store::RocksStore;

use crate::config::ServiceConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub store: Arc<RocksStore>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<RocksStore>, config: ServiceConfig) -> Self {
        if config.jwt_secret.is_none() {
            tracing::warn!("JWT_SECRET not configured - mason endpoints will reject all tokens");
        }
        if config.operator_api_key.is_none() {
            tracing::warn!("OPERATOR_API_KEY not configured - operator endpoints are disabled");
        }

        Self { store, config }
    }
}

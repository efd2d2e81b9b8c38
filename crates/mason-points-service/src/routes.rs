//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{adjustments, health, lifts, masons, redemptions, rewards, slabs};
use crate::state::AppState;

/// Maximum concurrent requests for the API.
const API_MAX_CONCURRENT_REQUESTS: usize = 100;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Masons (JWT auth)
/// - `GET /v1/masons/me` - Profile and balance
/// - `GET /v1/masons/me/ledger` - Paginated ledger history
/// - `GET /v1/masons/me/lifts` - Own bag lifts
/// - `GET /v1/masons/me/redemptions` - Own redemptions
/// - `POST /v1/lifts` - Submit a pending bag lift
/// - `POST /v1/redemptions` - Place a redemption
/// - `POST /v1/slabs/:id/claim` - Claim a slab achievement
/// - `GET /v1/rewards`, `GET /v1/rewards/:id` - Catalogue
/// - `GET /v1/slabs` - Scheme slabs
///
/// ## Operators (API key auth)
/// - `POST /v1/masons` - Enroll a mason
/// - `POST /v1/lifts/:id/approve` - Approve a lift
/// - `POST /v1/lifts/:id/reject` - Reject a lift
/// - `POST /v1/redemptions/:id/status` - Advance fulfilment
/// - `PUT /v1/rewards` - Upsert a reward
/// - `PUT /v1/slabs` - Upsert a scheme slab
/// - `POST /v1/masons/:id/adjustments` - Manual adjustment
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    let api_routes = Router::new()
        // Masons
        .route("/masons", post(masons::enroll))
        .route("/masons/me", get(masons::get_me))
        .route("/masons/me/ledger", get(masons::list_ledger))
        .route("/masons/me/lifts", get(lifts::list_mine))
        .route("/masons/me/redemptions", get(redemptions::list_mine))
        .route("/masons/:id/adjustments", post(adjustments::adjust))
        // Bag lifts
        .route("/lifts", post(lifts::submit))
        .route("/lifts/:id/approve", post(lifts::approve))
        .route("/lifts/:id/reject", post(lifts::reject))
        // Redemptions
        .route("/redemptions", post(redemptions::place))
        .route("/redemptions/:id/status", post(redemptions::update_status))
        // Catalogue
        .route("/rewards", get(rewards::list).put(rewards::upsert))
        .route("/rewards/:id", get(rewards::get))
        // Scheme slabs
        .route("/slabs", get(slabs::list).put(slabs::upsert))
        .route("/slabs/:id/claim", post(slabs::claim))
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        // Health (public, no rate limit)
        .route("/health", get(health::health))
        // API v1 routes (rate limited)
        .nest("/v1", api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

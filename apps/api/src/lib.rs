//! Membership API library
//!
//! This module exposes the core API components for use in integration tests
//! and by the `membership-api` binary.

pub mod config;
pub mod error;
pub mod graphql;
pub mod models;
pub mod repositories;
pub mod routes;

// Re-export commonly used types
pub use error::{ApiError, ApiResult, ErrorResponse};

use axum::Router;
use tower_http::trace::TraceLayer;

use config::GraphQLConfig;
use graphql::GraphQLExecutor;
use repositories::Database;
use routes::{graphql_router, health_router, HealthState};

/// Build the application router over a persistence handle
///
/// CORS is left to the caller; everything else the server needs is here.
pub fn build_router(db: Database, graphql: &GraphQLConfig) -> Router {
    let executor = GraphQLExecutor::new(db.clone(), graphql);
    tracing::info!(
        backend = db.backend_name(),
        depth_limit = graphql.depth_limit,
        batch_loading = graphql.batch_loading,
        "GraphQL schema built"
    );

    Router::new()
        .merge(graphql_router(executor, graphql.playground))
        // Nested health routes: /health, /health/live, /health/ready
        .nest("/health", health_router(HealthState::new(db)))
        .layer(TraceLayer::new_for_http())
}

//! HTTP route handlers for the membership API
//!
//! This module contains all endpoint handlers including:
//! - GraphQL endpoints (`POST /`, `POST /graphql`, the playground)
//! - Health check and status endpoints

pub mod graphql;
pub mod health;

pub use graphql::{graphql_router, GraphQLBody};
pub use health::{health_router, HealthState};

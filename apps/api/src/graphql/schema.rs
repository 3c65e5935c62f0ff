//! GraphQL schema builder for the membership API
//!
//! The schema is built once at start-up and shared by every request. The
//! depth limit runs as an extension right after parsing, ahead of the
//! standard rule set, so a rejected document is never executed.

use async_graphql::{EmptySubscription, Request, Response, Schema};

use crate::config::{GraphQLConfig, DEFAULT_DEPTH_LIMIT};
use crate::repositories::Database;

use super::depth::DepthLimit;
use super::loaders::register_loaders;
use super::mutation::Mutation;
use super::query::Query;

/// The membership GraphQL schema type
pub type MembershipSchema = Schema<Query, Mutation, EmptySubscription>;

/// Builder for constructing the GraphQL schema
pub struct SchemaBuilder {
    db: Database,
    depth_limit: usize,
}

impl SchemaBuilder {
    /// Create a new schema builder over the given persistence handle
    pub fn new(db: Database) -> Self {
        Self {
            db,
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }

    /// Set the maximum nested field depth
    pub fn depth_limit(mut self, depth_limit: usize) -> Self {
        self.depth_limit = depth_limit;
        self
    }

    /// Build the schema
    pub fn build(self) -> MembershipSchema {
        Schema::build(Query::default(), Mutation::default(), EmptySubscription)
            .extension(DepthLimit::new(self.depth_limit))
            .data(self.db)
            .finish()
    }
}

/// Create a new GraphQL schema from configuration
pub fn build_schema(db: Database, config: &GraphQLConfig) -> MembershipSchema {
    SchemaBuilder::new(db)
        .depth_limit(config.depth_limit)
        .build()
}

/// Export the schema in SDL form
pub fn schema_sdl() -> String {
    Schema::build(Query::default(), Mutation::default(), EmptySubscription)
        .finish()
        .sdl()
}

/// Executes requests against the schema, attaching per-request DataLoaders
/// when batch loading is enabled
#[derive(Clone)]
pub struct GraphQLExecutor {
    schema: MembershipSchema,
    db: Database,
    batch_loading: bool,
}

impl GraphQLExecutor {
    pub fn new(db: Database, config: &GraphQLConfig) -> Self {
        Self {
            schema: build_schema(db.clone(), config),
            db,
            batch_loading: config.batch_loading,
        }
    }

    /// Validate and execute a single request
    pub async fn execute(&self, request: impl Into<Request>) -> Response {
        let mut request = request.into();
        if self.batch_loading {
            request = register_loaders(request, &self.db);
        }
        self.schema.execute(request).await
    }
}

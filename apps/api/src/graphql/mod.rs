//! GraphQL schema and resolvers for the membership API
//!
//! This module contains the async-graphql schema including:
//! - Query resolvers for users, profiles, posts and member types
//! - Mutation resolvers for creating, changing and deleting records
//! - Type definitions for all GraphQL objects
//! - DataLoaders for the optional batched fetch strategy

pub mod depth;
pub mod error;
pub mod loaders;
pub mod mutation;
pub mod query;
pub mod schema;
pub mod types;

pub use schema::{build_schema, schema_sdl, GraphQLExecutor, MembershipSchema, SchemaBuilder};

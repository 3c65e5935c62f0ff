//! User queries for the membership GraphQL API
//!
//! This module provides:
//! - user: Fetch one user by ID
//! - users: List every user

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::error::to_graphql_error;
use crate::graphql::types::{User, UuidScalar};
use crate::repositories::Database;

/// User-related queries
#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// Get a user by ID
    ///
    /// Returns `null` without an error when no user has this ID.
    async fn user(&self, ctx: &Context<'_>, id: UuidScalar) -> Result<Option<User>> {
        let id = Uuid::from(id);
        tracing::debug!(%id, "Resolving user");
        let db = ctx.data::<Database>()?;
        let user = db.users().find_by_id(id).await.map_err(to_graphql_error)?;
        Ok(user.map(User::from))
    }

    /// List all users in storage order
    async fn users(&self, ctx: &Context<'_>) -> Result<Option<Vec<User>>> {
        let db = ctx.data::<Database>()?;
        let users = db.users().find_all().await.map_err(to_graphql_error)?;
        Ok(Some(users.into_iter().map(User::from).collect()))
    }
}

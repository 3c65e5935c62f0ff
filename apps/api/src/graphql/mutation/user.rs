//! User mutations for the membership GraphQL API
//!
//! This module provides mutations for user management:
//! - createUser: Create a new user
//! - changeUser: Update the provided fields of a user
//! - deleteUser: Delete a user with its profile, posts and subscriptions

use async_graphql::{Context, InputObject, Object, Result};
use uuid::Uuid;

use crate::graphql::error::to_graphql_error;
use crate::graphql::types::{User, UuidScalar};
use crate::models::{ChangeUser, CreateUser};
use crate::repositories::Database;

// =============================================================================
// Input Types
// =============================================================================

/// Input for creating a new user
#[derive(Debug, InputObject)]
pub struct CreateUserInput {
    pub name: String,
    pub balance: f64,
}

impl From<CreateUserInput> for CreateUser {
    fn from(input: CreateUserInput) -> Self {
        Self {
            name: input.name,
            balance: input.balance,
        }
    }
}

/// Input for updating an existing user; omitted fields keep their value
#[derive(Debug, InputObject)]
pub struct ChangeUserInput {
    pub name: Option<String>,
    pub balance: Option<f64>,
}

impl From<ChangeUserInput> for ChangeUser {
    fn from(input: ChangeUserInput) -> Self {
        Self {
            name: input.name,
            balance: input.balance,
        }
    }
}

// =============================================================================
// Mutations
// =============================================================================

/// User mutations
#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    /// Create a new user
    async fn create_user(&self, ctx: &Context<'_>, dto: CreateUserInput) -> Result<Option<User>> {
        let db = ctx.data::<Database>()?;
        let user = db
            .users()
            .create(dto.into())
            .await
            .map_err(to_graphql_error)?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(Some(User::from(user)))
    }

    /// Update an existing user
    ///
    /// # Errors
    /// Returns a `NOT_FOUND` error when no user has this ID.
    async fn change_user(
        &self,
        ctx: &Context<'_>,
        id: UuidScalar,
        dto: ChangeUserInput,
    ) -> Result<Option<User>> {
        let id = Uuid::from(id);
        let db = ctx.data::<Database>()?;
        let user = db
            .users()
            .update(id, dto.into())
            .await
            .map_err(to_graphql_error)?;

        tracing::info!(user_id = %id, "User updated");
        Ok(Some(User::from(user)))
    }

    /// Delete a user, returning the deleted ID
    async fn delete_user(&self, ctx: &Context<'_>, id: UuidScalar) -> Result<Option<String>> {
        let id = Uuid::from(id);
        let db = ctx.data::<Database>()?;
        db.users().delete(id).await.map_err(to_graphql_error)?;

        tracing::info!(user_id = %id, "User deleted");
        Ok(Some(id.to_string()))
    }
}

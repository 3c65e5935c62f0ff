//! Profile queries

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::error::to_graphql_error;
use crate::graphql::types::{Profile, UuidScalar};
use crate::repositories::Database;

#[derive(Default)]
pub struct ProfileQuery;

#[Object]
impl ProfileQuery {
    /// Get a profile by ID
    async fn profile(&self, ctx: &Context<'_>, id: UuidScalar) -> Result<Option<Profile>> {
        let id = Uuid::from(id);
        tracing::debug!(%id, "Resolving profile");
        let db = ctx.data::<Database>()?;
        let profile = db
            .profiles()
            .find_by_id(id)
            .await
            .map_err(to_graphql_error)?;
        Ok(profile.map(Profile::from))
    }

    /// List all profiles in storage order
    async fn profiles(&self, ctx: &Context<'_>) -> Result<Option<Vec<Profile>>> {
        let db = ctx.data::<Database>()?;
        let profiles = db.profiles().find_all().await.map_err(to_graphql_error)?;
        Ok(Some(profiles.into_iter().map(Profile::from).collect()))
    }
}

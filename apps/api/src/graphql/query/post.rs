//! Post queries

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::error::to_graphql_error;
use crate::graphql::types::{Post, UuidScalar};
use crate::repositories::Database;

#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    /// Get a post by ID
    async fn post(&self, ctx: &Context<'_>, id: UuidScalar) -> Result<Option<Post>> {
        let id = Uuid::from(id);
        tracing::debug!(%id, "Resolving post");
        let db = ctx.data::<Database>()?;
        let post = db.posts().find_by_id(id).await.map_err(to_graphql_error)?;
        Ok(post.map(Post::from))
    }

    /// List all posts in storage order
    async fn posts(&self, ctx: &Context<'_>) -> Result<Option<Vec<Post>>> {
        let db = ctx.data::<Database>()?;
        let posts = db.posts().find_all().await.map_err(to_graphql_error)?;
        Ok(Some(posts.into_iter().map(Post::from).collect()))
    }
}

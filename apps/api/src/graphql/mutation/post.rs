//! Post mutations

use async_graphql::{Context, InputObject, Object, Result};
use uuid::Uuid;

use crate::graphql::error::to_graphql_error;
use crate::graphql::types::{Post, UuidScalar};
use crate::models::{ChangePost, CreatePost};
use crate::repositories::Database;

/// Input for creating a post
#[derive(Debug, InputObject)]
pub struct CreatePostInput {
    /// Author of the post; must be an existing user
    pub author_id: UuidScalar,
    pub title: String,
    pub content: String,
}

impl From<CreatePostInput> for CreatePost {
    fn from(input: CreatePostInput) -> Self {
        Self {
            author_id: input.author_id.into(),
            title: input.title,
            content: input.content,
        }
    }
}

/// Input for updating a post
#[derive(Debug, InputObject)]
pub struct ChangePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl From<ChangePostInput> for ChangePost {
    fn from(input: ChangePostInput) -> Self {
        Self {
            title: input.title,
            content: input.content,
        }
    }
}

/// Post mutations
#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    async fn create_post(&self, ctx: &Context<'_>, dto: CreatePostInput) -> Result<Option<Post>> {
        let db = ctx.data::<Database>()?;
        let post = db
            .posts()
            .create(dto.into())
            .await
            .map_err(to_graphql_error)?;

        tracing::info!(post_id = %post.id, author_id = %post.author_id, "Post created");
        Ok(Some(Post::from(post)))
    }

    async fn change_post(
        &self,
        ctx: &Context<'_>,
        id: UuidScalar,
        dto: ChangePostInput,
    ) -> Result<Option<Post>> {
        let id = Uuid::from(id);
        let db = ctx.data::<Database>()?;
        let post = db
            .posts()
            .update(id, dto.into())
            .await
            .map_err(to_graphql_error)?;

        tracing::info!(post_id = %id, "Post updated");
        Ok(Some(Post::from(post)))
    }

    /// Delete a post, returning the deleted ID
    async fn delete_post(&self, ctx: &Context<'_>, id: UuidScalar) -> Result<Option<String>> {
        let id = Uuid::from(id);
        let db = ctx.data::<Database>()?;
        db.posts().delete(id).await.map_err(to_graphql_error)?;

        tracing::info!(post_id = %id, "Post deleted");
        Ok(Some(id.to_string()))
    }
}

//! Post GraphQL type

use async_graphql::Object;

use crate::models::Post as DbPost;

use super::scalar::UuidScalar;

/// Post exposed via GraphQL
pub struct Post {
    inner: DbPost,
}

impl Post {
    /// Create a new GraphQL Post from a database Post
    pub fn new(post: DbPost) -> Self {
        Self { inner: post }
    }
}

impl From<DbPost> for Post {
    fn from(post: DbPost) -> Self {
        Self::new(post)
    }
}

#[Object]
impl Post {
    /// Unique post identifier
    async fn id(&self) -> UuidScalar {
        self.inner.id.into()
    }

    async fn title(&self) -> &str {
        &self.inner.title
    }

    async fn content(&self) -> &str {
        &self.inner.content
    }

    /// Identifier of the user who wrote the post
    async fn author_id(&self) -> UuidScalar {
        self.inner.author_id.into()
    }
}

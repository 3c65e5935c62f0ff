//! Posts-by-Author DataLoader for batched fetching
//!
//! This loader batches multiple author ID lookups into a single persistence
//! call, returning all posts for each author. Every requested key gets an
//! entry, empty when the author has written nothing.

use async_graphql::dataloader::Loader;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::Post;
use crate::repositories::{Database, RepositoryError};

/// DataLoader for batching posts-by-author queries
#[derive(Clone)]
pub struct PostsByAuthorLoader {
    db: Database,
}

impl PostsByAuthorLoader {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl Loader<Uuid> for PostsByAuthorLoader {
    type Value = Vec<Post>;
    type Error = Arc<RepositoryError>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        tracing::debug!(keys = keys.len(), "Batch loading posts by author");
        self.db
            .posts()
            .find_by_authors(keys)
            .await
            .map_err(Arc::new)
    }
}

//! DataLoader for `User.userSubscribedTo`
//!
//! Keyed by subscriber id; each value is the list of authors that user
//! follows.

use async_graphql::dataloader::Loader;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::User;
use crate::repositories::{Database, RepositoryError};

/// DataLoader for batching followed-author queries
#[derive(Clone)]
pub struct SubscribedToLoader {
    db: Database,
}

impl SubscribedToLoader {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl Loader<Uuid> for SubscribedToLoader {
    type Value = Vec<User>;
    type Error = Arc<RepositoryError>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        tracing::debug!(keys = keys.len(), "Batch loading followed authors");
        self.db
            .users()
            .find_subscribed_to_many(keys)
            .await
            .map_err(Arc::new)
    }
}

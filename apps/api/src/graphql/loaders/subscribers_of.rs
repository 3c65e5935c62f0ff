//! DataLoader for `User.subscribedToUser`
//!
//! Keyed by author id; each value is the list of users following that author.

use async_graphql::dataloader::Loader;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::User;
use crate::repositories::{Database, RepositoryError};

/// DataLoader for batching subscriber queries
#[derive(Clone)]
pub struct SubscribersOfLoader {
    db: Database,
}

impl SubscribersOfLoader {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl Loader<Uuid> for SubscribersOfLoader {
    type Value = Vec<User>;
    type Error = Arc<RepositoryError>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        tracing::debug!(keys = keys.len(), "Batch loading subscribers");
        self.db
            .users()
            .find_subscribers_of_many(keys)
            .await
            .map_err(Arc::new)
    }
}

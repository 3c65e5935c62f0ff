//! Profile-by-User DataLoader for batched fetching
//!
//! Batches `User.profile` lookups into a single `find_by_user_ids` call.

use async_graphql::dataloader::Loader;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::Profile;
use crate::repositories::{Database, RepositoryError};

/// DataLoader for batching profile-by-user queries
#[derive(Clone)]
pub struct ProfileByUserLoader {
    db: Database,
}

impl ProfileByUserLoader {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl Loader<Uuid> for ProfileByUserLoader {
    type Value = Profile;
    type Error = Arc<RepositoryError>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        tracing::debug!(keys = keys.len(), "Batch loading profiles by user");
        self.db
            .profiles()
            .find_by_user_ids(keys)
            .await
            .map_err(Arc::new)
    }
}

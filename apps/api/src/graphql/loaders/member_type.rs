//! Member type DataLoader for batched fetching
//!
//! Many profiles share the same two member types, so a batch usually
//! resolves to a single lookup of at most two keys.

use async_graphql::dataloader::Loader;
use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{MemberType, MemberTypeId};
use crate::repositories::{Database, RepositoryError};

/// DataLoader for batching member type queries
#[derive(Clone)]
pub struct MemberTypeLoader {
    db: Database,
}

impl MemberTypeLoader {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl Loader<MemberTypeId> for MemberTypeLoader {
    type Value = MemberType;
    type Error = Arc<RepositoryError>;

    async fn load(
        &self,
        keys: &[MemberTypeId],
    ) -> Result<HashMap<MemberTypeId, Self::Value>, Self::Error> {
        self.db
            .member_types()
            .find_by_ids(keys)
            .await
            .map_err(Arc::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryStore;
    use async_graphql::dataloader::DataLoader;

    #[tokio::test]
    async fn test_concurrent_loads_share_one_call() {
        let store = InMemoryStore::new();
        let loader = DataLoader::new(
            MemberTypeLoader::new(Database::from_store(store.clone())),
            tokio::spawn,
        );

        let (basic, business) = tokio::join!(
            loader.load_one(MemberTypeId::Basic),
            loader.load_one(MemberTypeId::Business)
        );

        assert_eq!(basic.unwrap().unwrap().posts_limit_per_month, 20);
        assert_eq!(business.unwrap().unwrap().posts_limit_per_month, 100);
        assert_eq!(store.read_count(), 1);
    }
}

//! PostgreSQL subscription repository
//!
//! Writes to the `subscribers_on_authors` join table. Reads go through the
//! user repository, which joins the table to return users.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::utils::map_write_error;
use super::{RepositoryError, RepositoryResult, SubscriptionRepository};
use crate::models::Subscription;

const ENTITY: &str = "subscription";

/// Repository for subscription edges
#[derive(Clone)]
pub struct PgSubscriptionRepository {
    pool: PgPool,
}

impl PgSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    #[instrument(skip(self))]
    async fn subscribe(
        &self,
        subscriber_id: Uuid,
        author_id: Uuid,
    ) -> RepositoryResult<Subscription> {
        sqlx::query_as::<_, Subscription>(
            r#"INSERT INTO subscribers_on_authors (subscriber_id, author_id)
            VALUES ($1, $2)
            RETURNING subscriber_id, author_id"#,
        )
        .bind(subscriber_id)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(ENTITY, e))
    }

    #[instrument(skip(self))]
    async fn unsubscribe(&self, subscriber_id: Uuid, author_id: Uuid) -> RepositoryResult<()> {
        let result = sqlx::query(
            "DELETE FROM subscribers_on_authors WHERE subscriber_id = $1 AND author_id = $2",
        )
        .bind(subscriber_id)
        .bind(author_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(
                ENTITY,
                format!("{} -> {}", subscriber_id, author_id),
            ));
        }
        Ok(())
    }
}

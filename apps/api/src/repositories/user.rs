//! PostgreSQL user repository
//!
//! Users plus the two directions of the subscription graph. Subscription
//! lookups join `subscribers_on_authors` so a single round trip returns the
//! related users.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use super::utils::{group_by_key, map_write_error, USER_COLUMNS, USER_COLUMNS_PREFIXED};
use super::{RepositoryError, RepositoryResult, UserRepository};
use crate::models::{ChangeUser, CreateUser, User};

const ENTITY: &str = "user";

/// User row tagged with the id it was looked up by
#[derive(FromRow)]
struct KeyedUser {
    key_id: Uuid,
    #[sqlx(flatten)]
    user: User,
}

/// Repository for user database operations
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_keyed(
        &self,
        key_column: &str,
        join_column: &str,
        keys: &[Uuid],
    ) -> RepositoryResult<HashMap<Uuid, Vec<User>>> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!(
            "SELECT s.{key} AS key_id, {cols} FROM subscribers_on_authors s \
             JOIN users u ON u.id = s.{join} WHERE s.{key} = ANY($1)",
            key = key_column,
            join = join_column,
            cols = USER_COLUMNS_PREFIXED,
        );
        let rows: Vec<KeyedUser> = sqlx::query_as(&sql)
            .bind(keys)
            .fetch_all(&self.pool)
            .await?;

        let grouped = group_by_key(keys, rows, |row| row.key_id);
        Ok(grouped
            .into_iter()
            .map(|(key, rows)| (key, rows.into_iter().map(|row| row.user).collect()))
            .collect())
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepositoryResult<Vec<User>> {
        let sql = format!("SELECT {} FROM users", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn find_subscribed_to(&self, subscriber_id: Uuid) -> RepositoryResult<Vec<User>> {
        let sql = format!(
            "SELECT {} FROM subscribers_on_authors s JOIN users u ON u.id = s.author_id \
             WHERE s.subscriber_id = $1",
            USER_COLUMNS_PREFIXED
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(subscriber_id)
            .fetch_all(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn find_subscribers_of(&self, author_id: Uuid) -> RepositoryResult<Vec<User>> {
        let sql = format!(
            "SELECT {} FROM subscribers_on_authors s JOIN users u ON u.id = s.subscriber_id \
             WHERE s.author_id = $1",
            USER_COLUMNS_PREFIXED
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?)
    }

    #[instrument(skip(self, subscriber_ids), fields(keys = subscriber_ids.len()))]
    async fn find_subscribed_to_many(
        &self,
        subscriber_ids: &[Uuid],
    ) -> RepositoryResult<HashMap<Uuid, Vec<User>>> {
        self.find_keyed("subscriber_id", "author_id", subscriber_ids)
            .await
    }

    #[instrument(skip(self, author_ids), fields(keys = author_ids.len()))]
    async fn find_subscribers_of_many(
        &self,
        author_ids: &[Uuid],
    ) -> RepositoryResult<HashMap<Uuid, Vec<User>>> {
        self.find_keyed("author_id", "subscriber_id", author_ids)
            .await
    }

    #[instrument(skip(self, input))]
    async fn create(&self, input: CreateUser) -> RepositoryResult<User> {
        let sql = format!(
            "INSERT INTO users (id, name, balance) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.name)
            .bind(input.balance)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(ENTITY, e))
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: ChangeUser) -> RepositoryResult<User> {
        let sql = format!(
            r#"UPDATE users SET
                name = COALESCE($2, name),
                balance = COALESCE($3, balance)
            WHERE id = $1
            RETURNING {}"#,
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(input.name)
            .bind(input.balance)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(ENTITY, e))?
            .ok_or_else(|| RepositoryError::not_found(ENTITY, id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(ENTITY, id));
        }
        Ok(())
    }
}

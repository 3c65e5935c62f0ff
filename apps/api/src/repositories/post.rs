//! PostgreSQL post repository

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::utils::{group_by_key, map_write_error, POST_COLUMNS};
use super::{PostRepository, RepositoryError, RepositoryResult};
use crate::models::{ChangePost, CreatePost, Post};

const ENTITY: &str = "post";

/// Repository for post database operations
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Post>> {
        let sql = format!("SELECT {} FROM posts WHERE id = $1", POST_COLUMNS);
        Ok(sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepositoryResult<Vec<Post>> {
        let sql = format!("SELECT {} FROM posts", POST_COLUMNS);
        Ok(sqlx::query_as::<_, Post>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn find_by_author(&self, author_id: Uuid) -> RepositoryResult<Vec<Post>> {
        let sql = format!("SELECT {} FROM posts WHERE author_id = $1", POST_COLUMNS);
        Ok(sqlx::query_as::<_, Post>(&sql)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?)
    }

    #[instrument(skip(self, author_ids), fields(keys = author_ids.len()))]
    async fn find_by_authors(
        &self,
        author_ids: &[Uuid],
    ) -> RepositoryResult<HashMap<Uuid, Vec<Post>>> {
        if author_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!(
            "SELECT {} FROM posts WHERE author_id = ANY($1)",
            POST_COLUMNS
        );
        let posts: Vec<Post> = sqlx::query_as(&sql)
            .bind(author_ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(group_by_key(author_ids, posts, |post| post.author_id))
    }

    #[instrument(skip(self, input), fields(author_id = %input.author_id))]
    async fn create(&self, input: CreatePost) -> RepositoryResult<Post> {
        let sql = format!(
            "INSERT INTO posts (id, title, content, author_id) VALUES ($1, $2, $3, $4) RETURNING {}",
            POST_COLUMNS
        );
        sqlx::query_as::<_, Post>(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(ENTITY, e))
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: ChangePost) -> RepositoryResult<Post> {
        let sql = format!(
            r#"UPDATE posts SET
                title = COALESCE($2, title),
                content = COALESCE($3, content)
            WHERE id = $1
            RETURNING {}"#,
            POST_COLUMNS
        );
        sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .bind(input.title)
            .bind(input.content)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(ENTITY, e))?
            .ok_or_else(|| RepositoryError::not_found(ENTITY, id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(ENTITY, id));
        }
        Ok(())
    }
}

//! PostgreSQL profile repository

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::utils::{map_write_error, PROFILE_COLUMNS};
use super::{ProfileRepository, RepositoryError, RepositoryResult};
use crate::models::{ChangeProfile, CreateProfile, Profile};

const ENTITY: &str = "profile";

/// Repository for profile database operations
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Create a new PgProfileRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Profile>> {
        let sql = format!("SELECT {} FROM profiles WHERE id = $1", PROFILE_COLUMNS);
        Ok(sqlx::query_as::<_, Profile>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepositoryResult<Vec<Profile>> {
        let sql = format!("SELECT {} FROM profiles", PROFILE_COLUMNS);
        Ok(sqlx::query_as::<_, Profile>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn find_by_user_id(&self, user_id: Uuid) -> RepositoryResult<Option<Profile>> {
        let sql = format!(
            "SELECT {} FROM profiles WHERE user_id = $1",
            PROFILE_COLUMNS
        );
        Ok(sqlx::query_as::<_, Profile>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    #[instrument(skip(self, user_ids), fields(keys = user_ids.len()))]
    async fn find_by_user_ids(
        &self,
        user_ids: &[Uuid],
    ) -> RepositoryResult<HashMap<Uuid, Profile>> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!(
            "SELECT {} FROM profiles WHERE user_id = ANY($1)",
            PROFILE_COLUMNS
        );
        let profiles: Vec<Profile> = sqlx::query_as(&sql)
            .bind(user_ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(profiles.into_iter().map(|p| (p.user_id, p)).collect())
    }

    #[instrument(skip(self, input), fields(user_id = %input.user_id))]
    async fn create(&self, input: CreateProfile) -> RepositoryResult<Profile> {
        let sql = format!(
            r#"INSERT INTO profiles (id, is_male, year_of_birth, user_id, member_type_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}"#,
            PROFILE_COLUMNS
        );
        sqlx::query_as::<_, Profile>(&sql)
            .bind(Uuid::new_v4())
            .bind(input.is_male)
            .bind(input.year_of_birth)
            .bind(input.user_id)
            .bind(input.member_type_id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(ENTITY, e))
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: ChangeProfile) -> RepositoryResult<Profile> {
        let sql = format!(
            r#"UPDATE profiles SET
                is_male = COALESCE($2, is_male),
                year_of_birth = COALESCE($3, year_of_birth),
                member_type_id = COALESCE($4, member_type_id)
            WHERE id = $1
            RETURNING {}"#,
            PROFILE_COLUMNS
        );
        sqlx::query_as::<_, Profile>(&sql)
            .bind(id)
            .bind(input.is_male)
            .bind(input.year_of_birth)
            .bind(input.member_type_id.map(|m| m.as_str()))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(ENTITY, e))?
            .ok_or_else(|| RepositoryError::not_found(ENTITY, id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(ENTITY, id));
        }
        Ok(())
    }
}

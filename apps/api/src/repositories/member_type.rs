//! PostgreSQL member type repository

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use super::utils::MEMBER_TYPE_COLUMNS;
use super::{MemberTypeRepository, RepositoryResult};
use crate::models::{MemberType, MemberTypeId};

/// Repository for the seeded member types
#[derive(Clone)]
pub struct PgMemberTypeRepository {
    pool: PgPool,
}

impl PgMemberTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberTypeRepository for PgMemberTypeRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: MemberTypeId) -> RepositoryResult<Option<MemberType>> {
        let sql = format!(
            "SELECT {} FROM member_types WHERE id = $1",
            MEMBER_TYPE_COLUMNS
        );
        Ok(sqlx::query_as::<_, MemberType>(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepositoryResult<Vec<MemberType>> {
        let sql = format!("SELECT {} FROM member_types", MEMBER_TYPE_COLUMNS);
        Ok(sqlx::query_as::<_, MemberType>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn find_by_ids(
        &self,
        ids: &[MemberTypeId],
    ) -> RepositoryResult<HashMap<MemberTypeId, MemberType>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let keys: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
        let sql = format!(
            "SELECT {} FROM member_types WHERE id = ANY($1)",
            MEMBER_TYPE_COLUMNS
        );
        let member_types: Vec<MemberType> = sqlx::query_as(&sql)
            .bind(&keys)
            .fetch_all(&self.pool)
            .await?;

        Ok(member_types.into_iter().map(|m| (m.id, m)).collect())
    }
}

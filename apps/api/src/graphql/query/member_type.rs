//! Member type queries

use async_graphql::{Context, Object, Result};

use crate::graphql::error::to_graphql_error;
use crate::graphql::types::{MemberType, MemberTypeId};
use crate::repositories::Database;

/// Lookups over the seeded member types
#[derive(Default)]
pub struct MemberTypeQuery;

#[Object]
impl MemberTypeQuery {
    /// Get a member type by ID
    async fn member_type(
        &self,
        ctx: &Context<'_>,
        id: MemberTypeId,
    ) -> Result<Option<MemberType>> {
        tracing::debug!(?id, "Resolving memberType");
        let db = ctx.data::<Database>()?;
        let member_type = db
            .member_types()
            .find_by_id(id.into())
            .await
            .map_err(to_graphql_error)?;
        Ok(member_type.map(MemberType::from))
    }

    /// List all member types
    async fn member_types(&self, ctx: &Context<'_>) -> Result<Option<Vec<MemberType>>> {
        let db = ctx.data::<Database>()?;
        let member_types = db
            .member_types()
            .find_all()
            .await
            .map_err(to_graphql_error)?;
        Ok(Some(member_types.into_iter().map(MemberType::from).collect()))
    }
}

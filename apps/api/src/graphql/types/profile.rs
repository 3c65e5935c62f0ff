//! Profile GraphQL type
//!
//! This module defines the GraphQL type for profiles with its member type
//! relationship resolver.

use async_graphql::dataloader::DataLoader;
use async_graphql::{Context, Object, Result};

use crate::graphql::error::to_graphql_error;
use crate::graphql::loaders::MemberTypeLoader;
use crate::models::Profile as DbProfile;
use crate::repositories::Database;

use super::member_type::{MemberType, MemberTypeId};
use super::scalar::UuidScalar;

/// Profile exposed via GraphQL
pub struct Profile {
    inner: DbProfile,
}

impl Profile {
    /// Create a new GraphQL Profile from a database Profile
    pub fn new(profile: DbProfile) -> Self {
        Self { inner: profile }
    }
}

impl From<DbProfile> for Profile {
    fn from(profile: DbProfile) -> Self {
        Self::new(profile)
    }
}

#[Object]
impl Profile {
    /// Unique profile identifier
    async fn id(&self) -> UuidScalar {
        self.inner.id.into()
    }

    async fn is_male(&self) -> bool {
        self.inner.is_male
    }

    async fn year_of_birth(&self) -> i32 {
        self.inner.year_of_birth
    }

    /// Identifier of the owning user
    async fn user_id(&self) -> UuidScalar {
        self.inner.user_id.into()
    }

    async fn member_type_id(&self) -> MemberTypeId {
        self.inner.member_type_id.into()
    }

    // Relationship resolvers

    /// Member type referenced by this profile
    async fn member_type(&self, ctx: &Context<'_>) -> Result<Option<MemberType>> {
        let id = self.inner.member_type_id;
        tracing::debug!(
            profile_id = %self.inner.id,
            member_type_id = %id,
            "Resolving Profile.memberType"
        );

        let member_type = match ctx.data_opt::<DataLoader<MemberTypeLoader>>() {
            Some(loader) => loader.load_one(id).await.map_err(to_graphql_error)?,
            None => ctx
                .data::<Database>()?
                .member_types()
                .find_by_id(id)
                .await
                .map_err(to_graphql_error)?,
        };
        Ok(member_type.map(MemberType::from))
    }
}

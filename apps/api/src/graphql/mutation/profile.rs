//! Profile mutations
//!
//! A user owns at most one profile; creating a second one fails with a
//! `CONFLICT` error.

use async_graphql::{Context, InputObject, Object, Result};
use uuid::Uuid;

use crate::graphql::error::to_graphql_error;
use crate::graphql::types::{MemberTypeId, Profile, UuidScalar};
use crate::models::{ChangeProfile, CreateProfile};
use crate::repositories::Database;

/// Input for creating a profile
#[derive(Debug, InputObject)]
pub struct CreateProfileInput {
    /// Owning user
    pub user_id: UuidScalar,
    pub is_male: bool,
    pub year_of_birth: i32,
    pub member_type_id: MemberTypeId,
}

impl From<CreateProfileInput> for CreateProfile {
    fn from(input: CreateProfileInput) -> Self {
        Self {
            user_id: input.user_id.into(),
            is_male: input.is_male,
            year_of_birth: input.year_of_birth,
            member_type_id: input.member_type_id.into(),
        }
    }
}

/// Input for updating a profile; the owning user cannot change
#[derive(Debug, InputObject)]
pub struct ChangeProfileInput {
    pub is_male: Option<bool>,
    pub year_of_birth: Option<i32>,
    pub member_type_id: Option<MemberTypeId>,
}

impl From<ChangeProfileInput> for ChangeProfile {
    fn from(input: ChangeProfileInput) -> Self {
        Self {
            is_male: input.is_male,
            year_of_birth: input.year_of_birth,
            member_type_id: input.member_type_id.map(Into::into),
        }
    }
}

/// Profile mutations
#[derive(Default)]
pub struct ProfileMutation;

#[Object]
impl ProfileMutation {
    /// Create a profile for an existing user
    async fn create_profile(
        &self,
        ctx: &Context<'_>,
        dto: CreateProfileInput,
    ) -> Result<Option<Profile>> {
        let db = ctx.data::<Database>()?;
        let profile = db
            .profiles()
            .create(dto.into())
            .await
            .map_err(to_graphql_error)?;

        tracing::info!(profile_id = %profile.id, user_id = %profile.user_id, "Profile created");
        Ok(Some(Profile::from(profile)))
    }

    /// Update an existing profile
    async fn change_profile(
        &self,
        ctx: &Context<'_>,
        id: UuidScalar,
        dto: ChangeProfileInput,
    ) -> Result<Option<Profile>> {
        let id = Uuid::from(id);
        let db = ctx.data::<Database>()?;
        let profile = db
            .profiles()
            .update(id, dto.into())
            .await
            .map_err(to_graphql_error)?;

        tracing::info!(profile_id = %id, "Profile updated");
        Ok(Some(Profile::from(profile)))
    }

    /// Delete a profile, returning the deleted ID
    async fn delete_profile(&self, ctx: &Context<'_>, id: UuidScalar) -> Result<Option<String>> {
        let id = Uuid::from(id);
        let db = ctx.data::<Database>()?;
        db.profiles().delete(id).await.map_err(to_graphql_error)?;

        tracing::info!(profile_id = %id, "Profile deleted");
        Ok(Some(id.to_string()))
    }
}

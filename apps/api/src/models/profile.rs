//! Profile model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::MemberTypeId;

/// Profile record from the profiles table (one per user)
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Profile {
    pub id: Uuid,
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: Uuid,
    pub member_type_id: MemberTypeId,
}

/// Profile creation input
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfile {
    pub user_id: Uuid,
    pub is_male: bool,
    pub year_of_birth: i32,
    pub member_type_id: MemberTypeId,
}

/// Partial profile update; the owning user cannot be changed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeProfile {
    pub is_male: Option<bool>,
    pub year_of_birth: Option<i32>,
    pub member_type_id: Option<MemberTypeId>,
}

impl CreateProfile {
    pub fn into_profile(self, id: Uuid) -> Profile {
        Profile {
            id,
            is_male: self.is_male,
            year_of_birth: self.year_of_birth,
            user_id: self.user_id,
            member_type_id: self.member_type_id,
        }
    }
}

impl ChangeProfile {
    pub fn apply(self, profile: &mut Profile) {
        if let Some(is_male) = self.is_male {
            profile.is_male = is_male;
        }
        if let Some(year_of_birth) = self.year_of_birth {
            profile.year_of_birth = year_of_birth;
        }
        if let Some(member_type_id) = self.member_type_id {
            profile.member_type_id = member_type_id;
        }
    }
}

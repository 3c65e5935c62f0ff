//! Member type model
//!
//! Member types are the two membership tiers a profile can reference. The
//! table is seeded by the initial migration and never written by the API.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Member type identifier matching the `member_types.id` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberTypeId {
    Basic,
    Business,
}

impl MemberTypeId {
    /// All member type identifiers, in seed order
    pub const ALL: [MemberTypeId; 2] = [MemberTypeId::Basic, MemberTypeId::Business];

    /// Returns the stored string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberTypeId::Basic => "BASIC",
            MemberTypeId::Business => "BUSINESS",
        }
    }
}

impl std::fmt::Display for MemberTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MemberTypeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BASIC" => Ok(Self::Basic),
            "BUSINESS" => Ok(Self::Business),
            other => Err(format!("unknown member type: {}", other)),
        }
    }
}

/// Member type record from the member_types table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct MemberType {
    /// Tier identifier
    pub id: MemberTypeId,

    /// Discount granted to members of this tier
    pub discount: f64,

    /// Number of posts a member may publish per month
    pub posts_limit_per_month: i32,
}

impl MemberType {
    /// The rows inserted by the initial migration
    pub fn seed() -> Vec<MemberType> {
        vec![
            MemberType {
                id: MemberTypeId::Basic,
                discount: 2.3,
                posts_limit_per_month: 20,
            },
            MemberType {
                id: MemberTypeId::Business,
                discount: 7.7,
                posts_limit_per_month: 100,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_type_id_round_trips_through_str() {
        for id in MemberTypeId::ALL {
            assert_eq!(id.as_str().parse::<MemberTypeId>().unwrap(), id);
        }
        assert!("PREMIUM".parse::<MemberTypeId>().is_err());
    }

    #[test]
    fn test_member_type_id_serializes_uppercase() {
        let json = serde_json::to_string(&MemberTypeId::Business).unwrap();
        assert_eq!(json, "\"BUSINESS\"");
    }

    #[test]
    fn test_seed_covers_every_tier() {
        let seed = MemberType::seed();
        let ids: Vec<_> = seed.iter().map(|m| m.id).collect();
        assert_eq!(ids, MemberTypeId::ALL.to_vec());
    }
}

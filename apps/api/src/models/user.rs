//! User model
//!
//! Users own at most one profile, any number of posts, and sit on both ends
//! of subscription edges.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User record from the users table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Account balance
    pub balance: f64,
}

/// User creation input
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub balance: f64,
}

/// Partial user update; `None` keeps the stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeUser {
    pub name: Option<String>,
    pub balance: Option<f64>,
}

impl CreateUser {
    /// Build the record this input describes under the given id
    pub fn into_user(self, id: Uuid) -> User {
        User {
            id,
            name: self.name,
            balance: self.balance,
        }
    }
}

impl ChangeUser {
    /// Apply the provided fields to an existing record
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(balance) = self.balance {
            user.balance = balance;
        }
    }
}

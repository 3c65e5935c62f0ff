//! Subscription edge model
//!
//! A subscription is a directed edge from a subscriber to the author they
//! follow, stored in the `subscribers_on_authors` join table.

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Row of the subscribers_on_authors table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRow, Serialize)]
pub struct Subscription {
    /// The following user
    pub subscriber_id: Uuid,

    /// The followed user
    pub author_id: Uuid,
}

impl Subscription {
    pub fn new(subscriber_id: Uuid, author_id: Uuid) -> Self {
        Self {
            subscriber_id,
            author_id,
        }
    }

    /// Whether either end of the edge is the given user
    pub fn touches(&self, user_id: Uuid) -> bool {
        self.subscriber_id == user_id || self.author_id == user_id
    }
}

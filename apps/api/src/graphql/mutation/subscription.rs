//! Subscription mutations
//!
//! Edges are directional: `subscribeTo(userId, authorId)` makes `userId` a
//! subscriber of `authorId`. Both mutations return the author's ID.

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::error::to_graphql_error;
use crate::graphql::types::UuidScalar;
use crate::repositories::Database;

/// Mutations over the subscription graph
#[derive(Default)]
pub struct SubscriptionMutation;

#[Object]
impl SubscriptionMutation {
    /// Subscribe a user to an author
    ///
    /// # Errors
    /// `CONFLICT` when the subscription already exists,
    /// `FOREIGN_KEY_VIOLATION` when either user is missing.
    async fn subscribe_to(
        &self,
        ctx: &Context<'_>,
        user_id: UuidScalar,
        author_id: UuidScalar,
    ) -> Result<Option<String>> {
        let user_id = Uuid::from(user_id);
        let author_id = Uuid::from(author_id);
        let db = ctx.data::<Database>()?;
        db.subscriptions()
            .subscribe(user_id, author_id)
            .await
            .map_err(to_graphql_error)?;

        tracing::info!(subscriber_id = %user_id, author_id = %author_id, "Subscription created");
        Ok(Some(author_id.to_string()))
    }

    /// Remove a user's subscription to an author
    ///
    /// # Errors
    /// `NOT_FOUND` when the user does not subscribe to the author.
    async fn unsubscribe_from(
        &self,
        ctx: &Context<'_>,
        user_id: UuidScalar,
        author_id: UuidScalar,
    ) -> Result<Option<String>> {
        let user_id = Uuid::from(user_id);
        let author_id = Uuid::from(author_id);
        let db = ctx.data::<Database>()?;
        db.subscriptions()
            .unsubscribe(user_id, author_id)
            .await
            .map_err(to_graphql_error)?;

        tracing::info!(subscriber_id = %user_id, author_id = %author_id, "Subscription removed");
        Ok(Some(author_id.to_string()))
    }
}

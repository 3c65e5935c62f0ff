//! DataLoader implementations for GraphQL
//!
//! Nested fields resolve one persistence call per parent by default. When
//! batch loading is enabled these loaders are registered on each request,
//! collapsing the per-parent calls of a field into one batched call.
//!
//! There are two types of loaders:
//! - Single-entity loaders: Return `Option<T>` for a single entity by key
//! - Collection loaders: Return `Vec<T>` for related entities by parent ID
//!
//! Loaders are created per request, so nothing is cached across requests.

mod member_type;
mod posts_by_author;
mod profile_by_user;
mod subscribed_to;
mod subscribers_of;

pub use member_type::MemberTypeLoader;
pub use posts_by_author::PostsByAuthorLoader;
pub use profile_by_user::ProfileByUserLoader;
pub use subscribed_to::SubscribedToLoader;
pub use subscribers_of::SubscribersOfLoader;

use async_graphql::dataloader::DataLoader;
use async_graphql::Request;

use crate::repositories::Database;

/// Attach a fresh set of loaders to a single request
pub fn register_loaders(request: Request, db: &Database) -> Request {
    request
        .data(DataLoader::new(
            ProfileByUserLoader::new(db.clone()),
            tokio::spawn,
        ))
        .data(DataLoader::new(
            PostsByAuthorLoader::new(db.clone()),
            tokio::spawn,
        ))
        .data(DataLoader::new(
            SubscribedToLoader::new(db.clone()),
            tokio::spawn,
        ))
        .data(DataLoader::new(
            SubscribersOfLoader::new(db.clone()),
            tokio::spawn,
        ))
        .data(DataLoader::new(
            MemberTypeLoader::new(db.clone()),
            tokio::spawn,
        ))
}

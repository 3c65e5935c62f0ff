//! GraphQL mutations for the membership API
//!
//! This module contains all mutation resolvers, organized by entity. Each
//! mutation performs exactly one persistence write.

mod post;
mod profile;
mod subscription;
mod user;

pub use post::{ChangePostInput, CreatePostInput, PostMutation};
pub use profile::{ChangeProfileInput, CreateProfileInput, ProfileMutation};
pub use subscription::SubscriptionMutation;
pub use user::{ChangeUserInput, CreateUserInput, UserMutation};

use async_graphql::MergedObject;

/// Root mutation type combining all mutation domains
#[derive(MergedObject, Default)]
pub struct Mutation(
    UserMutation,
    ProfileMutation,
    PostMutation,
    SubscriptionMutation,
);

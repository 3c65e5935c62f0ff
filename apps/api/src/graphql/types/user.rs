//! User GraphQL type
//!
//! Every relationship below resolves with one persistence call per parent
//! user. When the request carries DataLoaders, the calls for all parents of
//! a field are batched into one.

use async_graphql::dataloader::DataLoader;
use async_graphql::{Context, Object, Result};

use crate::graphql::error::to_graphql_error;
use crate::graphql::loaders::{
    PostsByAuthorLoader, ProfileByUserLoader, SubscribedToLoader, SubscribersOfLoader,
};
use crate::models::User as DbUser;
use crate::repositories::Database;

use super::post::Post;
use super::profile::Profile;
use super::scalar::UuidScalar;

/// User exposed via GraphQL
pub struct User {
    inner: DbUser,
}

impl User {
    /// Create a new GraphQL User from a database User
    pub fn new(user: DbUser) -> Self {
        Self { inner: user }
    }
}

impl From<DbUser> for User {
    fn from(user: DbUser) -> Self {
        Self::new(user)
    }
}

fn into_users(users: Vec<DbUser>) -> Vec<User> {
    users.into_iter().map(User::from).collect()
}

#[Object]
impl User {
    /// Unique user identifier
    async fn id(&self) -> UuidScalar {
        self.inner.id.into()
    }

    async fn name(&self) -> &str {
        &self.inner.name
    }

    async fn balance(&self) -> f64 {
        self.inner.balance
    }

    // Relationship resolvers

    /// The user's profile, if one was created
    async fn profile(&self, ctx: &Context<'_>) -> Result<Option<Profile>> {
        tracing::debug!(user_id = %self.inner.id, "Resolving User.profile");

        let profile = match ctx.data_opt::<DataLoader<ProfileByUserLoader>>() {
            Some(loader) => loader
                .load_one(self.inner.id)
                .await
                .map_err(to_graphql_error)?,
            None => ctx
                .data::<Database>()?
                .profiles()
                .find_by_user_id(self.inner.id)
                .await
                .map_err(to_graphql_error)?,
        };
        Ok(profile.map(Profile::from))
    }

    /// Posts written by the user
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        tracing::debug!(user_id = %self.inner.id, "Resolving User.posts");

        let posts = match ctx.data_opt::<DataLoader<PostsByAuthorLoader>>() {
            Some(loader) => loader
                .load_one(self.inner.id)
                .await
                .map_err(to_graphql_error)?
                .unwrap_or_default(),
            None => ctx
                .data::<Database>()?
                .posts()
                .find_by_author(self.inner.id)
                .await
                .map_err(to_graphql_error)?,
        };
        Ok(posts.into_iter().map(Post::from).collect())
    }

    /// Authors this user subscribes to
    async fn user_subscribed_to(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        tracing::debug!(user_id = %self.inner.id, "Resolving User.userSubscribedTo");

        let authors = match ctx.data_opt::<DataLoader<SubscribedToLoader>>() {
            Some(loader) => loader
                .load_one(self.inner.id)
                .await
                .map_err(to_graphql_error)?
                .unwrap_or_default(),
            None => ctx
                .data::<Database>()?
                .users()
                .find_subscribed_to(self.inner.id)
                .await
                .map_err(to_graphql_error)?,
        };
        Ok(into_users(authors))
    }

    /// Users subscribed to this user
    async fn subscribed_to_user(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        tracing::debug!(user_id = %self.inner.id, "Resolving User.subscribedToUser");

        let subscribers = match ctx.data_opt::<DataLoader<SubscribersOfLoader>>() {
            Some(loader) => loader
                .load_one(self.inner.id)
                .await
                .map_err(to_graphql_error)?
                .unwrap_or_default(),
            None => ctx
                .data::<Database>()?
                .users()
                .find_subscribers_of(self.inner.id)
                .await
                .map_err(to_graphql_error)?,
        };
        Ok(into_users(subscribers))
    }
}

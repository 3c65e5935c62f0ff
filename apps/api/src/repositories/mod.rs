//! Persistence layer for the membership API
//!
//! Every entity collection is reached through a repository trait so the
//! GraphQL layer never issues raw queries. Two backends implement the
//! traits:
//! - PostgreSQL through `sqlx` (the `Pg*Repository` types)
//! - An in-process store with the same invariants ([`InMemoryStore`])
//!
//! [`Database`] bundles one handle per collection and is the persistence
//! handle placed into the GraphQL context.

pub mod error;
pub mod member_type;
pub mod memory;
pub mod post;
pub mod profile;
pub mod subscription;
pub mod user;
pub mod utils;

pub use error::{RepositoryError, RepositoryResult};
pub use member_type::PgMemberTypeRepository;
pub use memory::InMemoryStore;
pub use post::PgPostRepository;
pub use profile::PgProfileRepository;
pub use subscription::PgSubscriptionRepository;
pub use user::PgUserRepository;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    ChangePost, ChangeProfile, ChangeUser, CreatePost, CreateProfile, CreateUser, MemberType,
    MemberTypeId, Post, Profile, Subscription, User,
};

/// Access to the users table and the subscription graph between users
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>>;

    async fn find_all(&self) -> RepositoryResult<Vec<User>>;

    /// Authors the given user subscribes to
    async fn find_subscribed_to(&self, subscriber_id: Uuid) -> RepositoryResult<Vec<User>>;

    /// Users subscribed to the given author
    async fn find_subscribers_of(&self, author_id: Uuid) -> RepositoryResult<Vec<User>>;

    /// Batched [`UserRepository::find_subscribed_to`], keyed by subscriber id
    async fn find_subscribed_to_many(
        &self,
        subscriber_ids: &[Uuid],
    ) -> RepositoryResult<HashMap<Uuid, Vec<User>>>;

    /// Batched [`UserRepository::find_subscribers_of`], keyed by author id
    async fn find_subscribers_of_many(
        &self,
        author_ids: &[Uuid],
    ) -> RepositoryResult<HashMap<Uuid, Vec<User>>>;

    async fn create(&self, input: CreateUser) -> RepositoryResult<User>;

    /// Fails with [`RepositoryError::NotFound`] when the user does not exist
    async fn update(&self, id: Uuid, input: ChangeUser) -> RepositoryResult<User>;

    /// Removes the user together with its profile, posts and subscription edges
    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;
}

/// Access to the profiles table
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Profile>>;

    async fn find_all(&self) -> RepositoryResult<Vec<Profile>>;

    async fn find_by_user_id(&self, user_id: Uuid) -> RepositoryResult<Option<Profile>>;

    async fn find_by_user_ids(&self, user_ids: &[Uuid])
        -> RepositoryResult<HashMap<Uuid, Profile>>;

    /// Fails with a conflict when the user already has a profile
    async fn create(&self, input: CreateProfile) -> RepositoryResult<Profile>;

    async fn update(&self, id: Uuid, input: ChangeProfile) -> RepositoryResult<Profile>;

    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;
}

/// Access to the posts table
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Post>>;

    async fn find_all(&self) -> RepositoryResult<Vec<Post>>;

    async fn find_by_author(&self, author_id: Uuid) -> RepositoryResult<Vec<Post>>;

    async fn find_by_authors(&self, author_ids: &[Uuid])
        -> RepositoryResult<HashMap<Uuid, Vec<Post>>>;

    async fn create(&self, input: CreatePost) -> RepositoryResult<Post>;

    async fn update(&self, id: Uuid, input: ChangePost) -> RepositoryResult<Post>;

    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;
}

/// Read-only access to the seeded member types
#[async_trait]
pub trait MemberTypeRepository: Send + Sync {
    async fn find_by_id(&self, id: MemberTypeId) -> RepositoryResult<Option<MemberType>>;

    async fn find_all(&self) -> RepositoryResult<Vec<MemberType>>;

    async fn find_by_ids(
        &self,
        ids: &[MemberTypeId],
    ) -> RepositoryResult<HashMap<MemberTypeId, MemberType>>;
}

/// Writes to the subscribers_on_authors join table
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Fails with a conflict when the edge already exists
    async fn subscribe(&self, subscriber_id: Uuid, author_id: Uuid)
        -> RepositoryResult<Subscription>;

    /// Fails with [`RepositoryError::NotFound`] when the edge does not exist
    async fn unsubscribe(&self, subscriber_id: Uuid, author_id: Uuid) -> RepositoryResult<()>;
}

#[derive(Clone)]
enum Backend {
    Postgres(PgPool),
    Memory,
}

/// Persistence handle shared by every resolver
#[derive(Clone)]
pub struct Database {
    users: Arc<dyn UserRepository>,
    profiles: Arc<dyn ProfileRepository>,
    posts: Arc<dyn PostRepository>,
    member_types: Arc<dyn MemberTypeRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    backend: Backend,
}

impl Database {
    /// Repositories backed by a PostgreSQL pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            profiles: Arc::new(PgProfileRepository::new(pool.clone())),
            posts: Arc::new(PgPostRepository::new(pool.clone())),
            member_types: Arc::new(PgMemberTypeRepository::new(pool.clone())),
            subscriptions: Arc::new(PgSubscriptionRepository::new(pool.clone())),
            backend: Backend::Postgres(pool),
        }
    }

    /// Repositories backed by a fresh in-memory store seeded with member types
    pub fn in_memory() -> Self {
        Self::from_store(InMemoryStore::new())
    }

    /// Repositories backed by an existing in-memory store
    ///
    /// The store is shared, so callers can keep a clone to inspect it.
    pub fn from_store(store: InMemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            profiles: Arc::new(store.clone()),
            posts: Arc::new(store.clone()),
            member_types: Arc::new(store.clone()),
            subscriptions: Arc::new(store),
            backend: Backend::Memory,
        }
    }

    pub fn users(&self) -> &dyn UserRepository {
        self.users.as_ref()
    }

    pub fn profiles(&self) -> &dyn ProfileRepository {
        self.profiles.as_ref()
    }

    pub fn posts(&self) -> &dyn PostRepository {
        self.posts.as_ref()
    }

    pub fn member_types(&self) -> &dyn MemberTypeRepository {
        self.member_types.as_ref()
    }

    pub fn subscriptions(&self) -> &dyn SubscriptionRepository {
        self.subscriptions.as_ref()
    }

    /// Name of the active backend, for logs and health output
    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory => "memory",
        }
    }

    /// Check that the backend is reachable
    pub async fn ping(&self) -> RepositoryResult<()> {
        match &self.backend {
            Backend::Postgres(pool) => {
                sqlx::query("SELECT 1").execute(pool).await?;
                Ok(())
            }
            Backend::Memory => Ok(()),
        }
    }
}

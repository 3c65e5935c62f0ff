//! In-memory persistence backend
//!
//! Provides an [`InMemoryStore`] that implements every repository trait
//! against plain vectors, preserving insertion order and enforcing the same
//! invariants as the PostgreSQL schema:
//! - one profile per user, one edge per (subscriber, author) pair
//! - foreign keys from profiles, posts and edges to their parents
//! - deleting a user cascades to its profile, posts and edges
//!
//! # Lock Poisoning Recovery
//!
//! Locks are taken with `unwrap_or_else(|e| e.into_inner())` so a panic in
//! one test does not poison the store for the next caller.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use uuid::Uuid;

use super::utils::group_by_key;
use super::{
    MemberTypeRepository, PostRepository, ProfileRepository, RepositoryError, RepositoryResult,
    SubscriptionRepository, UserRepository,
};
use crate::models::{
    ChangePost, ChangeProfile, ChangeUser, CreatePost, CreateProfile, CreateUser, MemberType,
    MemberTypeId, Post, Profile, Subscription, User,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    profiles: Vec<Profile>,
    posts: Vec<Post>,
    member_types: Vec<MemberType>,
    subscriptions: Vec<Subscription>,
}

impl Tables {
    fn user_exists(&self, id: Uuid) -> bool {
        self.users.iter().any(|u| u.id == id)
    }

    fn member_type_exists(&self, id: MemberTypeId) -> bool {
        self.member_types.iter().any(|m| m.id == id)
    }

    fn users_by_ids(&self, ids: impl Iterator<Item = Uuid>) -> Vec<User> {
        ids.filter_map(|id| self.users.iter().find(|u| u.id == id).cloned())
            .collect()
    }
}

/// In-memory store shared by all clones
///
/// # Example
///
/// ```rust
/// use membership_api::repositories::{Database, InMemoryStore};
///
/// let store = InMemoryStore::new();
/// let db = Database::from_store(store.clone());
/// assert_eq!(db.backend_name(), "memory");
/// assert_eq!(store.read_count(), 0);
/// ```
#[derive(Clone)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
    reads: Arc<AtomicUsize>,
}

impl InMemoryStore {
    /// Create a store seeded with the two member types
    pub fn new() -> Self {
        let store = Self::empty();
        store.write().member_types = MemberType::seed();
        store
    }

    /// Create a store with no rows at all, member types included
    pub fn empty() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of read calls served so far
    ///
    /// Each repository read counts once regardless of how many rows it
    /// returns, which makes per-parent versus batched fetching observable.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Reset the read counter
    pub fn reset_read_count(&self) {
        self.reads.store(0, Ordering::SeqCst);
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.tables.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        Ok(self.read().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<User>> {
        Ok(self.read().users.clone())
    }

    async fn find_subscribed_to(&self, subscriber_id: Uuid) -> RepositoryResult<Vec<User>> {
        let tables = self.read();
        let authors = tables
            .subscriptions
            .iter()
            .filter(|s| s.subscriber_id == subscriber_id)
            .map(|s| s.author_id);
        Ok(tables.users_by_ids(authors))
    }

    async fn find_subscribers_of(&self, author_id: Uuid) -> RepositoryResult<Vec<User>> {
        let tables = self.read();
        let subscribers = tables
            .subscriptions
            .iter()
            .filter(|s| s.author_id == author_id)
            .map(|s| s.subscriber_id);
        Ok(tables.users_by_ids(subscribers))
    }

    async fn find_subscribed_to_many(
        &self,
        subscriber_ids: &[Uuid],
    ) -> RepositoryResult<HashMap<Uuid, Vec<User>>> {
        let tables = self.read();
        let edges: Vec<(Uuid, User)> = tables
            .subscriptions
            .iter()
            .filter(|s| subscriber_ids.contains(&s.subscriber_id))
            .filter_map(|s| {
                tables
                    .users
                    .iter()
                    .find(|u| u.id == s.author_id)
                    .map(|u| (s.subscriber_id, u.clone()))
            })
            .collect();

        Ok(group_by_key(subscriber_ids, edges, |edge| edge.0)
            .into_iter()
            .map(|(key, edges)| (key, edges.into_iter().map(|e| e.1).collect()))
            .collect())
    }

    async fn find_subscribers_of_many(
        &self,
        author_ids: &[Uuid],
    ) -> RepositoryResult<HashMap<Uuid, Vec<User>>> {
        let tables = self.read();
        let edges: Vec<(Uuid, User)> = tables
            .subscriptions
            .iter()
            .filter(|s| author_ids.contains(&s.author_id))
            .filter_map(|s| {
                tables
                    .users
                    .iter()
                    .find(|u| u.id == s.subscriber_id)
                    .map(|u| (s.author_id, u.clone()))
            })
            .collect();

        Ok(group_by_key(author_ids, edges, |edge| edge.0)
            .into_iter()
            .map(|(key, edges)| (key, edges.into_iter().map(|e| e.1).collect()))
            .collect())
    }

    async fn create(&self, input: CreateUser) -> RepositoryResult<User> {
        let user = input.into_user(Uuid::new_v4());
        self.write().users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: Uuid, input: ChangeUser) -> RepositoryResult<User> {
        let mut tables = self.write();
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| RepositoryError::not_found("user", id))?;
        input.apply(user);
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let mut tables = self.write();
        if !tables.user_exists(id) {
            return Err(RepositoryError::not_found("user", id));
        }
        tables.users.retain(|u| u.id != id);
        tables.profiles.retain(|p| p.user_id != id);
        tables.posts.retain(|p| p.author_id != id);
        tables.subscriptions.retain(|s| !s.touches(id));
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Profile>> {
        Ok(self.read().profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Profile>> {
        Ok(self.read().profiles.clone())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> RepositoryResult<Option<Profile>> {
        Ok(self
            .read()
            .profiles
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn find_by_user_ids(
        &self,
        user_ids: &[Uuid],
    ) -> RepositoryResult<HashMap<Uuid, Profile>> {
        Ok(self
            .read()
            .profiles
            .iter()
            .filter(|p| user_ids.contains(&p.user_id))
            .map(|p| (p.user_id, p.clone()))
            .collect())
    }

    async fn create(&self, input: CreateProfile) -> RepositoryResult<Profile> {
        let mut tables = self.write();
        if !tables.user_exists(input.user_id) {
            return Err(RepositoryError::foreign_key(
                "profile",
                format!("user {} does not exist", input.user_id),
            ));
        }
        if !tables.member_type_exists(input.member_type_id) {
            return Err(RepositoryError::foreign_key(
                "profile",
                format!("member type {} does not exist", input.member_type_id),
            ));
        }
        if tables.profiles.iter().any(|p| p.user_id == input.user_id) {
            return Err(RepositoryError::conflict(
                "profile",
                format!("user {} already has a profile", input.user_id),
            ));
        }

        let profile = input.into_profile(Uuid::new_v4());
        tables.profiles.push(profile.clone());
        Ok(profile)
    }

    async fn update(&self, id: Uuid, input: ChangeProfile) -> RepositoryResult<Profile> {
        let mut tables = self.write();
        if let Some(member_type_id) = input.member_type_id {
            if !tables.member_type_exists(member_type_id) {
                return Err(RepositoryError::foreign_key(
                    "profile",
                    format!("member type {} does not exist", member_type_id),
                ));
            }
        }

        let profile = tables
            .profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| RepositoryError::not_found("profile", id))?;
        input.apply(profile);
        Ok(profile.clone())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let mut tables = self.write();
        let before = tables.profiles.len();
        tables.profiles.retain(|p| p.id != id);
        if tables.profiles.len() == before {
            return Err(RepositoryError::not_found("profile", id));
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Post>> {
        Ok(self.read().posts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Post>> {
        Ok(self.read().posts.clone())
    }

    async fn find_by_author(&self, author_id: Uuid) -> RepositoryResult<Vec<Post>> {
        Ok(self
            .read()
            .posts
            .iter()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn find_by_authors(
        &self,
        author_ids: &[Uuid],
    ) -> RepositoryResult<HashMap<Uuid, Vec<Post>>> {
        let posts: Vec<Post> = self
            .read()
            .posts
            .iter()
            .filter(|p| author_ids.contains(&p.author_id))
            .cloned()
            .collect();
        Ok(group_by_key(author_ids, posts, |post| post.author_id))
    }

    async fn create(&self, input: CreatePost) -> RepositoryResult<Post> {
        let mut tables = self.write();
        if !tables.user_exists(input.author_id) {
            return Err(RepositoryError::foreign_key(
                "post",
                format!("author {} does not exist", input.author_id),
            ));
        }

        let post = input.into_post(Uuid::new_v4());
        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, id: Uuid, input: ChangePost) -> RepositoryResult<Post> {
        let mut tables = self.write();
        let post = tables
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| RepositoryError::not_found("post", id))?;
        input.apply(post);
        Ok(post.clone())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let mut tables = self.write();
        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != id);
        if tables.posts.len() == before {
            return Err(RepositoryError::not_found("post", id));
        }
        Ok(())
    }
}

#[async_trait]
impl MemberTypeRepository for InMemoryStore {
    async fn find_by_id(&self, id: MemberTypeId) -> RepositoryResult<Option<MemberType>> {
        Ok(self
            .read()
            .member_types
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<MemberType>> {
        Ok(self.read().member_types.clone())
    }

    async fn find_by_ids(
        &self,
        ids: &[MemberTypeId],
    ) -> RepositoryResult<HashMap<MemberTypeId, MemberType>> {
        Ok(self
            .read()
            .member_types
            .iter()
            .filter(|m| ids.contains(&m.id))
            .map(|m| (m.id, m.clone()))
            .collect())
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryStore {
    async fn subscribe(
        &self,
        subscriber_id: Uuid,
        author_id: Uuid,
    ) -> RepositoryResult<Subscription> {
        let mut tables = self.write();
        for id in [subscriber_id, author_id] {
            if !tables.user_exists(id) {
                return Err(RepositoryError::foreign_key(
                    "subscription",
                    format!("user {} does not exist", id),
                ));
            }
        }

        let edge = Subscription::new(subscriber_id, author_id);
        if tables.subscriptions.contains(&edge) {
            return Err(RepositoryError::conflict(
                "subscription",
                format!("{} already subscribes to {}", subscriber_id, author_id),
            ));
        }
        tables.subscriptions.push(edge);
        Ok(edge)
    }

    async fn unsubscribe(&self, subscriber_id: Uuid, author_id: Uuid) -> RepositoryResult<()> {
        let mut tables = self.write();
        let edge = Subscription::new(subscriber_id, author_id);
        let before = tables.subscriptions.len();
        tables.subscriptions.retain(|s| *s != edge);
        if tables.subscriptions.len() == before {
            return Err(RepositoryError::not_found(
                "subscription",
                format!("{} -> {}", subscriber_id, author_id),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    async fn user(store: &InMemoryStore, name: &str) -> User {
        UserRepository::create(
            store,
            CreateUser {
                name: name.to_string(),
                balance: 10.0,
            },
        )
        .await
        .unwrap()
    }

    fn profile_for(user_id: Uuid) -> CreateProfile {
        CreateProfile {
            user_id,
            is_male: true,
            year_of_birth: 1990,
            member_type_id: MemberTypeId::Basic,
        }
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let store = InMemoryStore::new();
        let names = ["carol", "alice", "bob"];
        for name in names {
            user(&store, name).await;
        }

        let all = UserRepository::find_all(&store).await.unwrap();
        let found: Vec<_> = all.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(found, names);
    }

    #[tokio::test]
    async fn test_empty_store_has_no_member_types() {
        let store = InMemoryStore::empty();
        assert!(MemberTypeRepository::find_all(&store)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            MemberTypeRepository::find_all(&InMemoryStore::new())
                .await
                .unwrap()
                .len(),
            2
        );
    }

    #[tokio::test]
    async fn test_second_profile_for_user_conflicts() {
        let store = InMemoryStore::new();
        let alice = user(&store, "alice").await;

        ProfileRepository::create(&store, profile_for(alice.id))
            .await
            .unwrap();
        let second = ProfileRepository::create(&store, profile_for(alice.id)).await;

        assert_matches!(second, Err(RepositoryError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_profile_for_missing_user_violates_foreign_key() {
        let store = InMemoryStore::new();
        let result = ProfileRepository::create(&store, profile_for(Uuid::new_v4())).await;
        assert_matches!(result, Err(RepositoryError::ForeignKey { .. }));
    }

    #[tokio::test]
    async fn test_post_for_missing_author_violates_foreign_key() {
        let store = InMemoryStore::new();
        let result = PostRepository::create(
            &store,
            CreatePost {
                author_id: Uuid::new_v4(),
                title: "t".to_string(),
                content: "c".to_string(),
            },
        )
        .await;
        assert_matches!(result, Err(RepositoryError::ForeignKey { .. }));
    }

    #[tokio::test]
    async fn test_subscription_edges_are_directional() {
        let store = InMemoryStore::new();
        let alice = user(&store, "alice").await;
        let bob = user(&store, "bob").await;

        store.subscribe(alice.id, bob.id).await.unwrap();

        let followed = store.find_subscribed_to(alice.id).await.unwrap();
        let followers = store.find_subscribers_of(bob.id).await.unwrap();
        assert_eq!(followed, vec![bob.clone()]);
        assert_eq!(followers, vec![alice.clone()]);
        assert!(store.find_subscribed_to(bob.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_subscription_conflicts() {
        let store = InMemoryStore::new();
        let alice = user(&store, "alice").await;
        let bob = user(&store, "bob").await;

        store.subscribe(alice.id, bob.id).await.unwrap();
        assert_matches!(
            store.subscribe(alice.id, bob.id).await,
            Err(RepositoryError::Conflict { .. })
        );
    }

    #[tokio::test]
    async fn test_unsubscribe_missing_edge_is_not_found() {
        let store = InMemoryStore::new();
        let alice = user(&store, "alice").await;
        let bob = user(&store, "bob").await;

        assert_matches!(
            store.unsubscribe(alice.id, bob.id).await,
            Err(RepositoryError::NotFound { entity: "subscription", .. })
        );
    }

    #[tokio::test]
    async fn test_delete_user_cascades() {
        let store = InMemoryStore::new();
        let alice = user(&store, "alice").await;
        let bob = user(&store, "bob").await;
        ProfileRepository::create(&store, profile_for(alice.id))
            .await
            .unwrap();
        PostRepository::create(
            &store,
            CreatePost {
                author_id: alice.id,
                title: "hello".to_string(),
                content: "world".to_string(),
            },
        )
        .await
        .unwrap();
        store.subscribe(alice.id, bob.id).await.unwrap();
        store.subscribe(bob.id, alice.id).await.unwrap();

        UserRepository::delete(&store, alice.id).await.unwrap();

        assert!(ProfileRepository::find_all(&store).await.unwrap().is_empty());
        assert!(PostRepository::find_all(&store).await.unwrap().is_empty());
        assert!(store.find_subscribers_of(bob.id).await.unwrap().is_empty());
        assert!(store.find_subscribed_to(bob.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_batched_lookups_cover_every_key() {
        let store = InMemoryStore::new();
        let alice = user(&store, "alice").await;
        let bob = user(&store, "bob").await;
        PostRepository::create(
            &store,
            CreatePost {
                author_id: alice.id,
                title: "one".to_string(),
                content: "1".to_string(),
            },
        )
        .await
        .unwrap();

        let posts = store.find_by_authors(&[alice.id, bob.id]).await.unwrap();
        assert_eq!(posts[&alice.id].len(), 1);
        assert!(posts[&bob.id].is_empty());
    }

    #[tokio::test]
    async fn test_read_count_tracks_reads_only() {
        let store = InMemoryStore::new();
        let alice = user(&store, "alice").await;
        assert_eq!(store.read_count(), 0);

        UserRepository::find_by_id(&store, alice.id).await.unwrap();
        PostRepository::find_by_author(&store, alice.id)
            .await
            .unwrap();
        assert_eq!(store.read_count(), 2);

        store.reset_read_count();
        assert_eq!(store.read_count(), 0);
    }
}

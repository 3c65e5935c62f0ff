//! Test fixtures for API integration tests
//!
//! Records are written straight through the repositories so that seeding
//! does not go through the schema under test.

#![allow(dead_code)]

use membership_api::models::{
    CreatePost, CreateProfile, CreateUser, MemberTypeId, Post, Profile, User,
};
use membership_api::repositories::Database;
use uuid::Uuid;

pub async fn create_user(db: &Database, name: &str, balance: f64) -> User {
    db.users()
        .create(CreateUser {
            name: name.to_string(),
            balance,
        })
        .await
        .expect("seed user")
}

pub async fn create_profile(
    db: &Database,
    user_id: Uuid,
    member_type_id: MemberTypeId,
) -> Profile {
    db.profiles()
        .create(CreateProfile {
            user_id,
            is_male: false,
            year_of_birth: 1988,
            member_type_id,
        })
        .await
        .expect("seed profile")
}

pub async fn create_post(db: &Database, author_id: Uuid, title: &str) -> Post {
    db.posts()
        .create(CreatePost {
            author_id,
            title: title.to_string(),
            content: format!("{} content", title),
        })
        .await
        .expect("seed post")
}

pub async fn subscribe(db: &Database, subscriber_id: Uuid, author_id: Uuid) {
    db.subscriptions()
        .subscribe(subscriber_id, author_id)
        .await
        .expect("seed subscription");
}

/// Three users where everyone has a profile and a post, alice and bob
/// follow each other, and carol follows alice
pub struct SocialGraph {
    pub alice: User,
    pub bob: User,
    pub carol: User,
}

impl SocialGraph {
    pub async fn seed(db: &Database) -> Self {
        let alice = create_user(db, "alice", 120.0).await;
        let bob = create_user(db, "bob", 40.5).await;
        let carol = create_user(db, "carol", 0.0).await;

        create_profile(db, alice.id, MemberTypeId::Business).await;
        create_profile(db, bob.id, MemberTypeId::Basic).await;
        create_profile(db, carol.id, MemberTypeId::Basic).await;

        create_post(db, alice.id, "alice-1").await;
        create_post(db, alice.id, "alice-2").await;
        create_post(db, bob.id, "bob-1").await;
        create_post(db, carol.id, "carol-1").await;

        subscribe(db, alice.id, bob.id).await;
        subscribe(db, bob.id, alice.id).await;
        subscribe(db, carol.id, alice.id).await;

        Self { alice, bob, carol }
    }
}

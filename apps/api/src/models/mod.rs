//! Database models for the membership domain
//!
//! Each model is a direct projection of one table:
//! - Users and the subscription edges between them
//! - Profiles and the member types they reference
//! - Posts written by users

pub mod member_type;
pub mod post;
pub mod profile;
pub mod subscription;
pub mod user;

pub use member_type::{MemberType, MemberTypeId};
pub use post::{ChangePost, CreatePost, Post};
pub use profile::{ChangeProfile, CreateProfile, Profile};
pub use subscription::Subscription;
pub use user::{ChangeUser, CreateUser, User};

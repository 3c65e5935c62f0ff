//! GraphQL type definitions for the membership API
//!
//! Object types wrap the database models and resolve their relationships
//! through the persistence handle in the context, or through the request's
//! DataLoaders when batch loading is enabled.

mod member_type;
mod post;
mod profile;
mod scalar;
mod user;

pub use member_type::{MemberType, MemberTypeId};
pub use post::Post;
pub use profile::Profile;
pub use scalar::UuidScalar;
pub use user::User;

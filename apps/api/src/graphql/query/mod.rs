//! GraphQL queries for the membership API
//!
//! This module contains all query resolvers, organized by entity. Every root
//! field is nullable so a failing field resolves to `null` while its
//! siblings still return data.

mod member_type;
mod post;
mod profile;
mod user;

pub use member_type::MemberTypeQuery;
pub use post::PostQuery;
pub use profile::ProfileQuery;
pub use user::UserQuery;

use async_graphql::MergedObject;

/// Root query type combining all query domains
#[derive(MergedObject, Default)]
#[graphql(name = "RootQueryType")]
pub struct Query(MemberTypeQuery, PostQuery, UserQuery, ProfileQuery);

//! Conversion of persistence failures into GraphQL errors

use std::borrow::Borrow;

use async_graphql::ErrorExtensions;

use crate::repositories::RepositoryError;

/// Message returned in place of raw backend errors
const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Convert a repository error into a GraphQL error carrying `extensions.code`
///
/// Accepts both owned errors and the `Arc`-wrapped errors returned by
/// DataLoaders. Backend failures are logged and replaced with a generic
/// message; client errors keep their own description.
pub fn to_graphql_error<E: Borrow<RepositoryError>>(error: E) -> async_graphql::Error {
    let error = error.borrow();
    let message = if error.is_client_error() {
        tracing::warn!(error = %error, "Rejected persistence call");
        error.to_string()
    } else {
        tracing::error!(error = %error, "Persistence call failed");
        INTERNAL_ERROR_MESSAGE.to_string()
    };

    let code = error.error_code();
    async_graphql::Error::new(message)
        .extend_with(|_, extensions| extensions.set("code", code.to_string()))
}

//! GraphQL HTTP route handlers
//!
//! - `POST /` - Plain JSON envelope `{ "query", "variables"? }`
//! - `POST /graphql` - async-graphql-axum endpoint (GET queries not served)
//! - `GET /graphql/playground` - GraphQL Playground, when enabled
//!
//! Both POST endpoints go through the same schema, so they share the
//! validation gate and the depth limit, and both encode responses with
//! [`response_body`].

use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql::{Request, Response, Value, Variables};
use async_graphql_axum::GraphQLRequest;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::graphql::GraphQLExecutor;

/// Request body accepted by `POST /`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphQLBody {
    /// GraphQL document source
    pub query: String,

    /// Variable values keyed by name
    #[serde(default)]
    pub variables: Option<serde_json::Map<String, serde_json::Value>>,
}

impl From<GraphQLBody> for Request {
    fn from(body: GraphQLBody) -> Self {
        let request = Request::new(body.query);
        match body.variables {
            Some(variables) => {
                request.variables(Variables::from_json(serde_json::Value::Object(variables)))
            }
            None => request,
        }
    }
}

/// Create the GraphQL router
pub fn graphql_router(executor: GraphQLExecutor, playground: bool) -> Router {
    let mut router = Router::new()
        .route("/", post(graphql_root))
        .route("/graphql", post(graphql_handler));

    if playground {
        router = router.route("/graphql/playground", get(graphql_playground));
    }

    router.with_state(executor)
}

/// Encode a response, omitting `data` when execution never started
///
/// A document rejected by parsing or validation yields a response whose
/// data is `null`; such responses carry only `errors`.
pub fn response_body(response: &Response) -> Result<serde_json::Value, serde_json::Error> {
    let mut body = serde_json::Map::new();
    if response.data != Value::Null {
        body.insert("data".to_string(), serde_json::to_value(&response.data)?);
    }
    if !response.errors.is_empty() {
        body.insert("errors".to_string(), serde_json::to_value(&response.errors)?);
    }
    Ok(serde_json::Value::Object(body))
}

/// Execute a request from the plain JSON envelope
async fn graphql_root(
    State(executor): State<GraphQLExecutor>,
    payload: Result<Json<GraphQLBody>, JsonRejection>,
) -> ApiResult<Json<serde_json::Value>> {
    let Json(body) = payload?;
    let response = executor.execute(body).await;

    if response.is_err() {
        tracing::debug!(errors = response.errors.len(), "GraphQL request returned errors");
    }

    Ok(Json(response_body(&response)?))
}

/// Execute a request decoded by the async-graphql-axum extractor
///
/// The body uses the same envelope as `POST /`.
async fn graphql_handler(
    State(executor): State<GraphQLExecutor>,
    req: GraphQLRequest,
) -> ApiResult<Json<serde_json::Value>> {
    let response = executor.execute(req.into_inner()).await;
    Ok(Json(response_body(&response)?))
}

/// GraphQL Playground handler for development
async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_rejects_unknown_keys() {
        let result =
            serde_json::from_str::<GraphQLBody>(r#"{"query": "{ users { id } }", "extra": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_body_accepts_null_variables() {
        let body: GraphQLBody =
            serde_json::from_str(r#"{"query": "{ users { id } }", "variables": null}"#).unwrap();
        assert!(body.variables.is_none());
    }

    #[test]
    fn test_response_body_omits_null_data() {
        let response = Response::from_errors(vec![async_graphql::ServerError::new(
            "Query is nested too deep.",
            None,
        )]);
        let body = response_body(&response).unwrap();
        assert!(body.get("data").is_none());
        assert_eq!(body["errors"][0]["message"], "Query is nested too deep.");
    }
}

//! Integration tests for the HTTP transport
//!
//! Drives the full router with `tower::ServiceExt::oneshot`.

mod common;

use axum::http::StatusCode;
use common::*;
use membership_api::config::GraphQLConfig;
use serde_json::json;

#[tokio::test]
async fn test_root_endpoint_executes_query() {
    let ctx = TestContext::new();
    create_user(&ctx.db, "alice", 5.0).await;

    let (status, body) = post_json(ctx.router(), "/", json!({ "query": "{ users { name } }" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": { "users": [{ "name": "alice" }] } }));
}

#[tokio::test]
async fn test_root_endpoint_passes_variables() {
    let ctx = TestContext::new();

    let (status, body) = post_json(
        ctx.router(),
        "/",
        json!({
            "query": "mutation($dto: CreateUserInput!) { createUser(dto: $dto) { name balance } }",
            "variables": { "dto": { "name": "Alice", "balance": 100 } },
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["createUser"],
        json!({ "name": "Alice", "balance": 100.0 })
    );
}

#[tokio::test]
async fn test_root_endpoint_depth_error_has_no_data() {
    let ctx = TestContext::new();
    let query = "{ users { subscribedToUser { subscribedToUser { subscribedToUser { subscribedToUser { id } } } } } }";

    let (status, body) = post_json(ctx.router(), "/", json!({ "query": query })).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("data").is_none());
    assert_eq!(body["errors"][0]["message"], "Query is nested too deep.");
}

#[tokio::test]
async fn test_root_endpoint_rejects_unknown_keys() {
    let ctx = TestContext::new();

    let (status, body) = post_json(
        ctx.router(),
        "/",
        json!({ "query": "{ users { id } }", "operation": "x" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_BODY");
}

#[tokio::test]
async fn test_root_endpoint_rejects_missing_query() {
    let ctx = TestContext::new();

    let (status, _) = post_json(ctx.router(), "/", json!({ "variables": {} })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_root_endpoint_rejects_malformed_json() {
    let ctx = TestContext::new();

    let (status, body) = post_raw(
        ctx.router(),
        "/",
        Some("application/json"),
        "{ \"query\": ".to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_BODY");
}

#[tokio::test]
async fn test_root_endpoint_requires_json_content_type() {
    let ctx = TestContext::new();

    let (status, body) = post_raw(
        ctx.router(),
        "/",
        None,
        json!({ "query": "{ users { id } }" }).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["code"], "UNSUPPORTED_MEDIA_TYPE");
}

#[tokio::test]
async fn test_graphql_endpoint_uses_same_schema() {
    let ctx = TestContext::new();

    let (status, body) = post_json(
        ctx.router(),
        "/graphql",
        json!({ "query": "{ memberType(id: BASIC) { discount } }" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["memberType"]["discount"], 2.3);
}

#[tokio::test]
async fn test_graphql_endpoint_depth_error_has_no_data() {
    let ctx = TestContext::new();
    let query = "{ users { subscribedToUser { subscribedToUser { subscribedToUser { subscribedToUser { id } } } } } }";

    let (status, body) = post_json(ctx.router(), "/graphql", json!({ "query": query })).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("data").is_none(), "unexpected data in {}", body);
    assert_eq!(body["errors"][0]["message"], "Query is nested too deep.");
}

#[tokio::test]
async fn test_graphql_endpoint_serves_schema_introspection() {
    let ctx = TestContext::new();
    let query = "{ __schema { queryType { name } types { name fields { name type { name ofType { name ofType { name } } } } } } }";

    let (status, body) = post_json(ctx.router(), "/graphql", json!({ "query": query })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        expect_data(&body)["__schema"]["queryType"]["name"],
        "RootQueryType"
    );
}

#[tokio::test]
async fn test_playground_toggle() {
    let enabled = TestContext::new();
    let (status, html) = get(enabled.router(), "/graphql/playground").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("GraphQL Playground"));

    let disabled = TestContext::with_config(GraphQLConfig {
        playground: false,
        ..GraphQLConfig::default()
    });
    let (status, _) = get(disabled.router(), "/graphql/playground").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_endpoints() {
    let ctx = TestContext::new();

    let (status, body) = get(ctx.router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let (status, body) = get(ctx.router(), "/health/live").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "alive");

    let (status, body) = get(ctx.router(), "/health/ready").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json, json!({ "status": "ready", "backend": "memory" }));
}

#[tokio::test]
async fn test_nonexistent_route_returns_404() {
    let ctx = TestContext::new();

    let (status, _) = get(ctx.router(), "/nonexistent").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

//! Test helper functions for API integration tests
//!
//! Provides a context bundling an in-memory store with the executor and
//! router built over it, plus response assertions.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use membership_api::build_router;
use membership_api::config::GraphQLConfig;
use membership_api::graphql::GraphQLExecutor;
use membership_api::repositories::{Database, InMemoryStore};
use membership_api::routes::graphql::response_body;

/// In-memory backend plus everything built on top of it
pub struct TestContext {
    pub store: InMemoryStore,
    pub db: Database,
    pub config: GraphQLConfig,
    pub executor: GraphQLExecutor,
}

impl TestContext {
    /// Naive per-parent fetching with the default depth limit
    pub fn new() -> Self {
        Self::with_config(GraphQLConfig::default())
    }

    /// Request-scoped DataLoaders enabled
    pub fn batched() -> Self {
        Self::with_config(GraphQLConfig {
            batch_loading: true,
            ..GraphQLConfig::default()
        })
    }

    /// No member types seeded, every table starts empty
    pub fn empty() -> Self {
        Self::from_store(InMemoryStore::empty(), GraphQLConfig::default())
    }

    pub fn with_config(config: GraphQLConfig) -> Self {
        Self::from_store(InMemoryStore::new(), config)
    }

    fn from_store(store: InMemoryStore, config: GraphQLConfig) -> Self {
        let db = Database::from_store(store.clone());
        let executor = GraphQLExecutor::new(db.clone(), &config);
        Self {
            store,
            db,
            config,
            executor,
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.db.clone(), &self.config)
    }

    /// Execute a document and return the JSON body the server would send
    pub async fn run(&self, query: &str) -> Value {
        self.run_with(query, Value::Null).await
    }

    /// Execute a document with variables
    pub async fn run_with(&self, query: &str, variables: Value) -> Value {
        let mut request = async_graphql::Request::new(query);
        if !variables.is_null() {
            request = request.variables(async_graphql::Variables::from_json(variables));
        }
        let response = self.executor.execute(request).await;
        response_body(&response).expect("encode response")
    }
}

/// Assert a body has data and no errors, returning the data
pub fn expect_data(body: &Value) -> &Value {
    assert!(
        body.get("errors").is_none(),
        "unexpected errors: {}",
        body["errors"]
    );
    body.get("data").expect("response has data")
}

/// The `extensions.code` of the first error
pub fn first_error_code(body: &Value) -> &str {
    body["errors"][0]["extensions"]["code"]
        .as_str()
        .expect("error has a code")
}

/// POST a raw body and return the status with the decoded JSON response
pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: Option<&str>,
    body: String,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }

    let response = app
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// POST a JSON value
pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, Some("application/json"), body.to_string()).await
}

/// GET a path and return the status with the raw body
pub async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

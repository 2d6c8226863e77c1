//! Shared helpers for integration tests.
//!
//! Every app runs against its own in-memory SQLite database with the
//! in-process cache, so tests need neither Postgres nor Redis.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{Duration, NaiveDate, Utc};
use serde_json::Value;
use tower::ServiceExt;

use travel_planner::api::{create_router, AppState};
use travel_planner::config::Config;
use travel_planner::infra::{Cache, Database, TextGenerator};

pub const JWT_SECRET: &str = "integration-test-secret-with-32-chars!";

pub fn test_config() -> Config {
    Config::for_database("sqlite::memory:", JWT_SECRET)
}

/// Fresh migrated in-memory database
pub async fn database(config: &Config) -> Arc<Database> {
    Arc::new(
        Database::connect(config)
            .await
            .expect("in-memory database should migrate"),
    )
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub database: Arc<Database>,
}

/// App with template-only generation
pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config(), None).await
}

pub async fn spawn_app_with(config: Config, llm: Option<Arc<dyn TextGenerator>>) -> TestApp {
    let database = database(&config).await;
    let cache = Cache::memory(
        config.generation_cache_max_entries,
        config.generation_cache_ttl_secs,
    );
    let state = AppState::from_config(database.clone(), cache, config, llm);

    TestApp {
        router: create_router(state.clone()),
        state,
        database,
    }
}

impl TestApp {
    /// Send a request and decode the body as JSON (or a JSON string for text bodies).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        send(&self.router, request).await
    }

    /// Register an account and return its bearer token.
    pub async fn register(&self, email: &str, name: &str) -> String {
        let (status, body) = self
            .send(json_request(
                Method::POST,
                "/api/register",
                serde_json::json!({"email": email, "password": "secret123", "name": name}),
                None,
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body["data"]["token"]
            .as_str()
            .expect("token in register response")
            .to_string()
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

pub fn json_request(method: Method, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub fn request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("valid request")
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    request(Method::GET, uri, token)
}

/// A date `days` from today, so "not in the past" checks pass.
pub fn days_from_now(days: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days)
}

//! Common test utilities for integration tests
//!
//! - Configuration without touching the process environment
//! - Router construction over a lazy (never connected) or real pool
//! - Request helpers returning `(status, json)`
//! - JWT token generation

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use taskboard_api::{
    app::{build_router, AppState},
    config::Config,
};
use taskboard_shared::auth::jwt::{create_token, Claims};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Nothing listens here; queries against the lazy pool fail fast
const UNREACHABLE_DATABASE: &str = "postgresql://taskboard@127.0.0.1:1/taskboard";

pub fn test_config(database_url: &str) -> Config {
    let database_url = database_url.to_string();
    Config::from_lookup(move |key| match key {
        "DATABASE_URL" => Some(database_url.clone()),
        "JWT_SECRET" => Some(TEST_SECRET.to_string()),
        _ => None,
    })
    .expect("test configuration is valid")
}

/// Router whose pool never connects
///
/// Enough for everything that is decided before the first query.
pub fn app_without_database() -> Router {
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(500))
        .connect_lazy(UNREACHABLE_DATABASE)
        .expect("lazy pool accepts the URL");

    build_router(AppState::new(pool, test_config(UNREACHABLE_DATABASE)))
}

/// Router over the database named by `DATABASE_URL`, migrated
pub async fn app_with_database() -> anyhow::Result<(Router, PgPool)> {
    let database_url = std::env::var("DATABASE_URL")?;
    let pool = PgPool::connect(&database_url).await?;

    // Path relative to Cargo.toml, not this file
    sqlx::migrate!("../migrations").run(&pool).await?;

    let app = build_router(AppState::new(pool.clone(), test_config(&database_url)));
    Ok((app, pool))
}

pub fn token_for(user_id: Uuid) -> String {
    create_token(&Claims::new(user_id, chrono::Duration::hours(1)), TEST_SECRET)
        .expect("token is created")
}

pub fn unique_email() -> String {
    format!("test-{}@example.com", Uuid::new_v4())
}

/// Sends one request and decodes the body as JSON (`Value::Null` if empty or not JSON)
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use qrkot_api::auth::jwt::{generate_access_token, JwtConfig};
use qrkot_api::auth::password::hash_password;
use qrkot_api::config::ServerConfig;
use qrkot_api::router::build_app_router;
use qrkot_api::state::AppState;
use qrkot_db::models::user::{CreateUser, User};
use qrkot_db::repositories::UserRepo;

pub const TEST_PASSWORD: &str = "cat-lover-42";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: String::new(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
        first_superuser: None,
    }
}

/// Build the full application router, with the production middleware stack,
/// over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Users and tokens
// ---------------------------------------------------------------------------

/// Insert a user with [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool, email: &str, is_superuser: bool) -> User {
    let input = CreateUser {
        email: email.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        is_superuser,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Bearer token for an existing user.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &test_config().jwt).expect("token generation should succeed")
}

/// Create a regular user and return `(user, token)`.
pub async fn user_with_token(pool: &PgPool, email: &str) -> (User, String) {
    let user = create_user(pool, email, false).await;
    let token = token_for(&user);
    (user, token)
}

/// Create a superuser and return its token.
pub async fn superuser_token(pool: &PgPool) -> String {
    let admin = create_user(pool, "admin@qrkot.test", true).await;
    token_for(&admin)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// Assert the status and return the parsed body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

/// Create a charity project through the API as a superuser.
pub async fn create_project(
    pool: &PgPool,
    admin_token: &str,
    name: &str,
    full_amount: i64,
) -> serde_json::Value {
    let body = serde_json::json!({
        "name": name,
        "description": format!("{name} description"),
        "full_amount": full_amount,
    });
    let response =
        post_json_auth(build_test_app(pool.clone()), "/api/v1/charity-projects", admin_token, body)
            .await;
    expect_json(response, StatusCode::CREATED).await
}

/// Create a donation through the API as the token's owner.
pub async fn create_donation(pool: &PgPool, token: &str, full_amount: i64) -> serde_json::Value {
    let body = serde_json::json!({ "full_amount": full_amount });
    let response =
        post_json_auth(build_test_app(pool.clone()), "/api/v1/donations", token, body).await;
    expect_json(response, StatusCode::CREATED).await
}

/// Push a row's `create_date` so ordering does not depend on insert timing.
pub async fn set_create_date(pool: &PgPool, table: &str, id: i64, ts: &str) {
    sqlx::query(&format!(
        "UPDATE {table} SET create_date = $2::TIMESTAMPTZ WHERE id = $1"
    ))
    .bind(id)
    .bind(ts)
    .execute(pool)
    .await
    .unwrap();
}

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use bmc_api::auth::jwt::{generate_access_token, JwtConfig};
use bmc_api::auth::password::hash_password;
use bmc_api::config::ServerConfig;
use bmc_api::router::build_app_router;
use bmc_api::state::AppState;
use bmc_core::account::{ROLE_ADMIN, ROLE_USER};
use bmc_db::models::user::{CreateUser, User};
use bmc_db::repositories::UserRepo;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Password used for every user created through [`create_user`].
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        public_base_url: "http://canvas.test".to_string(),
        expose_verification_code: true,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router, with the production middleware stack,
/// over the given database pool.
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

/// Insert a verified user directly and return it.
pub async fn create_user(pool: &PgPool, email: &str, role: &str) -> User {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            name: None,
            password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
            role: role.to_string(),
            verification_code: None,
        },
    )
    .await
    .expect("user creation should succeed");
    UserRepo::mark_email_verified(pool, user.id)
        .await
        .expect("verification should succeed");
    user
}

/// Mint an access token for a user without going through login.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &user.role, &test_config().jwt)
        .expect("token generation should succeed")
}

/// Create a regular verified user and return it with an access token.
pub async fn user_with_token(pool: &PgPool, email: &str) -> (User, String) {
    let user = create_user(pool, email, ROLE_USER).await;
    let token = token_for(&user);
    (user, token)
}

/// Create an admin and return an access token.
pub async fn admin_token(pool: &PgPool) -> String {
    let admin = create_user(pool, "admin@example.com", ROLE_ADMIN).await;
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
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A complete save body with every field set to `value`.
pub fn canvas_body(value: &str) -> serde_json::Value {
    serde_json::json!({
        "key_partners": value,
        "key_activities": value,
        "value_propositions": value,
        "customer_relationships": value,
        "customer_segments": value,
        "key_resources": value,
        "channels": value,
        "cost_structure": value,
        "revenue_streams": value,
    })
}

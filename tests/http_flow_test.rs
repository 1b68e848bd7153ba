//! End-to-end HTTP session flow
//!
//! Drives the real router through register → login → me → refresh → logout
//! with a wiremock stand-in for the media service. Needs Postgres; skips
//! when `DATABASE_URL` is not set.

use axum::http::StatusCode;
use axum_test::TestServer;
use clipstream::server::config::{AuthConfig, MediaConfig};
use clipstream::server::state::AppState;
use sqlx::PgPool;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPool::connect(&url).await.ok()?;
    sqlx::migrate!("./migrations").run(&pool).await.ok()?;
    Some(pool)
}

async fn media_mock() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "url": "https://media.example/uploaded.png"
        })))
        .mount(&server)
        .await;
    server
}

fn server_with(pool: PgPool, media_uri: &str) -> TestServer {
    let auth = AuthConfig {
        access_token_secret: "access-test-secret".to_string(),
        access_token_ttl_secs: 900,
        refresh_token_secret: "refresh-test-secret".to_string(),
        refresh_token_ttl_secs: 864_000,
        hash_cost: 4,
    };
    let media = MediaConfig {
        upload_url: format!("{media_uri}/upload"),
        api_key: String::new(),
        temp_dir: std::env::temp_dir().join("clipstream-flow-test"),
    };
    let state = AppState::new(pool, auth, &media);
    TestServer::new(clipstream::routes::create_router(state)).unwrap()
}

const BOUNDARY: &str = "clipstreamflowboundary";

fn register_body(username: &str, email: &str, with_avatar: bool) -> Vec<u8> {
    let mut body = String::new();
    for (name, value) in [
        ("fullName", "A L"),
        ("email", email),
        ("username", username),
        ("password", "password123"),
    ] {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    if with_avatar {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"avatar\"; \
             filename=\"avatar.png\"\r\nContent-Type: image/png\r\n\r\npng-bytes\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body.into_bytes()
}

fn unique_identity(tag: &str) -> (String, String) {
    let suffix = Uuid::new_v4().simple().to_string();
    (
        format!("{tag}_{suffix}"),
        format!("{tag}_{suffix}@example.com"),
    )
}

#[tokio::test]
async fn test_full_session_lifecycle() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let media = media_mock().await;
    let server = server_with(pool, &media.uri());
    let (username, email) = unique_identity("flow");

    // Register (avatar present, no cover image)
    let response = server
        .post("/api/v1/users/register")
        .add_header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .bytes(register_body(&username, &email, true).into())
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["username"], username);
    // Optional cover image falls back to empty
    assert_eq!(body["data"]["coverImageUrl"], "");
    // Sanitized projection: no secrets in the response
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("passwordHash").is_none());
    assert!(body["data"].get("refreshToken").is_none());

    // Login by username
    let response = server
        .post("/api/v1/users/login")
        .json(&serde_json::json!({"username": username, "password": "password123"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    let access_token = body["data"]["accessToken"].as_str().unwrap().to_string();
    let refresh_token = body["data"]["refreshToken"].as_str().unwrap().to_string();

    let cookies: Vec<String> = response
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert!(cookies.iter().any(|c| c.starts_with("accessToken=")));
    assert!(cookies.iter().any(|c| c.starts_with("refreshToken=")));
    assert!(cookies.iter().all(|c| c.contains("HttpOnly")));

    // Authenticated lookup via bearer header
    let response = server
        .get("/api/v1/users/me")
        .add_header("authorization", format!("Bearer {access_token}"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["email"], email);

    // Rotate the pair
    let response = server
        .post("/api/v1/users/refresh-token")
        .json(&serde_json::json!({"refreshToken": refresh_token}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    let rotated_refresh = body["data"]["refreshToken"].as_str().unwrap().to_string();
    assert_ne!(rotated_refresh, refresh_token);

    // The pre-rotation token is now stale
    let response = server
        .post("/api/v1/users/refresh-token")
        .json(&serde_json::json!({"refreshToken": refresh_token}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Refresh token is expired or used");

    // Logout clears the stored token
    let response = server
        .post("/api/v1/users/logout")
        .add_header("authorization", format!("Bearer {access_token}"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    // Even the freshly rotated token is dead after logout
    let response = server
        .post("/api/v1/users/refresh-token")
        .json(&serde_json::json!({"refreshToken": rotated_refresh}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_without_avatar_rejected() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let media = media_mock().await;
    let server = server_with(pool, &media.uri());
    let (username, email) = unique_identity("noavatar");

    let response = server
        .post("/api/v1/users/register")
        .add_header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .bytes(register_body(&username, &email, false).into())
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Avatar file is required");
}

#[tokio::test]
async fn test_register_fails_when_avatar_upload_fails() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };

    // Media service down: every upload 500s
    let media = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&media)
        .await;

    let server = server_with(pool.clone(), &media.uri());
    let (username, email) = unique_identity("upfail");

    let response = server
        .post("/api/v1/users/register")
        .add_header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .bytes(register_body(&username, &email, true).into())
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);

    // The whole operation failed: no account was created
    let account = clipstream::auth::accounts::find_by_identity(&pool, &username)
        .await
        .unwrap();
    assert!(account.is_none());
}

#[tokio::test]
async fn test_login_wrong_password_leaves_token_unchanged() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let media = media_mock().await;
    let server = server_with(pool.clone(), &media.uri());
    let (username, email) = unique_identity("badpw");

    let response = server
        .post("/api/v1/users/register")
        .add_header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .bytes(register_body(&username, &email, true).into())
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    // Establish a session so there is a stored token to preserve
    let response = server
        .post("/api/v1/users/login")
        .json(&serde_json::json!({"email": email, "password": "password123"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    let stored = body["data"]["refreshToken"].as_str().unwrap().to_string();

    let response = server
        .post("/api/v1/users/login")
        .json(&serde_json::json!({"email": email, "password": "wrong"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let account = clipstream::auth::accounts::find_by_identity(&pool, &username)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(account.refresh_token.as_deref(), Some(stored.as_str()));
}

#[tokio::test]
async fn test_unknown_identity_is_not_found() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let media = media_mock().await;
    let server = server_with(pool, &media.uri());

    let response = server
        .post("/api/v1/users/login")
        .json(&serde_json::json!({"username": "nobody-here", "password": "p1"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

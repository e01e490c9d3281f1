//! Integration tests for registration, login, sessions and API keys.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use fanhub::api::AppState;
use fanhub::api::observability::AuthMethod;
use fanhub::config::Config;
use fanhub::db::repositories::user::unique_violation;
use fanhub::entities::users::UserRole;
use fanhub::models::NewUser;
use futures::future::join_all;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn spawn_app() -> (Router, Arc<AppState>) {
    let db_path =
        std::env::temp_dir().join(format!("fanhub-auth-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;
    config.observability.metrics_enabled = false;
    config.seed.admin_password = "admin123".to_string();

    let state = fanhub::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");

    (fanhub::api::router(state.clone()).await, state)
}

async fn post_json(app: &Router, uri: &str, body: &Value) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn registration(email: &str, username: &str) -> Value {
    json!({
        "email": email,
        "username": username,
        "password": "correct-horse-battery",
        "display_name": "Heisenberg Fan"
    })
}

#[tokio::test]
async fn test_register_hides_hash_and_stores_argon2id() {
    let (app, state) = spawn_app().await;

    let response = post_json(&app, "/api/auth/register", &registration("Walt@Example.com", "walt")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], "walt@example.com");
    assert_eq!(body["data"]["username"], "walt");
    assert_eq!(body["data"]["display_name"], "Heisenberg Fan");
    assert_eq!(body["data"]["role"], "user");

    let raw = body.to_string();
    assert!(!raw.contains("password"));
    assert!(!raw.contains("argon2"));
    assert!(!raw.contains("api_key"));

    let stored = state
        .store()
        .get_user_model_by_email("walt@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(stored.password_hash.starts_with("$argon2id$"));
    assert_ne!(stored.password_hash, "correct-horse-battery");
}

#[tokio::test]
async fn test_register_conflicts() {
    let (app, _) = spawn_app().await;

    let response = post_json(&app, "/api/auth/register", &registration("jesse@example.com", "jesse")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(&app, "/api/auth/register", &registration("JESSE@example.com", "pinkman")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);

    let response = post_json(&app, "/api/auth/register", &registration("other@example.com", "jesse")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The seeded admin's email counts as well.
    let response = post_json(&app, "/api/auth/register", &registration("admin@fanhub.test", "notadmin")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_validation() {
    let (app, _) = spawn_app().await;

    let cases = [
        json!({"email": "nope", "username": "valid_name", "password": "longenough"}),
        json!({"email": "a@b.co", "username": "x", "password": "longenough"}),
        json!({"email": "a@b.co", "username": "valid_name", "password": "short"}),
        json!({"email": "a@b.co", "username": "valid_name"}),
    ];

    for case in cases {
        let response = post_json(&app, "/api/auth/register", &case).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "payload {case}");
    }
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (app, _) = spawn_app().await;

    let response = post_json(&app, "/api/auth/register", &registration("saul@example.com", "saul")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let wrong_password = post_json(
        &app,
        "/api/auth/login",
        &json!({"email": "saul@example.com", "password": "not-the-password"}),
    )
    .await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password = json_body(wrong_password).await;

    let unknown_email = post_json(
        &app,
        "/api/auth/login",
        &json!({"email": "nobody@example.com", "password": "not-the-password"}),
    )
    .await;
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let unknown_email = json_body(unknown_email).await;

    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_returns_token_usable_as_api_key() {
    let (app, _) = spawn_app().await;

    let response = post_json(
        &app,
        "/api/auth/login",
        &json!({"email": "admin@fanhub.test", "password": "admin123"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let token = body["data"]["token"].as_str().unwrap().to_string();
    assert_eq!(token.len(), 64);
    assert_eq!(body["data"]["user"]["role"], "admin");
    assert!(body["data"]["user"].get("password_hash").is_none());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["username"], "admin");
}

#[tokio::test]
async fn test_session_cookie_login_and_logout() {
    let (app, _) = spawn_app().await;

    let response = post_json(
        &app,
        "/api/auth/login",
        &json!({"email": "admin@fanhub.test", "password": "admin123"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let me = |cookie: String| {
        let app = app.clone();
        async move {
            app.oneshot(
                Request::builder()
                    .uri("/api/auth/me")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
        }
    };

    let response = me(cookie.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["email"], "admin@fanhub.test");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .header(header::COOKIE, cookie.clone())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = me(cookie).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_requires_authentication() {
    let (app, _) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Authentication required");
}

#[tokio::test]
async fn test_concurrent_registrations_conflict_instead_of_failing() {
    let (app, _) = spawn_app().await;

    let handles = (0..8).map(|i| {
        let app = app.clone();
        tokio::spawn(async move {
            post_json(
                &app,
                "/api/auth/register",
                &registration("race@example.com", &format!("racer{i}")),
            )
            .await
            .status()
        })
    });

    let statuses: Vec<StatusCode> = join_all(handles)
        .await
        .into_iter()
        .map(Result::unwrap)
        .collect();

    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let conflicts = statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count();
    assert_eq!(created, 1, "statuses {statuses:?}");
    assert_eq!(conflicts, 7, "statuses {statuses:?}");
}

#[tokio::test]
async fn test_duplicate_insert_reports_unique_violation() {
    let (_, state) = spawn_app().await;

    let new_user = || NewUser {
        email: "dup@example.com".to_string(),
        username: "dup".to_string(),
        display_name: "Dup".to_string(),
        password_hash: "irrelevant".to_string(),
        role: UserRole::User,
    };

    state.store().create_user(new_user()).await.unwrap();
    let err = state.store().create_user(new_user()).await.unwrap_err();

    let detail = unique_violation(&err).expect("expected a unique constraint violation");
    assert!(detail.contains("users."), "detail {detail}");
}

#[tokio::test]
async fn test_responses_record_how_the_caller_authenticated() {
    let (app, state) = spawn_app().await;

    let api_key = state
        .store()
        .get_user_model_by_email("admin@fanhub.test")
        .await
        .unwrap()
        .unwrap()
        .api_key;

    let request = |key: Option<&str>| {
        let mut builder = Request::builder()
            .uri("/api/auth/me")
            .header("x-request-id", "ui-1234");
        if let Some(key) = key {
            builder = builder.header("X-Api-Key", key);
        }
        builder.body(Body::empty()).unwrap()
    };

    let response = app.clone().oneshot(request(Some(&api_key))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.extensions().get::<AuthMethod>(),
        Some(&AuthMethod::ApiKey)
    );
    assert_eq!(response.headers()["x-request-id"], "ui-1234");

    let response = app.clone().oneshot(request(None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.extensions().get::<AuthMethod>(),
        Some(&AuthMethod::Anonymous)
    );
}

//! Like counter behaviour under concurrency.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use fanhub::config::Config;
use fanhub::db::Store;
use futures::future::join_all;
use http_body_util::BodyExt;
use tower::ServiceExt;

fn test_config() -> Config {
    let db_path =
        std::env::temp_dir().join(format!("fanhub-quote-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;
    config.observability.metrics_enabled = false;
    config
}

async fn spawn_app() -> (Router, Store, String) {
    let config = test_config();
    let admin_email = config.seed.admin_email.clone();

    let state = fanhub::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");

    let store = state.store().clone();
    let api_key = store
        .get_user_model_by_email(&admin_email)
        .await
        .unwrap()
        .expect("Seeded admin user missing")
        .api_key;

    (fanhub::api::router(state).await, store, api_key)
}

#[tokio::test]
async fn test_concurrent_store_likes_are_not_lost() {
    let (_, store, _) = spawn_app().await;
    const LIKES: usize = 50;

    let results = join_all((0..LIKES).map(|_| {
        let store = store.clone();
        async move { store.like_quote(1).await }
    }))
    .await;

    assert!(results.iter().all(|r| matches!(r, Ok(Some(_)))));

    let quote = store.get_quote(1).await.unwrap().unwrap();
    assert_eq!(quote.likes, i32::try_from(LIKES).unwrap());
}

#[tokio::test]
async fn test_concurrent_api_likes_are_not_lost() {
    let (app, store, api_key) = spawn_app().await;
    const LIKES: usize = 20;

    let handles = (0..LIKES).map(|_| {
        let app = app.clone();
        let api_key = api_key.clone();
        tokio::spawn(async move {
            app.oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/quotes/2/like")
                    .header("X-Api-Key", api_key)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
            .status()
        })
    });

    for status in join_all(handles).await {
        assert_eq!(status.unwrap(), StatusCode::OK);
    }

    let quote = store.get_quote(2).await.unwrap().unwrap();
    assert_eq!(quote.likes, i32::try_from(LIKES).unwrap());

    // Other quotes are untouched.
    let other = store.get_quote(1).await.unwrap().unwrap();
    assert_eq!(other.likes, 0);
}

#[tokio::test]
async fn test_like_returns_updated_quote() {
    let (app, _, api_key) = spawn_app().await;

    for expected in 1..=3 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/quotes/3/like")
                    .header("X-Api-Key", &api_key)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["likes"], expected);
        assert_eq!(body["data"]["quote_text"], "Say my name.");
    }
}

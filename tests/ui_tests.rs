//! Renders UI pages against a live API listener.

use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use fanhub::config::Config;
use fanhub::db::Store;
use fanhub::models::ShowInput;
use fanhub::ui::FanHubClient;
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn spawn_api() -> (String, Store) {
    let db_path =
        std::env::temp_dir().join(format!("fanhub-ui-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;
    config.observability.metrics_enabled = false;

    let state = fanhub::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let store = state.store().clone();
    let app = fanhub::api::router(state).await;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), store)
}

async fn spawn_ui() -> (Router, Store) {
    let (api_url, store) = spawn_api().await;
    let client = FanHubClient::new(&api_url, Duration::from_secs(5)).unwrap();
    (fanhub::ui::router(client), store)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_index_lists_shows() {
    let (app, _) = spawn_ui().await;

    let (status, html) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Breaking Bad"));
    assert!(html.contains("href=\"/shows/1\""));
}

#[tokio::test]
async fn test_show_and_season_pages() {
    let (app, _) = spawn_ui().await;

    let (status, html) = get(&app, "/shows/1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Breaking Bad"));
    assert!(html.contains("Season 1"));
    assert!(html.contains("Walter White"));

    let (status, html) = get(&app, "/seasons/1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Pilot"));
    assert!(html.contains("Cat&#x27;s in the Bag") || html.contains("Cat's in the Bag"));
}

#[tokio::test]
async fn test_character_search_and_quotes() {
    let (app, _) = spawn_ui().await;

    let (status, html) = get(&app, "/characters?search=white").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Walter White"));
    assert!(!html.contains("Saul Goodman"));

    let (status, html) = get(&app, "/quotes?famous=true").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Say my name."));
    assert!(!html.contains("Yeah, Mr. White!"));
}

#[tokio::test]
async fn test_missing_pages_return_404() {
    let (app, _) = spawn_ui().await;

    for uri in [
        "/shows/999",
        "/seasons/999",
        "/shows/abc",
        "/shows/0",
        "/seasons/-3",
        "/nope",
    ] {
        let (status, html) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "uri {uri}");
        assert!(html.contains("404"));
        assert!(!html.contains("unavailable"), "uri {uri}");
    }
}

#[tokio::test]
async fn test_static_stylesheet() {
    let (app, _) = spawn_ui().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/static/app.css")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/css")
    );

    let (status, _) = get(&app, "/static/missing.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_titles_are_escaped() {
    let (app, store) = spawn_ui().await;

    let show = store
        .create_show(&ShowInput {
            title: "<script>alert(1)</script>".to_string(),
            description: "\"quoted\" & <b>bold</b>".to_string(),
            genre: "Drama".to_string(),
            start_year: 2020,
            end_year: None,
            network: "Test".to_string(),
        })
        .await
        .unwrap();

    let (status, html) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;"));

    let (status, html) = get(&app, &format!("/shows/{}", show.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!html.contains("<b>bold</b>"));
}

#[tokio::test]
async fn test_unreachable_api_renders_502() {
    let client = FanHubClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
    let app = fanhub::ui::router(client);

    let (status, html) = get(&app, "/").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(html.contains("502"));
}

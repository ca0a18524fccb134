#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use genrerows_api::auth::jwt::{generate_access_token, JwtConfig};
use genrerows_api::config::ServerConfig;
use genrerows_api::router::build_app_router;
use genrerows_api::state::AppState;
use genrerows_core::catalog::{CatalogUser, ItemSummary};
use genrerows_core::config::PluginConfiguration;
use genrerows_core::memory::InMemoryCatalog;
use genrerows_core::types::ItemKind;
use genrerows_registry::RegistrationMode;

/// The one user the fixture catalog knows.
pub const VIEWER_ID: Uuid = uuid::uuid!("6f1d2c3b-4a59-4e8f-9a0b-1c2d3e4f5a6b");

/// Host session token the fixture catalog accepts for [`VIEWER_ID`].
pub const VIEWER_SESSION: &str = "0123456789abcdef0123456789abcdef";

/// Origin the test service claims to be reachable at.
pub const PUBLIC_URL: &str = "http://genrerows.test:8097";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        public_url: PUBLIC_URL.to_string(),
        cors_origins: vec!["http://localhost:8096".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
        plugin_config_path: PathBuf::from("unused.json"),
        host_url: "http://127.0.0.1:9".to_string(),
        host_api_key: None,
        catalog_file: None,
        registration_mode: RegistrationMode::Disabled,
        registration_delay: Duration::from_secs(5),
    }
}

pub fn item(name: &str, kind: ItemKind, genres: &[&str]) -> ItemSummary {
    ItemSummary {
        id: Uuid::new_v4(),
        name: name.to_string(),
        sort_name: None,
        kind,
        genres: genres.iter().map(|g| g.to_string()).collect(),
        overview: None,
        release_date: None,
        image_refs: Default::default(),
    }
}

/// Three horror movies, one horror series, a comedy movie and a drama series.
pub fn fixture_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(
        vec![CatalogUser {
            id: VIEWER_ID,
            name: "viewer".to_string(),
        }],
        vec![
            item("The Ring", ItemKind::Movie, &["Horror", "Thriller"]),
            item("Alien", ItemKind::Movie, &["Horror", "Science Fiction"]),
            item("Halloween", ItemKind::Movie, &["Horror"]),
            item("Haunting of Hill House", ItemKind::Series, &["Horror", "Drama"]),
            item("Airplane!", ItemKind::Movie, &["Comedy"]),
            item("The Wire", ItemKind::Series, &["Drama"]),
        ],
    )
    .with_session(VIEWER_SESSION, VIEWER_ID)
}

/// Application state over the fixture catalog and `plugin`.
pub fn test_state(plugin: PluginConfiguration) -> AppState {
    AppState::new(test_config(), plugin, Arc::new(fixture_catalog()))
}

/// Build the full application router with all middleware layers.
pub fn build_test_app(plugin: PluginConfiguration) -> Router {
    app_for_state(test_state(plugin))
}

pub fn app_for_state(state: AppState) -> Router {
    build_app_router(state, &test_config())
}

/// A valid bearer token for [`VIEWER_ID`].
pub fn viewer_token() -> String {
    generate_access_token(VIEWER_ID, &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// GET with one extra header, e.g. a host session header.
pub async fn get_with_header(app: Router, uri: &str, name: &str, value: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(name, value)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST a JSON body with one extra header, e.g. a host session header.
pub async fn post_json_with_header(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    name: &str,
    value: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .header(name, value)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

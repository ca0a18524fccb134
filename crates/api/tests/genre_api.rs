//! Integration tests for the genre browsing API used by the client script.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, get, get_auth, get_with_header, viewer_token, VIEWER_ID, VIEWER_SESSION,
};
use genrerows_core::config::{GenrePriority, PluginConfiguration};

fn horror_movies_config() -> PluginConfiguration {
    PluginConfiguration {
        items_per_section: 2,
        show_only_movies: true,
        ..PluginConfiguration::default()
    }
}

// ---------------------------------------------------------------------------
// Test: Horror section pages movies alphabetically with the full match count
// ---------------------------------------------------------------------------

#[tokio::test]
async fn horror_section_returns_first_page_of_movies() {
    let app = common::build_test_app(horror_movies_config());
    let uri = format!("/api/genremanager/section/Horror?userId={VIEWER_ID}");

    let response = get_auth(app, &uri, &viewer_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let items = json["Items"].as_array().expect("Items should be an array");
    assert_eq!(items.len(), 2);
    assert_eq!(json["TotalRecordCount"], 3);
    assert_eq!(json["StartIndex"], 0);
    assert_eq!(items[0]["Name"], "Alien");
    assert_eq!(items[1]["Name"], "Halloween");
    for item in items {
        assert_eq!(item["Type"], "Movie");
        assert!(item["Genres"]
            .as_array()
            .unwrap()
            .iter()
            .any(|g| g == "Horror"));
    }
}

// ---------------------------------------------------------------------------
// Test: startIndex and limit page through the section
// ---------------------------------------------------------------------------

#[tokio::test]
async fn section_honors_start_index_and_limit() {
    let app = common::build_test_app(PluginConfiguration::default());
    let uri = format!("/api/genremanager/section/Horror?userId={VIEWER_ID}&startIndex=1&limit=2");

    let response = get_auth(app, &uri, &viewer_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["StartIndex"], 1);
    assert_eq!(json["TotalRecordCount"], 4);
    let names: Vec<_> = json["Items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["Name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Halloween", "Haunting of Hill House"]);
}

// ---------------------------------------------------------------------------
// Test: percent-encoded genre names resolve
// ---------------------------------------------------------------------------

#[tokio::test]
async fn section_decodes_genre_path_segment() {
    let app = common::build_test_app(PluginConfiguration::default());
    let uri = format!("/api/genremanager/section/Science%20Fiction?userId={VIEWER_ID}");

    let json = body_json(get_auth(app, &uri, &viewer_token()).await).await;

    assert_eq!(json["TotalRecordCount"], 1);
    assert_eq!(json["Items"][0]["Name"], "Alien");
}

// ---------------------------------------------------------------------------
// Test: a genre with no items is an empty success
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_genre_returns_empty_page() {
    let app = common::build_test_app(PluginConfiguration::default());
    let uri = format!("/api/genremanager/section/Western?userId={VIEWER_ID}");

    let response = get_auth(app, &uri, &viewer_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["Items"].as_array().unwrap().len(), 0);
    assert_eq!(json["TotalRecordCount"], 0);
}

// ---------------------------------------------------------------------------
// Test: request errors map to 400 / 404 / 401
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_user_id_returns_400() {
    let app = common::build_test_app(PluginConfiguration::default());

    let response = get_auth(app, "/api/genremanager/section/Horror", &viewer_token()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn overlong_genre_returns_400() {
    let app = common::build_test_app(PluginConfiguration::default());
    let genre = "x".repeat(101);
    let uri = format!("/api/genremanager/section/{genre}?userId={VIEWER_ID}");

    let response = get_auth(app, &uri, &viewer_token()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn zero_limit_returns_400() {
    let app = common::build_test_app(PluginConfiguration::default());
    let uri = format!("/api/genremanager/section/Horror?userId={VIEWER_ID}&limit=0");

    let response = get_auth(app, &uri, &viewer_token()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_user_returns_404() {
    let app = common::build_test_app(PluginConfiguration::default());
    let uri = format!(
        "/api/genremanager/section/Horror?userId={}",
        uuid::Uuid::new_v4()
    );

    let response = get_auth(app, &uri, &viewer_token()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn missing_token_returns_401() {
    let app = common::build_test_app(PluginConfiguration::default());
    let uri = format!("/api/genremanager/section/Horror?userId={VIEWER_ID}");

    let response = get(app, &uri).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_token_returns_401() {
    let app = common::build_test_app(PluginConfiguration::default());
    let uri = format!("/api/genremanager/section/Horror?userId={VIEWER_ID}");

    let response = get_auth(app, &uri, "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_user_id_returns_json_400() {
    let app = common::build_test_app(PluginConfiguration::default());

    let response = get_auth(
        app,
        "/api/genremanager/section/Horror?userId=not-a-guid",
        &viewer_token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: the web client's host session header authenticates
// ---------------------------------------------------------------------------

fn web_client_authorization(token: &str) -> String {
    format!(
        r#"MediaBrowser Client="Jellyfin Web", Device="Firefox", DeviceId="TW96aWxsYS81LjA", Version="10.9.11", Token="{token}""#
    )
}

#[tokio::test]
async fn host_session_header_is_accepted() {
    let plugin = PluginConfiguration {
        selected_genres: vec!["Horror".into()],
        ..PluginConfiguration::default()
    };
    let app = common::build_test_app(plugin);
    let uri = format!("/api/genremanager/configuration?userId={VIEWER_ID}");

    let response = get_with_header(
        app,
        &uri,
        "authorization",
        &web_client_authorization(VIEWER_SESSION),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["genres"][0]["genreName"], "Horror");
}

#[tokio::test]
async fn bare_host_token_header_is_accepted() {
    let app = common::build_test_app(PluginConfiguration::default());
    let uri = format!("/api/genremanager/section/Horror?userId={VIEWER_ID}");

    let response = get_with_header(app, &uri, "x-emby-token", VIEWER_SESSION).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_host_session_returns_401() {
    let app = common::build_test_app(PluginConfiguration::default());
    let uri = format!("/api/genremanager/section/Horror?userId={VIEWER_ID}");

    let response = get_with_header(
        app,
        &uri,
        "authorization",
        &web_client_authorization("ffffffffffffffffffffffffffffffff"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Test: GET /genres lists distinct genres alphabetically
// ---------------------------------------------------------------------------

#[tokio::test]
async fn genres_are_distinct_and_sorted() {
    let app = common::build_test_app(PluginConfiguration::default());
    let uri = format!("/api/genremanager/genres?userId={VIEWER_ID}");

    let response = get_auth(app, &uri, &viewer_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json,
        serde_json::json!(["Comedy", "Drama", "Horror", "Science Fiction", "Thriller"])
    );
}

// ---------------------------------------------------------------------------
// Test: GET /configuration orders genres by priority with endpoints
// ---------------------------------------------------------------------------

#[tokio::test]
async fn configuration_orders_by_priority() {
    let plugin = PluginConfiguration {
        selected_genres: vec![
            "Comedy".into(),
            "Science Fiction".into(),
            "Horror".into(),
            "Comedy".into(),
        ],
        items_per_section: 12,
        genre_ordering: vec![
            GenrePriority {
                genre_name: "Horror".into(),
                priority: 1,
            },
            GenrePriority {
                genre_name: "Science Fiction".into(),
                priority: 2,
            },
        ],
        ..PluginConfiguration::default()
    };
    let app = common::build_test_app(plugin);
    let uri = format!("/api/genremanager/configuration?userId={VIEWER_ID}");

    let response = get_auth(app, &uri, &viewer_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["itemsPerSection"], 12);

    let genres = json["genres"].as_array().unwrap();
    let names: Vec<_> = genres.iter().map(|g| g["genreName"].clone()).collect();
    assert_eq!(names, vec!["Horror", "Science Fiction", "Comedy"]);
    assert_eq!(genres[0]["priority"], 1);
    assert!(genres[2]["priority"].is_null());
    assert_eq!(
        genres[1]["apiEndpoint"],
        format!("/api/genremanager/section/Science%20Fiction?userId={VIEWER_ID}&limit=12")
    );
}

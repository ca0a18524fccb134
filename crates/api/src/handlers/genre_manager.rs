//! Handlers for the client-facing plugin endpoints.
//!
//! These serve the web client directly (settings snapshot, presentation
//! script) and answer the host's index page transformation callback. None of
//! them require authentication.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::state::AppState;

/// Presentation script served to the web client.
const GENRE_DISPLAY_JS: &str = include_str!("../../assets/genreDisplay.js");

// ---------------------------------------------------------------------------
// GET /GenreManager/config
// ---------------------------------------------------------------------------

/// Client-visible subset of the plugin configuration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub selected_genres: Vec<String>,
    pub items_per_section: u32,
    pub show_only_movies: bool,
}

pub async fn get_config(State(state): State<AppState>) -> Json<ClientConfig> {
    Json(ClientConfig {
        selected_genres: state.plugin.normalized_genres(),
        items_per_section: state.plugin.items_per_section,
        show_only_movies: state.plugin.show_only_movies,
    })
}

// ---------------------------------------------------------------------------
// GET /GenreManager/script
// ---------------------------------------------------------------------------

pub async fn get_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        GENRE_DISPLAY_JS,
    )
}

// ---------------------------------------------------------------------------
// POST /GenreManager/transform
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformRequest {
    pub contents: String,
    #[serde(default)]
    pub file_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TransformResponse {
    pub contents: String,
}

/// Insert the script tag into a served index page.
///
/// Pages the injector does not apply to come back unchanged.
pub async fn transform(
    State(state): State<AppState>,
    AppJson(input): AppJson<TransformRequest>,
) -> AppResult<Json<TransformResponse>> {
    let contents = state
        .injector
        .transform(input.file_name.as_deref(), &input.contents)
        .into_owned();
    tracing::debug!(
        file_name = ?input.file_name,
        changed = contents.len() != input.contents.len(),
        "Transformed page"
    );
    Ok(Json(TransformResponse { contents }))
}

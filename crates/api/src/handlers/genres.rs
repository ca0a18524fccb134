//! Handlers for the genre browsing API used by the presentation script.

use axum::extract::{Path, State};
use axum::Json;
use genrerows_core::catalog::{GenreQuery, ItemOrdering, ItemPage};
use genrerows_core::row::escape_path_segment;
use genrerows_core::types::UserId;
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::middleware::auth::AuthUser;
use crate::query::{require_user, SectionParams, UserParams};
use crate::state::AppState;

/// Prefix of the per-genre section endpoint.
pub const SECTION_ENDPOINT_PREFIX: &str = "/api/genremanager/section";

// ---------------------------------------------------------------------------
// GET /api/genremanager/genres
// ---------------------------------------------------------------------------

/// Sorted distinct genre names across the user's movies and series.
pub async fn list_genres(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UserParams>,
) -> AppResult<Json<Vec<String>>> {
    let user_id = params.require()?;
    let genres = state.catalog.distinct_genres(user_id).await?;
    tracing::debug!(%user_id, count = genres.len(), "Listed genres");
    Ok(Json(genres))
}

// ---------------------------------------------------------------------------
// GET /api/genremanager/section/{genre_name}
// ---------------------------------------------------------------------------

/// One alphabetical page of items tagged with `genre_name`.
pub async fn get_section(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(genre_name): Path<String>,
    AppQuery(params): AppQuery<SectionParams>,
) -> AppResult<Json<ItemPage>> {
    let user_id = require_user(params.user_id)?;
    let page = state
        .catalog
        .query_genre(&GenreQuery {
            genre_name,
            user_id,
            items_per_section: params.limit.unwrap_or(state.plugin.items_per_section),
            show_only_movies: state.plugin.show_only_movies,
            start_index: params.start_index,
            ordering: ItemOrdering::SortName,
        })
        .await?;
    Ok(Json(page))
}

// ---------------------------------------------------------------------------
// GET /api/genremanager/configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreEntry {
    pub genre_name: String,
    pub priority: Option<i32>,
    pub api_endpoint: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreSections {
    pub genres: Vec<GenreEntry>,
    pub items_per_section: u32,
}

/// Selected genres in display order, each with the URL that loads its row.
pub async fn get_configuration(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UserParams>,
) -> AppResult<Json<GenreSections>> {
    let user_id = params.require()?;
    state.catalog.resolve_user(user_id).await?;

    let items_per_section = state.plugin.items_per_section;
    let genres = state
        .plugin
        .ordered_genres()
        .into_iter()
        .map(|genre| GenreEntry {
            api_endpoint: section_endpoint(&genre.name, user_id, items_per_section),
            genre_name: genre.name,
            priority: genre.priority,
        })
        .collect();

    Ok(Json(GenreSections {
        genres,
        items_per_section,
    }))
}

fn section_endpoint(genre_name: &str, user_id: UserId, limit: u32) -> String {
    format!(
        "{SECTION_ENDPOINT_PREFIX}/{}?userId={user_id}&limit={limit}",
        escape_path_segment(genre_name)
    )
}

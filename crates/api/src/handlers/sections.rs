//! Handlers for section registry callbacks and the in-process registry.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use genrerows_core::catalog::ItemPage;
use genrerows_core::section::{GenreSection, HomeSection, SectionPayload};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /GenreSection/{genre}
// ---------------------------------------------------------------------------

/// Results callback for a row registered over HTTP.
///
/// `AdditionalData` in the body names the genre when present; the path
/// segment is the fallback.
pub async fn genre_section_results(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(genre): Path<String>,
    AppJson(payload): AppJson<SectionPayload>,
) -> AppResult<Json<ItemPage>> {
    let section = GenreSection::new(genre, state.catalog.clone(), state.plugin.clone());
    let page = section.results(&payload).await?;
    Ok(Json(page))
}

// ---------------------------------------------------------------------------
// GET /HomeScreen/Sections
// ---------------------------------------------------------------------------

pub async fn list_sections(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let infos = state.sections.infos().await;
    tracing::debug!(count = infos.len(), "Listed registered sections");
    Json(DataResponse { data: infos })
}

// ---------------------------------------------------------------------------
// POST /HomeScreen/Sections/{section_id}
// ---------------------------------------------------------------------------

pub async fn invoke_section(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(section_id): Path<String>,
    AppJson(payload): AppJson<SectionPayload>,
) -> AppResult<Json<ItemPage>> {
    let page = state.sections.invoke(&section_id, &payload).await?;
    Ok(Json(page))
}

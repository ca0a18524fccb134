//! Route definitions for section registry traffic.
//!
//! ```text
//! POST   /GenreSection/{genre}                 genre_section_results
//! GET    /HomeScreen/Sections                  list_sections
//! POST   /HomeScreen/Sections/{section_id}     invoke_section
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sections;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/GenreSection/{genre}", post(sections::genre_section_results))
        .route("/HomeScreen/Sections", get(sections::list_sections))
        .route(
            "/HomeScreen/Sections/{section_id}",
            post(sections::invoke_section),
        )
}

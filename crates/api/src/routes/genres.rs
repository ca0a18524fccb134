//! Route definitions for genre browsing.
//!
//! Mounted at `/api/genremanager`.
//!
//! ```text
//! GET    /genres                  list_genres
//! GET    /section/{genre_name}    get_section
//! GET    /configuration           get_configuration
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::genres;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/genres", get(genres::list_genres))
        .route("/section/{genre_name}", get(genres::get_section))
        .route("/configuration", get(genres::get_configuration))
}

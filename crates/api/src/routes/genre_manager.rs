//! Route definitions for the client-facing plugin endpoints.
//!
//! Mounted at `/GenreManager`.
//!
//! ```text
//! GET    /config              get_config
//! GET    /script              get_script
//! GET    /genreDisplay.js     get_script
//! POST   /transform           transform
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::genre_manager;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/config", get(genre_manager::get_config))
        .route("/script", get(genre_manager::get_script))
        .route("/genreDisplay.js", get(genre_manager::get_script))
        .route("/transform", post(genre_manager::transform))
}

pub mod genre_manager;
pub mod genres;
pub mod sections;

pub mod genre_manager;
pub mod genres;
pub mod health;
pub mod home_screen;

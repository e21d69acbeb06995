pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod templates;
pub mod tmdb;
pub mod transport;

//! # Plaza API
//!
//! actix-web application for the Plaza backend. Library exports exist so the
//! integration tests can build the same app the binary serves.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState, Repositories};

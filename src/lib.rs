//! Fyyur Library
//!
//! This library exposes modules for integration testing

pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod services;
pub mod state;
pub mod templates;
pub mod test_utils;

use axum::Router;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use state::AppState;

pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        // HTML routes (Maud)
        .merge(handlers::routes())

        // Static assets
        .nest_service("/static", ServeDir::new(static_dir))

        // Middleware
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

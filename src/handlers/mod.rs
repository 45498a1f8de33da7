pub mod artists;
pub mod health;
pub mod home;
pub mod notice;
pub mod shows;
pub mod venues;

use axum::{
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Router,
};

use crate::{state::AppState, templates::error_page};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(health::health_check))

        // Venue endpoints
        .route("/venues", get(venues::list_venues))
        .route("/venues/search", post(venues::search_venues))
        .route("/venues/create", get(venues::create_venue_form).post(venues::create_venue))
        .route("/venues/:id", get(venues::show_venue))
        .route("/venues/:id/edit", get(venues::edit_venue_form).post(venues::edit_venue))
        .route("/venues/:id/delete", get(venues::delete_venue))

        // Artist endpoints
        .route("/artists", get(artists::list_artists))
        .route("/artists/search", post(artists::search_artists))
        .route("/artists/create", get(artists::create_artist_form).post(artists::create_artist))
        .route("/artists/:id", get(artists::show_artist))
        .route("/artists/:id/edit", get(artists::edit_artist_form).post(artists::edit_artist))
        .route("/artists/:id/delete", get(artists::delete_artist))

        // Show endpoints
        .route("/shows", get(shows::list_shows))
        .route("/shows/create", get(shows::create_show_form).post(shows::create_show))

        .fallback(not_found)
}

pub async fn not_found() -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_FOUND,
        Html(error_page(StatusCode::NOT_FOUND, "The page you requested does not exist").into_string()),
    )
}

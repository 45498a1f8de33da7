//! Integration tests for artist routes
//!
//! Covers the artist list, search, detail pages, genre replacement on
//! edit, and cascading deletes.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use fake::{
    faker::{address::en::CityName, phone_number::en::PhoneNumber},
    Fake,
};
use pretty_assertions::assert_eq;
use sea_orm::ConnectionTrait;
use tower::util::ServiceExt;

use fyyur::db::repositories::{ArtistRepository, ShowRepository};
use fyyur::handlers;
use fyyur::state::AppState;
use fyyur::test_utils::*;

/// Helper to create a test router with the HTML routes
fn create_test_router(state: &AppState) -> Router {
    handlers::routes().with_state(state.clone())
}

fn post_form(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

fn location(response: &axum::response::Response) -> String {
    response.headers()["location"].to_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_artist() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let city: String = CityName().fake();
    let phone: String = PhoneNumber().fake();

    let response = app
        .oneshot(post_form(
            "/artists/create",
            &[
                ("name", "Guns N Petals"),
                ("city", &city),
                ("state", "CA"),
                ("address", "12 Market Street"),
                ("phone", &phone),
                ("genres", "Rock n Roll"),
                ("facebook_link", ""),
                ("image_link", "https://images.example.com/petals.jpg"),
                ("seeking_shows", "True"),
                ("seeking_description", "Looking for shows to perform at in the San Francisco Bay Area!"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/artists?notice="));

    let artists = ArtistRepository::new(state.db.clone()).find_all().await.unwrap();
    assert_eq!(artists.len(), 1);
    assert_eq!(artists[0].name, "Guns N Petals");
    assert_eq!(artists[0].city, city);
    assert_eq!(artists[0].phone, phone);
    assert_eq!(artists[0].facebook_link, None);
    assert_eq!(artists[0].seeking_venue, Some(true));
}

#[tokio::test]
async fn test_create_artist_with_unparseable_flag_is_rejected() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(post_form(
            "/artists/create",
            &[
                ("name", "Matt Quevedo"),
                ("city", "New York"),
                ("state", "NY"),
                ("address", "1 Broadway"),
                ("phone", "300-400-5000"),
                ("genres", "Jazz"),
                ("image_link", "https://images.example.com/matt.jpg"),
                ("seeking_shows", "sometimes"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = location(&response);
    assert!(target.contains("seeking_shows"));
    assert!(target.ends_with("level=error"));
    assert!(ArtistRepository::new(state.db.clone())
        .find_all()
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_list_artists() {
    let state = setup_test_app_state().await;
    create_test_artist(&state.db, "Guns N Petals").await;
    create_test_artist(&state.db, "Matt Quevedo").await;

    let app = create_test_router(&state);
    let response = app.oneshot(get("/artists")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Guns N Petals"));
    assert!(body.contains("Matt Quevedo"));
}

#[tokio::test]
async fn test_search_artists() {
    let state = setup_test_app_state().await;
    create_test_artist(&state.db, "Guns N Petals").await;
    create_test_artist(&state.db, "Matt Quevedo").await;
    create_test_artist(&state.db, "The Wild Sax Band").await;

    let repo = ArtistRepository::new(state.db.clone());
    assert_eq!(repo.search("A").await.unwrap().len(), 3);

    let app = create_test_router(&state);
    let response = app
        .oneshot(post_form("/artists/search", &[("search_term", "band")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("The Wild Sax Band"));
    assert!(!body.contains("Guns N Petals"));
    assert!(!body.contains("Matt Quevedo"));
}

#[tokio::test]
async fn test_show_artist_lists_venues_of_their_shows() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    create_test_show(&state.db, venue.id, artist.id, Utc::now() - Duration::days(1)).await;
    create_test_show(&state.db, venue.id, artist.id, Utc::now() - Duration::days(10)).await;

    let detail = fyyur::services::artist_detail(&state.db, artist.id, Utc::now())
        .await
        .unwrap();
    assert_eq!(detail.shows.past_count(), 2);
    assert_eq!(detail.shows.upcoming_count(), 0);
    assert_eq!(detail.shows.past[0].counterpart_id, venue.id);

    let app = create_test_router(&state);
    let response = app
        .oneshot(get(&format!("/artists/{}", artist.id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("0 Upcoming Shows"));
    assert!(body.contains("2 Past Shows"));
    assert!(body.contains("The Musical Hop"));
}

#[tokio::test]
async fn test_show_artist_not_found() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app.oneshot(get("/artists/12")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_artist_replaces_genres() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    assert_eq!(artist.genres.as_slice(), ["Rock n Roll"]);

    let app = create_test_router(&state);
    let response = app
        .oneshot(post_form(
            &format!("/artists/{}/edit", artist.id),
            &[
                ("name", "Guns N Petals"),
                ("genres", "Jazz"),
                ("genres", "Folk"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = location(&response);
    assert!(target.starts_with(&format!("/artists/{}?notice=", artist.id)));
    assert!(target.ends_with("level=success"));

    let updated = ArtistRepository::new(state.db.clone())
        .get(artist.id)
        .await
        .unwrap();
    assert_eq!(updated.genres.as_slice(), ["Jazz", "Folk"]);
}

#[tokio::test]
async fn test_edit_artist_without_checkbox_clears_seeking_flag() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    let app = create_test_router(&state);

    app.clone()
        .oneshot(post_form(
            &format!("/artists/{}/edit", artist.id),
            &[("seeking_shows", "y")],
        ))
        .await
        .unwrap();
    let repo = ArtistRepository::new(state.db.clone());
    assert_eq!(repo.get(artist.id).await.unwrap().seeking_venue, Some(true));

    app.oneshot(post_form(
        &format!("/artists/{}/edit", artist.id),
        &[("name", "Guns N Petals")],
    ))
    .await
    .unwrap();
    assert_eq!(repo.get(artist.id).await.unwrap().seeking_venue, Some(false));
}

#[tokio::test]
async fn test_delete_artist_cascades_to_shows() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let show = create_test_show(&state.db, venue.id, artist.id, Utc::now()).await;

    let app = create_test_router(&state);
    let response = app
        .oneshot(get(&format!("/artists/{}/delete", artist.id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/artists?notice="));

    assert_eq!(
        ShowRepository::new(state.db.clone())
            .find_by_id(show.id)
            .await
            .unwrap(),
        None
    );
    assert_eq!(
        ArtistRepository::new(state.db.clone())
            .find_by_id(artist.id)
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn test_list_artists_degrades_when_store_fails() {
    let state = setup_test_app_state().await;
    state.db.execute_unprepared("DROP TABLE shows").await.unwrap();
    state.db.execute_unprepared("DROP TABLE artists").await.unwrap();
    let app = create_test_router(&state);

    let response = app.oneshot(get("/artists")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains(r#"id="notification-area""#));
    assert!(body.contains("Artists could not be loaded."));
}

#[tokio::test]
async fn test_search_artists_reports_store_failure_without_results() {
    let state = setup_test_app_state().await;
    state.db.execute_unprepared("DROP TABLE shows").await.unwrap();
    state.db.execute_unprepared("DROP TABLE artists").await.unwrap();
    let app = create_test_router(&state);

    let response = app
        .oneshot(post_form("/artists/search", &[("search_term", "band")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("An error occurred while searching for artists"));
    assert!(!body.contains(r#"id="result-count""#));
}

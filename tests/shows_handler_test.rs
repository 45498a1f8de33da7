//! Integration tests for show routes and the landing page

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use sea_orm::ConnectionTrait;
use tower::util::ServiceExt;

use fyyur::db::repositories::ShowRepository;
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
async fn test_create_show() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(post_form(
            "/shows/create",
            &[
                ("artist_id", &artist.id.to_string()),
                ("venue_id", &venue.id.to_string()),
                ("start_time", "2035-06-15 20:00:00"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = location(&response);
    assert!(target.starts_with("/shows?notice="));
    assert!(target.ends_with("level=success"));

    let shows = ShowRepository::new(state.db.clone())
        .find_all_with_parties()
        .await
        .unwrap();
    assert_eq!(shows.len(), 1);
    assert_eq!(shows[0].artist.id, artist.id);
    assert_eq!(shows[0].venue.id, venue.id);
    assert_eq!(
        shows[0].show.start_time.with_timezone(&Utc),
        Utc.with_ymd_and_hms(2035, 6, 15, 20, 0, 0).unwrap()
    );
}

#[tokio::test]
async fn test_create_show_with_unknown_artist_is_rejected() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    create_test_show(&state.db, venue.id, artist.id, Utc::now()).await;

    let repo = ShowRepository::new(state.db.clone());
    let before = repo.count().await.unwrap();

    let app = create_test_router(&state);
    let response = app
        .oneshot(post_form(
            "/shows/create",
            &[
                ("artist_id", "9999"),
                ("venue_id", &venue.id.to_string()),
                ("start_time", "2035-06-15 20:00:00"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).ends_with("level=error"));
    assert_eq!(repo.count().await.unwrap(), before);
}

#[tokio::test]
async fn test_create_show_with_bad_start_time_is_rejected() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(post_form(
            "/shows/create",
            &[
                ("artist_id", &artist.id.to_string()),
                ("venue_id", &venue.id.to_string()),
                ("start_time", "tomorrow night"),
            ],
        ))
        .await
        .unwrap();

    let target = location(&response);
    assert!(target.contains("start_time"));
    assert!(target.ends_with("level=error"));
    assert_eq!(ShowRepository::new(state.db.clone()).count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_list_shows_ordered_by_start_time() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let late = create_test_artist(&state.db, "Late Artist").await;
    let early = create_test_artist(&state.db, "Early Artist").await;
    let middle = create_test_artist(&state.db, "Middle Artist").await;

    let now = Utc::now();
    create_test_show(&state.db, venue.id, late.id, now + Duration::days(20)).await;
    create_test_show(&state.db, venue.id, early.id, now - Duration::days(20)).await;
    create_test_show(&state.db, venue.id, middle.id, now + Duration::hours(2)).await;

    let shows = ShowRepository::new(state.db.clone())
        .find_all_with_parties()
        .await
        .unwrap();
    let names: Vec<_> = shows.iter().map(|s| s.artist.name.as_str()).collect();
    assert_eq!(names, vec!["Early Artist", "Middle Artist", "Late Artist"]);

    let app = create_test_router(&state);
    let response = app.oneshot(get("/shows")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    let early_at = body.find("Early Artist").unwrap();
    let middle_at = body.find("Middle Artist").unwrap();
    let late_at = body.find("Late Artist").unwrap();
    assert!(early_at < middle_at);
    assert!(middle_at < late_at);
}

#[tokio::test]
async fn test_list_shows_degrades_when_store_fails() {
    let state = setup_test_app_state().await;
    state.db.execute_unprepared("DROP TABLE shows").await.unwrap();
    let app = create_test_router(&state);

    let response = app.oneshot(get("/shows")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains(r#"id="notification-area""#));
    assert!(body.contains("Shows could not be loaded."));
}

#[tokio::test]
async fn test_create_show_form_offers_artists_and_venues() {
    let state = setup_test_app_state().await;
    create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    create_test_artist(&state.db, "Guns N Petals").await;
    let app = create_test_router(&state);

    let response = app.oneshot(get("/shows/create")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("The Musical Hop"));
    assert!(body.contains("Guns N Petals"));
}

#[tokio::test]
async fn test_home_shows_ten_latest_of_each() {
    let state = setup_test_app_state().await;
    for i in 1..=12 {
        create_test_artist(&state.db, &format!("Artist {:02}", i)).await;
    }
    create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;

    let app = create_test_router(&state);
    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Artist 12"));
    assert!(body.contains("Artist 03"));
    assert!(!body.contains("Artist 02"));
    assert!(!body.contains("Artist 01"));
    assert!(body.contains("The Musical Hop"));
    assert!(body.find("Artist 12").unwrap() < body.find("Artist 03").unwrap());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app.oneshot(get("/bands")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_string(response).await;
    assert!(body.contains("404: Page not found"));
}

#[tokio::test]
async fn test_health_check() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "ok");
}

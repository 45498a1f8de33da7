//! Test utilities for Fyyur
//!
//! Provides helpers for creating isolated test environments with:
//! - In-memory SQLite databases (one per test)
//! - AppState factories
//! - Test data generators

use chrono::{DateTime, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};

use crate::{
    config::{Config, LogFormat},
    db::{
        entities::{artists, shows, venues},
        types::Genres,
    },
    state::AppState,
};

/// Setup an in-memory SQLite database with all migrations applied
///
/// Each call creates a fresh, isolated database perfect for parallel testing
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    // Run all migrations
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create a test configuration with sensible defaults
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 5000,
        static_dir: "static".to_string(),
        log_format: LogFormat::Pretty,
    }
}

/// Create a complete test AppState with an isolated database
pub async fn setup_test_app_state() -> AppState {
    AppState::new(setup_test_db().await, test_config())
}

fn genres(list: &[&str]) -> Genres {
    Genres::from(list.iter().map(|g| g.to_string()).collect::<Vec<_>>())
}

// ============================================================================
// Test Data Factories
// ============================================================================

/// Create a test venue in the database
pub async fn create_test_venue(
    db: &DatabaseConnection,
    name: &str,
    city: &str,
    state: &str,
) -> venues::Model {
    let venue = venues::ActiveModel {
        name: Set(name.to_string()),
        city: Set(city.to_string()),
        state: Set(state.to_string()),
        address: Set("1015 Folsom Street".to_string()),
        phone: Set("123-123-1234".to_string()),
        genres: Set(genres(&["Jazz", "Reggae"])),
        facebook_link: Set(None),
        image_link: Set("https://images.example.com/venue.jpg".to_string()),
        seeking_artist: Set(Some(false)),
        seeking_description: Set(None),
        ..Default::default()
    };

    venue.insert(db).await.expect("Failed to insert test venue")
}

/// Create a test artist in the database
pub async fn create_test_artist(db: &DatabaseConnection, name: &str) -> artists::Model {
    let artist = artists::ActiveModel {
        name: Set(name.to_string()),
        city: Set("San Francisco".to_string()),
        state: Set("CA".to_string()),
        address: Set("2 Mission Street".to_string()),
        phone: Set("326-123-5000".to_string()),
        genres: Set(genres(&["Rock n Roll"])),
        facebook_link: Set(None),
        image_link: Set("https://images.example.com/artist.jpg".to_string()),
        seeking_venue: Set(Some(false)),
        seeking_description: Set(None),
        ..Default::default()
    };

    artist.insert(db).await.expect("Failed to insert test artist")
}

/// Create a test show in the database
pub async fn create_test_show(
    db: &DatabaseConnection,
    venue_id: i32,
    artist_id: i32,
    start_time: DateTime<Utc>,
) -> shows::Model {
    let show = shows::ActiveModel {
        venue_id: Set(venue_id),
        artist_id: Set(artist_id),
        start_time: Set(start_time.into()),
        ..Default::default()
    };

    show.insert(db).await.expect("Failed to insert test show")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_setup_test_db() {
        let db = setup_test_db().await;
        // Verify we can query the database (it has tables from migrations)
        use sea_orm::EntityTrait;
        let venues = venues::Entity::find().all(&db).await.unwrap();
        assert_eq!(venues.len(), 0);
    }

    #[tokio::test]
    async fn test_create_test_show() {
        let db = setup_test_db().await;
        let venue = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let artist = create_test_artist(&db, "Guns N Petals").await;
        let show = create_test_show(&db, venue.id, artist.id, Utc::now() + Duration::days(1)).await;

        assert_eq!(show.venue_id, venue.id);
        assert_eq!(show.artist_id, artist.id);
    }

    #[tokio::test]
    async fn test_parallel_databases() {
        // Run two database setups in parallel - they should not interfere
        let (db1, db2) = tokio::join!(setup_test_db(), setup_test_db());

        let venue1 = create_test_venue(&db1, "Venue 1", "Austin", "TX").await;
        let venue2 = create_test_venue(&db2, "Venue 2", "Austin", "TX").await;

        // Both should be ID 1 (separate databases)
        assert_eq!(venue1.id, 1);
        assert_eq!(venue2.id, 1);
    }
}

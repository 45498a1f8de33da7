//! Store access for venues, artists and shows.
//!
//! Every mutation runs inside its own transaction: committed on success,
//! rolled back when the transaction is dropped on any error path.

use sea_orm::{
    sea_query::{Expr, Func, LikeExpr, SimpleExpr},
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait,
    LoaderTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::db::entities::{artists, shows, venues};
use crate::error::{AppError, Result};
use crate::forms::ProfileEdit;

/// `LOWER(column) LIKE '%term%'` with LIKE metacharacters in `term` escaped.
fn name_contains<E: EntityTrait>(
    backend: DbBackend,
    entity: E,
    column: E::Column,
    term: &str,
) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col((entity, column))))
        .like(LikeExpr::new(like_pattern(backend, term)).escape('\\'))
}

/// Folds `term` the way the backend's `LOWER()` folds the column.
/// SQLite only lowercases ASCII, so non-ASCII letters must stay as typed.
fn like_pattern(backend: DbBackend, term: &str) -> String {
    let folded = match backend {
        DbBackend::Sqlite => term.to_ascii_lowercase(),
        _ => term.to_lowercase(),
    };
    // An all-blank term means "no filter"; otherwise spaces are significant.
    let folded = if folded.trim().is_empty() { String::new() } else { folded };

    let mut pattern = String::with_capacity(folded.len() + 2);
    pattern.push('%');
    for c in folded.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub struct VenueRepository {
    db: DatabaseConnection,
}

impl VenueRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<venues::Model>> {
        Ok(venues::Entity::find()
            .order_by_asc(venues::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<venues::Model>> {
        Ok(venues::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn get(&self, id: i32) -> Result<venues::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))
    }

    /// Most recently created first.
    pub async fn find_latest(&self, limit: u64) -> Result<Vec<venues::Model>> {
        Ok(venues::Entity::find()
            .order_by_desc(venues::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?)
    }

    pub async fn search(&self, term: &str) -> Result<Vec<venues::Model>> {
        Ok(venues::Entity::find()
            .filter(name_contains(
                self.db.get_database_backend(),
                venues::Entity,
                venues::Column::Name,
                term,
            ))
            .order_by_asc(venues::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Shows booked at the venue, each with its artist.
    pub async fn find_shows(&self, venue_id: i32) -> Result<Vec<(shows::Model, Option<artists::Model>)>> {
        Ok(shows::Entity::find()
            .filter(shows::Column::VenueId.eq(venue_id))
            .order_by_asc(shows::Column::StartTime)
            .find_also_related(artists::Entity)
            .all(&self.db)
            .await?)
    }

    pub async fn create(&self, venue: venues::ActiveModel) -> Result<venues::Model> {
        let txn = self.db.begin().await?;
        let created = venue.insert(&txn).await?;
        txn.commit().await?;
        Ok(created)
    }

    pub async fn update(&self, id: i32, edit: ProfileEdit) -> Result<venues::Model> {
        let txn = self.db.begin().await?;

        let existing = venues::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))?;

        let mut active: venues::ActiveModel = existing.into();
        edit.apply_to_venue(&mut active);
        let updated = active.update(&txn).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Deletes the venue and every show booked at it.
    pub async fn delete(&self, id: i32) -> Result<venues::Model> {
        let txn = self.db.begin().await?;

        let existing = venues::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))?;

        shows::Entity::delete_many()
            .filter(shows::Column::VenueId.eq(id))
            .exec(&txn)
            .await?;
        existing.clone().delete(&txn).await?;

        txn.commit().await?;
        Ok(existing)
    }
}

pub struct ArtistRepository {
    db: DatabaseConnection,
}

impl ArtistRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<artists::Model>> {
        Ok(artists::Entity::find()
            .order_by_asc(artists::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<artists::Model>> {
        Ok(artists::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn get(&self, id: i32) -> Result<artists::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))
    }

    pub async fn find_latest(&self, limit: u64) -> Result<Vec<artists::Model>> {
        Ok(artists::Entity::find()
            .order_by_desc(artists::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?)
    }

    pub async fn search(&self, term: &str) -> Result<Vec<artists::Model>> {
        Ok(artists::Entity::find()
            .filter(name_contains(
                self.db.get_database_backend(),
                artists::Entity,
                artists::Column::Name,
                term,
            ))
            .order_by_asc(artists::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Shows the artist is booked for, each with its venue.
    pub async fn find_shows(&self, artist_id: i32) -> Result<Vec<(shows::Model, Option<venues::Model>)>> {
        Ok(shows::Entity::find()
            .filter(shows::Column::ArtistId.eq(artist_id))
            .order_by_asc(shows::Column::StartTime)
            .find_also_related(venues::Entity)
            .all(&self.db)
            .await?)
    }

    pub async fn create(&self, artist: artists::ActiveModel) -> Result<artists::Model> {
        let txn = self.db.begin().await?;
        let created = artist.insert(&txn).await?;
        txn.commit().await?;
        Ok(created)
    }

    pub async fn update(&self, id: i32, edit: ProfileEdit) -> Result<artists::Model> {
        let txn = self.db.begin().await?;

        let existing = artists::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))?;

        let mut active: artists::ActiveModel = existing.into();
        edit.apply_to_artist(&mut active);
        let updated = active.update(&txn).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Deletes the artist and every show they are booked for.
    pub async fn delete(&self, id: i32) -> Result<artists::Model> {
        let txn = self.db.begin().await?;

        let existing = artists::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))?;

        shows::Entity::delete_many()
            .filter(shows::Column::ArtistId.eq(id))
            .exec(&txn)
            .await?;
        existing.clone().delete(&txn).await?;

        txn.commit().await?;
        Ok(existing)
    }
}

/// A show together with both of its parents.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowWithParties {
    pub show: shows::Model,
    pub venue: venues::Model,
    pub artist: artists::Model,
}

pub struct ShowRepository {
    db: DatabaseConnection,
}

impl ShowRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<shows::Model>> {
        Ok(shows::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// All shows by ascending start time. Rows whose parents vanished are skipped.
    pub async fn find_all_with_parties(&self) -> Result<Vec<ShowWithParties>> {
        let all_shows = shows::Entity::find()
            .order_by_asc(shows::Column::StartTime)
            .order_by_asc(shows::Column::Id)
            .all(&self.db)
            .await?;

        let show_venues = all_shows.load_one(venues::Entity, &self.db).await?;
        let show_artists = all_shows.load_one(artists::Entity, &self.db).await?;

        Ok(all_shows
            .into_iter()
            .zip(show_venues)
            .zip(show_artists)
            .filter_map(|((show, venue), artist)| {
                Some(ShowWithParties {
                    show,
                    venue: venue?,
                    artist: artist?,
                })
            })
            .collect())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(shows::Entity::find().count(&self.db).await?)
    }

    /// Inserts the show; the store's foreign keys are the only check on its parents.
    pub async fn create(&self, show: shows::ActiveModel) -> Result<shows::Model> {
        let txn = self.db.begin().await?;
        let created = show.insert(&txn).await?;
        txn.commit().await?;
        Ok(created)
    }
}

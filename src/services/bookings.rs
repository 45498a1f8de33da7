//! View-models for the directory pages and the logic that shapes them.

use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::collections::{BTreeMap, HashMap};

use crate::db::entities::{artists, shows, venues};
use crate::db::repositories::{ArtistRepository, ShowRepository, VenueRepository};
use crate::error::Result;

use super::datetime::{format_datetime, DateFormat};

/// One show as seen from its venue or its artist: the other party plus the time.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowSlot {
    pub counterpart_id: i32,
    pub counterpart_name: String,
    pub counterpart_image_link: String,
    pub starts_at: DateTime<Utc>,
    pub start_time: String,
}

impl ShowSlot {
    pub fn new(id: i32, name: String, image_link: String, starts_at: DateTime<Utc>) -> Self {
        Self {
            counterpart_id: id,
            counterpart_name: name,
            counterpart_image_link: image_link,
            start_time: format_datetime(&starts_at, DateFormat::Medium),
            starts_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionedShows {
    pub upcoming: Vec<ShowSlot>,
    pub past: Vec<ShowSlot>,
}

impl PartitionedShows {
    pub fn upcoming_count(&self) -> usize {
        self.upcoming.len()
    }

    pub fn past_count(&self) -> usize {
        self.past.len()
    }
}

/// Upcoming means strictly after `now`. Input order is kept within each bucket.
pub fn partition_shows(slots: Vec<ShowSlot>, now: DateTime<Utc>) -> PartitionedShows {
    let (upcoming, past) = slots.into_iter().partition(|slot| slot.starts_at > now);
    PartitionedShows { upcoming, past }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// Groups venues by `(city, state)`, areas sorted by state then city.
pub fn group_by_area(
    venues: Vec<venues::Model>,
    upcoming_counts: &HashMap<i32, usize>,
) -> Vec<Area> {
    let mut areas: BTreeMap<(String, String), Vec<VenueSummary>> = BTreeMap::new();

    for venue in venues {
        areas
            .entry((venue.state, venue.city))
            .or_default()
            .push(VenueSummary {
                id: venue.id,
                num_upcoming_shows: upcoming_counts.get(&venue.id).copied().unwrap_or(0),
                name: venue.name,
            });
    }

    areas
        .into_iter()
        .map(|((state, city), venues)| Area { city, state, venues })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct VenueDetail {
    pub venue: venues::Model,
    pub shows: PartitionedShows,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtistDetail {
    pub artist: artists::Model,
    pub shows: PartitionedShows,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShowRow {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

pub async fn venue_directory(db: &DatabaseConnection, now: DateTime<Utc>) -> Result<Vec<Area>> {
    let venues = VenueRepository::new(db.clone()).find_all().await?;

    let mut upcoming_counts: HashMap<i32, usize> = HashMap::new();
    let upcoming = shows::Entity::find()
        .filter(shows::Column::StartTime.gt(now))
        .all(db)
        .await?;
    for show in upcoming {
        *upcoming_counts.entry(show.venue_id).or_default() += 1;
    }

    Ok(group_by_area(venues, &upcoming_counts))
}

pub async fn venue_detail(
    db: &DatabaseConnection,
    venue_id: i32,
    now: DateTime<Utc>,
) -> Result<VenueDetail> {
    let repo = VenueRepository::new(db.clone());
    let venue = repo.get(venue_id).await?;

    let slots = repo
        .find_shows(venue_id)
        .await?
        .into_iter()
        .filter_map(|(show, artist)| {
            let artist = artist?;
            Some(ShowSlot::new(
                artist.id,
                artist.name,
                artist.image_link,
                show.start_time.with_timezone(&Utc),
            ))
        })
        .collect();

    Ok(VenueDetail {
        venue,
        shows: partition_shows(slots, now),
    })
}

pub async fn artist_detail(
    db: &DatabaseConnection,
    artist_id: i32,
    now: DateTime<Utc>,
) -> Result<ArtistDetail> {
    let repo = ArtistRepository::new(db.clone());
    let artist = repo.get(artist_id).await?;

    let slots = repo
        .find_shows(artist_id)
        .await?
        .into_iter()
        .filter_map(|(show, venue)| {
            let venue = venue?;
            Some(ShowSlot::new(
                venue.id,
                venue.name,
                venue.image_link,
                show.start_time.with_timezone(&Utc),
            ))
        })
        .collect();

    Ok(ArtistDetail {
        artist,
        shows: partition_shows(slots, now),
    })
}

pub async fn show_listing(db: &DatabaseConnection) -> Result<Vec<ShowRow>> {
    let rows = ShowRepository::new(db.clone()).find_all_with_parties().await?;

    Ok(rows
        .into_iter()
        .map(|row| ShowRow {
            venue_id: row.venue.id,
            venue_name: row.venue.name,
            artist_id: row.artist.id,
            artist_name: row.artist.name,
            artist_image_link: row.artist.image_link,
            start_time: format_datetime(&row.show.start_time.with_timezone(&Utc), DateFormat::Full),
        })
        .collect())
}

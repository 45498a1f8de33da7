use axum::{
    extract::{Query, State},
    response::Html,
};

use crate::{
    db::repositories::{ArtistRepository, VenueRepository},
    error::Result,
    state::AppState,
    templates::home_page,
};

use super::notice::NoticeQuery;

const RECENT_LIMIT: u64 = 10;

/// Landing page with the most recently listed artists and venues
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Html<String>> {
    let artists = ArtistRepository::new(state.db.clone())
        .find_latest(RECENT_LIMIT)
        .await?;
    let venues = VenueRepository::new(state.db.clone())
        .find_latest(RECENT_LIMIT)
        .await?;

    Ok(Html(
        home_page(&artists, &venues, query.into_notice().as_ref()).into_string(),
    ))
}

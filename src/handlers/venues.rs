use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;

use crate::{
    db::repositories::VenueRepository,
    error::{AppError, Result},
    forms::{FormFields, ProfileEdit, ProfileForm, SearchForm, VENUE_SEEKING_FIELD},
    services,
    state::AppState,
    templates::{
        edit_venue_page, new_venue_page, search_page, venue_detail_page, venues_page, SearchHit,
    },
};

use super::notice::{redirect_with, Notice, NoticeQuery};

/// Venue directory grouped by area
pub async fn list_venues(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Html<String> {
    let mut notice = query.into_notice();

    let areas = match services::venue_directory(&state.db, Utc::now()).await {
        Ok(areas) => areas,
        Err(e) => {
            tracing::error!("Failed to load venue directory: {}", e);
            notice = Some(Notice::error(format!("Venues could not be loaded. {}", e.public_message())));
            vec![]
        }
    };

    Html(venues_page(&areas, notice.as_ref()).into_string())
}

/// Case-insensitive substring search on venue names
pub async fn search_venues(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Html<String> {
    let repo = VenueRepository::new(state.db.clone());

    let markup = match repo.search(&form.search_term).await {
        Ok(found) => {
            let hits: Vec<SearchHit> = found
                .into_iter()
                .map(|venue| SearchHit {
                    href: format!("/venues/{}", venue.id),
                    name: venue.name,
                })
                .collect();
            search_page("Search venues", "/venues/search", &form.search_term, Some(&hits), None)
        }
        Err(e) => {
            tracing::error!("Venue search for {:?} failed: {}", form.search_term, e);
            let notice = Notice::error("An error occurred while searching for venues");
            search_page("Search venues", "/venues/search", &form.search_term, None, Some(&notice))
        }
    };

    Html(markup.into_string())
}

/// Venue page with its upcoming and past shows
pub async fn show_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<NoticeQuery>,
) -> Result<Html<String>> {
    let detail = services::venue_detail(&state.db, id, Utc::now()).await?;
    Ok(Html(venue_detail_page(&detail, query.into_notice().as_ref()).into_string()))
}

pub async fn create_venue_form() -> Html<String> {
    Html(new_venue_page().into_string())
}

pub async fn create_venue(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Redirect {
    let fields = FormFields::new(pairs);
    let name = fields.get("name").unwrap_or_default().to_string();

    let result = match ProfileForm::parse(&fields, VENUE_SEEKING_FIELD) {
        Ok(form) => {
            VenueRepository::new(state.db.clone())
                .create(form.into_venue())
                .await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(venue) => {
            tracing::info!(venue_id = venue.id, "Venue {} listed", venue.name);
            redirect_with(
                "/venues",
                Notice::success(format!("Venue {} was successfully listed!", venue.name)),
            )
        }
        Err(e) => {
            tracing::warn!("Venue {} could not be listed: {}", name, e);
            redirect_with(
                "/venues",
                Notice::error(format!(
                    "An error occurred. Venue {} could not be listed. {}",
                    name,
                    e.public_message()
                )),
            )
        }
    }
}

pub async fn edit_venue_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>> {
    let venue = VenueRepository::new(state.db.clone()).get(id).await?;
    Ok(Html(edit_venue_page(&venue).into_string()))
}

pub async fn edit_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let fields = FormFields::new(pairs);
    let detail_path = format!("/venues/{}", id);

    let result = match ProfileEdit::parse(&fields, VENUE_SEEKING_FIELD) {
        Ok(edit) => VenueRepository::new(state.db.clone()).update(id, edit).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(venue) => {
            tracing::info!(venue_id = venue.id, "Venue {} updated", venue.name);
            redirect_with(
                &detail_path,
                Notice::success(format!("Venue {} has been updated", venue.name)),
            )
            .into_response()
        }
        Err(e @ AppError::NotFound(_)) => e.into_response(),
        Err(e) => {
            tracing::warn!("Venue {} could not be updated: {}", id, e);
            redirect_with(
                &detail_path,
                Notice::error(format!(
                    "An error occurred while updating the venue. {}",
                    e.public_message()
                )),
            )
            .into_response()
        }
    }
}

/// Deletes the venue and its shows
pub async fn delete_venue(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    match VenueRepository::new(state.db.clone()).delete(id).await {
        Ok(venue) => {
            tracing::info!(venue_id = venue.id, "Venue {} deleted", venue.name);
            redirect_with(
                "/venues",
                Notice::success(format!("Venue {} has been deleted successfully", venue.name)),
            )
            .into_response()
        }
        Err(e @ AppError::NotFound(_)) => e.into_response(),
        Err(e) => {
            tracing::warn!("Venue {} could not be deleted: {}", id, e);
            redirect_with(
                "/venues",
                Notice::error(format!("Venue could not be deleted. {}", e.public_message())),
            )
            .into_response()
        }
    }
}

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;

use crate::{
    db::repositories::ArtistRepository,
    error::{AppError, Result},
    forms::{FormFields, ProfileEdit, ProfileForm, SearchForm, ARTIST_SEEKING_FIELD},
    services,
    state::AppState,
    templates::{
        artist_detail_page, artists_page, edit_artist_page, new_artist_page, search_page, SearchHit,
    },
};

use super::notice::{redirect_with, Notice, NoticeQuery};

/// Full artist list
pub async fn list_artists(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Html<String> {
    let mut notice = query.into_notice();

    let artists = match ArtistRepository::new(state.db.clone()).find_all().await {
        Ok(artists) => artists,
        Err(e) => {
            tracing::error!("Failed to load artists: {}", e);
            notice = Some(Notice::error(format!("Artists could not be loaded. {}", e.public_message())));
            vec![]
        }
    };

    Html(artists_page(&artists, notice.as_ref()).into_string())
}

/// Case-insensitive substring search on artist names
pub async fn search_artists(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Html<String> {
    let repo = ArtistRepository::new(state.db.clone());

    let markup = match repo.search(&form.search_term).await {
        Ok(found) => {
            let hits: Vec<SearchHit> = found
                .into_iter()
                .map(|artist| SearchHit {
                    href: format!("/artists/{}", artist.id),
                    name: artist.name,
                })
                .collect();
            search_page("Search artists", "/artists/search", &form.search_term, Some(&hits), None)
        }
        Err(e) => {
            tracing::error!("Artist search for {:?} failed: {}", form.search_term, e);
            let notice = Notice::error("An error occurred while searching for artists");
            search_page("Search artists", "/artists/search", &form.search_term, None, Some(&notice))
        }
    };

    Html(markup.into_string())
}

/// Artist page with their upcoming and past shows
pub async fn show_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<NoticeQuery>,
) -> Result<Html<String>> {
    let detail = services::artist_detail(&state.db, id, Utc::now()).await?;
    Ok(Html(artist_detail_page(&detail, query.into_notice().as_ref()).into_string()))
}

pub async fn create_artist_form() -> Html<String> {
    Html(new_artist_page().into_string())
}

pub async fn create_artist(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Redirect {
    let fields = FormFields::new(pairs);
    let name = fields.get("name").unwrap_or_default().to_string();

    let result = match ProfileForm::parse(&fields, ARTIST_SEEKING_FIELD) {
        Ok(form) => {
            ArtistRepository::new(state.db.clone())
                .create(form.into_artist())
                .await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(artist) => {
            tracing::info!(artist_id = artist.id, "Artist {} listed", artist.name);
            redirect_with(
                "/artists",
                Notice::success(format!("Artist {} was successfully listed!", artist.name)),
            )
        }
        Err(e) => {
            tracing::warn!("Artist {} could not be listed: {}", name, e);
            redirect_with(
                "/artists",
                Notice::error(format!(
                    "An error occurred. Artist {} could not be listed. {}",
                    name,
                    e.public_message()
                )),
            )
        }
    }
}

pub async fn edit_artist_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>> {
    let artist = ArtistRepository::new(state.db.clone()).get(id).await?;
    Ok(Html(edit_artist_page(&artist).into_string()))
}

pub async fn edit_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let fields = FormFields::new(pairs);
    let detail_path = format!("/artists/{}", id);

    let result = match ProfileEdit::parse(&fields, ARTIST_SEEKING_FIELD) {
        Ok(edit) => ArtistRepository::new(state.db.clone()).update(id, edit).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(artist) => {
            tracing::info!(artist_id = artist.id, "Artist {} updated", artist.name);
            redirect_with(
                &detail_path,
                Notice::success(format!("Artist {} has been updated", artist.name)),
            )
            .into_response()
        }
        Err(e @ AppError::NotFound(_)) => e.into_response(),
        Err(e) => {
            tracing::warn!("Artist {} could not be updated: {}", id, e);
            redirect_with(
                &detail_path,
                Notice::error(format!(
                    "An error occurred while updating the artist. {}",
                    e.public_message()
                )),
            )
            .into_response()
        }
    }
}

/// Deletes the artist and their shows
pub async fn delete_artist(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    match ArtistRepository::new(state.db.clone()).delete(id).await {
        Ok(artist) => {
            tracing::info!(artist_id = artist.id, "Artist {} deleted", artist.name);
            redirect_with(
                "/artists",
                Notice::success(format!("Artist {} has been deleted successfully", artist.name)),
            )
            .into_response()
        }
        Err(e @ AppError::NotFound(_)) => e.into_response(),
        Err(e) => {
            tracing::warn!("Artist {} could not be deleted: {}", id, e);
            redirect_with(
                "/artists",
                Notice::error(format!("Artist could not be deleted. {}", e.public_message())),
            )
            .into_response()
        }
    }
}

use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form,
};

use crate::{
    db::repositories::{ArtistRepository, ShowRepository, VenueRepository},
    error::Result,
    forms::{FormFields, ShowForm},
    services,
    state::AppState,
    templates::{new_show_page, shows_page},
};

use super::notice::{redirect_with, Notice, NoticeQuery};

/// All shows, earliest first
pub async fn list_shows(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Html<String> {
    let mut notice = query.into_notice();

    let shows = match services::show_listing(&state.db).await {
        Ok(shows) => shows,
        Err(e) => {
            tracing::error!("Failed to load shows: {}", e);
            notice = Some(Notice::error(format!("Shows could not be loaded. {}", e.public_message())));
            vec![]
        }
    };

    Html(shows_page(&shows, notice.as_ref()).into_string())
}

pub async fn create_show_form(State(state): State<AppState>) -> Result<Html<String>> {
    let artists = ArtistRepository::new(state.db.clone()).find_all().await?;
    let venues = VenueRepository::new(state.db.clone()).find_all().await?;

    Ok(Html(new_show_page(&artists, &venues).into_string()))
}

/// Lists a new show. A missing artist or venue is caught by the store's foreign keys.
pub async fn create_show(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Redirect {
    let fields = FormFields::new(pairs);

    let result = match ShowForm::parse(&fields) {
        Ok(form) => {
            ShowRepository::new(state.db.clone())
                .create(form.into_active_model())
                .await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(show) => {
            tracing::info!(
                show_id = show.id,
                artist_id = show.artist_id,
                venue_id = show.venue_id,
                "Show listed"
            );
            redirect_with("/shows", Notice::success("Show was successfully listed!"))
        }
        Err(e) => {
            tracing::warn!("Show could not be listed: {}", e);
            redirect_with(
                "/shows",
                Notice::error(format!(
                    "An error occurred. Show could not be listed. {}",
                    e.public_message()
                )),
            )
        }
    }
}

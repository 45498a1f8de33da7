use axum::http::StatusCode;
use maud::{html, Markup};

use super::components::{
    genre_tags, listing_card, profile_form, search_box, show_form, show_sections,
    ProfileFormData,
};
use super::layout::base_layout;
use crate::db::entities::{artists, venues};
use crate::forms::{ARTIST_SEEKING_FIELD, VENUE_SEEKING_FIELD};
use crate::handlers::notice::Notice;
use crate::services::{Area, ArtistDetail, ShowRow, VenueDetail};

pub fn home_page(
    artists: &[artists::Model],
    venues: &[venues::Model],
    notice: Option<&Notice>,
) -> Markup {
    base_layout(
        "Home",
        notice,
        html! {
            div class="grid grid-cols-1 md:grid-cols-2 gap-8" {
                section {
                    h2 class="text-2xl font-bold text-gray-900 mb-4" { "Recently Listed Artists" }
                    ul class="space-y-2" {
                        @for artist in artists {
                            li {
                                a href={(format!("/artists/{}", artist.id))} class="text-primary hover:underline" {
                                    (artist.name)
                                }
                            }
                        }
                    }
                }
                section {
                    h2 class="text-2xl font-bold text-gray-900 mb-4" { "Recently Listed Venues" }
                    ul class="space-y-2" {
                        @for venue in venues {
                            li {
                                a href={(format!("/venues/{}", venue.id))} class="text-primary hover:underline" {
                                    (venue.name)
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn venues_page(areas: &[Area], notice: Option<&Notice>) -> Markup {
    base_layout(
        "Venues",
        notice,
        html! {
            div class="flex justify-between items-center mb-6" {
                h1 class="text-3xl font-bold text-gray-900" { "Venues" }
                a href="/venues/create" class="bg-primary text-white px-4 py-2 rounded-md" { "List a venue" }
            }
            (search_box("/venues/search", "Find a venue", ""))

            @if areas.is_empty() {
                div class="text-center py-12" {
                    p class="text-gray-600 text-lg" { "No venues listed yet." }
                }
            }
            @for area in areas {
                section class="mb-8" {
                    h2 class="text-xl font-semibold text-gray-800 mb-3" { (area.city) ", " (area.state) }
                    ul class="space-y-2" {
                        @for venue in &area.venues {
                            li class="flex justify-between bg-white rounded-md shadow-sm px-4 py-2" {
                                a href={(format!("/venues/{}", venue.id))} class="font-medium text-gray-900 hover:underline" {
                                    (venue.name)
                                }
                                span class="text-sm text-gray-500" {
                                    (venue.num_upcoming_shows) " upcoming"
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn artists_page(artists: &[artists::Model], notice: Option<&Notice>) -> Markup {
    base_layout(
        "Artists",
        notice,
        html! {
            div class="flex justify-between items-center mb-6" {
                h1 class="text-3xl font-bold text-gray-900" { "Artists" }
                a href="/artists/create" class="bg-primary text-white px-4 py-2 rounded-md" { "List an artist" }
            }
            (search_box("/artists/search", "Find an artist", ""))

            @if artists.is_empty() {
                div class="text-center py-12" {
                    p class="text-gray-600 text-lg" { "No artists listed yet." }
                }
            } @else {
                div class="grid grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-6" {
                    @for artist in artists {
                        (listing_card(
                            &format!("/artists/{}", artist.id),
                            &artist.name,
                            Some(format!("{}, {}", artist.city, artist.state).as_str()),
                            Some(artist.image_link.as_str()),
                        ))
                    }
                }
            }
        },
    )
}

/// One hit in a search result list.
pub struct SearchHit {
    pub href: String,
    pub name: String,
}

/// `results` is `None` when the search itself failed.
pub fn search_page(
    title: &str,
    action: &str,
    search_term: &str,
    results: Option<&[SearchHit]>,
    notice: Option<&Notice>,
) -> Markup {
    base_layout(
        title,
        notice,
        html! {
            h1 class="text-3xl font-bold text-gray-900 mb-6" { (title) }
            (search_box(action, "Search by name", search_term))

            @if let Some(hits) = results {
                h3 id="result-count" class="text-lg text-gray-700 mb-4" {
                    "Number of search results for \"" (search_term) "\": " (hits.len())
                }
                ul class="space-y-2" {
                    @for hit in hits {
                        li class="bg-white rounded-md shadow-sm px-4 py-2" {
                            a href=(hit.href) class="font-medium text-gray-900 hover:underline" { (hit.name) }
                        }
                    }
                }
            }
        },
    )
}

pub fn venue_detail_page(detail: &VenueDetail, notice: Option<&Notice>) -> Markup {
    let venue = &detail.venue;

    base_layout(
        &venue.name,
        notice,
        html! {
            div class="flex flex-col md:flex-row gap-6" {
                div class="flex-grow" {
                    h1 class="text-3xl font-bold text-gray-900" { (venue.name) }
                    p class="text-sm text-gray-500 mb-4" { "ID: " (venue.id) }
                    (genre_tags(&venue.genres))
                    dl class="mt-4 space-y-2 text-gray-700" {
                        div { dt class="inline font-medium" { "Location: " } dd class="inline" { (venue.city) ", " (venue.state) } }
                        div { dt class="inline font-medium" { "Address: " } dd class="inline" { (venue.address) } }
                        div { dt class="inline font-medium" { "Phone: " } dd class="inline" { (venue.phone) } }
                        @if let Some(link) = &venue.facebook_link {
                            div { dt class="inline font-medium" { "Facebook: " } dd class="inline" { a href=(link) target="_blank" { (link) } } }
                        }
                    }
                    @if venue.seeking_artist == Some(true) {
                        div class="mt-4 p-4 bg-green-50 rounded-md" {
                            p class="font-semibold text-green-800" { "Currently seeking talent" }
                            @if let Some(description) = &venue.seeking_description {
                                p class="text-green-700" { (description) }
                            }
                        }
                    } @else {
                        p class="mt-4 text-gray-500" { "Not currently seeking talent" }
                    }
                    div class="mt-6 flex gap-3" {
                        a href={(format!("/venues/{}/edit", venue.id))} class="px-4 py-2 bg-blue-500 text-white rounded-md" { "Edit" }
                        a href={(format!("/venues/{}/delete", venue.id))} class="px-4 py-2 bg-red-500 text-white rounded-md" { "Delete" }
                    }
                }
                div class="flex-shrink-0" {
                    img src=(venue.image_link) alt=(venue.name) class="w-full md:w-64 rounded-lg shadow-md";
                }
            }
            (show_sections(&detail.shows, "artists"))
        },
    )
}

pub fn artist_detail_page(detail: &ArtistDetail, notice: Option<&Notice>) -> Markup {
    let artist = &detail.artist;

    base_layout(
        &artist.name,
        notice,
        html! {
            div class="flex flex-col md:flex-row gap-6" {
                div class="flex-grow" {
                    h1 class="text-3xl font-bold text-gray-900" { (artist.name) }
                    p class="text-sm text-gray-500 mb-4" { "ID: " (artist.id) }
                    (genre_tags(&artist.genres))
                    dl class="mt-4 space-y-2 text-gray-700" {
                        div { dt class="inline font-medium" { "Location: " } dd class="inline" { (artist.city) ", " (artist.state) } }
                        div { dt class="inline font-medium" { "Phone: " } dd class="inline" { (artist.phone) } }
                        @if let Some(link) = &artist.facebook_link {
                            div { dt class="inline font-medium" { "Facebook: " } dd class="inline" { a href=(link) target="_blank" { (link) } } }
                        }
                    }
                    @if artist.seeking_venue == Some(true) {
                        div class="mt-4 p-4 bg-green-50 rounded-md" {
                            p class="font-semibold text-green-800" { "Currently seeking performance venues" }
                            @if let Some(description) = &artist.seeking_description {
                                p class="text-green-700" { (description) }
                            }
                        }
                    } @else {
                        p class="mt-4 text-gray-500" { "Not currently seeking performance venues" }
                    }
                    div class="mt-6 flex gap-3" {
                        a href={(format!("/artists/{}/edit", artist.id))} class="px-4 py-2 bg-blue-500 text-white rounded-md" { "Edit" }
                        a href={(format!("/artists/{}/delete", artist.id))} class="px-4 py-2 bg-red-500 text-white rounded-md" { "Delete" }
                    }
                }
                div class="flex-shrink-0" {
                    img src=(artist.image_link) alt=(artist.name) class="w-full md:w-64 rounded-lg shadow-md";
                }
            }
            (show_sections(&detail.shows, "venues"))
        },
    )
}

pub fn shows_page(shows: &[ShowRow], notice: Option<&Notice>) -> Markup {
    base_layout(
        "Shows",
        notice,
        html! {
            h1 class="text-3xl font-bold text-gray-900 mb-6" { "Shows" }
            @if shows.is_empty() {
                div class="text-center py-12" {
                    p class="text-gray-600 text-lg" { "No shows listed yet." }
                }
            } @else {
                ol id="show-list" class="grid grid-cols-1 md:grid-cols-2 gap-4" {
                    @for show in shows {
                        li class="show-row flex items-center gap-4 bg-white rounded-lg shadow-sm p-3" {
                            img src=(show.artist_image_link) alt=(show.artist_name) class="w-16 h-16 rounded object-cover";
                            div {
                                p class="text-sm text-gray-500" { (show.start_time) }
                                a href={(format!("/artists/{}", show.artist_id))} class="font-semibold text-gray-900 hover:underline" {
                                    (show.artist_name)
                                }
                                p class="text-sm text-gray-600" {
                                    "playing at "
                                    a href={(format!("/venues/{}", show.venue_id))} class="hover:underline" { (show.venue_name) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn new_venue_page() -> Markup {
    base_layout(
        "List a venue",
        None,
        html! {
            h1 class="text-3xl font-bold text-gray-900 mb-6" { "List a new venue" }
            (profile_form("/venues/create", "Create Venue", &ProfileFormData::default(), VENUE_SEEKING_FIELD, "Looking for talent"))
        },
    )
}

pub fn edit_venue_page(venue: &venues::Model) -> Markup {
    base_layout(
        "Edit venue",
        None,
        html! {
            h1 class="text-3xl font-bold text-gray-900 mb-6" { "Edit venue " (venue.name) }
            (profile_form(
                &format!("/venues/{}/edit", venue.id),
                "Save Venue",
                &ProfileFormData::from(venue),
                VENUE_SEEKING_FIELD,
                "Looking for talent",
            ))
        },
    )
}

pub fn new_artist_page() -> Markup {
    base_layout(
        "List an artist",
        None,
        html! {
            h1 class="text-3xl font-bold text-gray-900 mb-6" { "List a new artist" }
            (profile_form("/artists/create", "Create Artist", &ProfileFormData::default(), ARTIST_SEEKING_FIELD, "Looking for venues"))
        },
    )
}

pub fn edit_artist_page(artist: &artists::Model) -> Markup {
    base_layout(
        "Edit artist",
        None,
        html! {
            h1 class="text-3xl font-bold text-gray-900 mb-6" { "Edit artist " (artist.name) }
            (profile_form(
                &format!("/artists/{}/edit", artist.id),
                "Save Artist",
                &ProfileFormData::from(artist),
                ARTIST_SEEKING_FIELD,
                "Looking for venues",
            ))
        },
    )
}

pub fn new_show_page(artists: &[artists::Model], venues: &[venues::Model]) -> Markup {
    base_layout(
        "List a show",
        None,
        html! {
            h1 class="text-3xl font-bold text-gray-900 mb-6" { "List a new show" }
            (show_form(artists, venues))
        },
    )
}

pub fn error_page(status: StatusCode, message: &str) -> Markup {
    let heading = match status {
        StatusCode::NOT_FOUND => "404: Page not found",
        StatusCode::INTERNAL_SERVER_ERROR => "500: Server error",
        _ => status.canonical_reason().unwrap_or("Error"),
    };

    base_layout(
        heading,
        None,
        html! {
            div class="text-center py-12" {
                h1 class="text-3xl font-bold text-gray-900" { (heading) }
                p class="text-gray-600 mt-4" { (message) }
                a href="/" class="text-primary hover:underline mt-6 inline-block" { "Back to home" }
            }
        },
    )
}

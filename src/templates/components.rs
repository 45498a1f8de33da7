use maud::{html, Markup};

use crate::db::entities::{artists, venues};
use crate::db::types::Genres;
use crate::handlers::notice::{Notice, NoticeLevel};
use crate::services::{PartitionedShows, ShowSlot};

pub const GENRE_CHOICES: [&str; 19] = [
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

const INPUT_CLASS: &str = "w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-primary";

pub fn notice_banner(notice: &Notice) -> Markup {
    let color = match notice.level {
        NoticeLevel::Success => "bg-green-100 text-green-800 border-green-300",
        NoticeLevel::Error => "bg-red-100 text-red-800 border-red-300",
    };

    html! {
        div id="notification-area" class={(format!("mb-4 px-4 py-3 border rounded-md {}", color))} role="alert" {
            (notice.message)
        }
    }
}

/// Card linking to a venue or artist page.
pub fn listing_card(href: &str, name: &str, subtitle: Option<&str>, image_link: Option<&str>) -> Markup {
    html! {
        a href=(href) class="listing-card block bg-white rounded-lg shadow-md overflow-hidden" {
            @if let Some(image) = image_link {
                div class="relative aspect-square" {
                    img src=(image) alt=(name) class="w-full h-full object-cover" loading="lazy";
                }
            }
            div class="p-4" {
                h3 class="font-semibold text-gray-900 truncate" title=(name) { (name) }
                @if let Some(subtitle) = subtitle {
                    p class="text-sm text-gray-600 truncate" { (subtitle) }
                }
            }
        }
    }
}

pub fn genre_tags(genres: &Genres) -> Markup {
    html! {
        div class="flex flex-wrap gap-2" {
            @for genre in genres {
                span class="px-2 py-1 bg-gray-100 text-gray-700 text-sm rounded" { (genre) }
            }
        }
    }
}

pub fn search_box(action: &str, placeholder: &str, search_term: &str) -> Markup {
    html! {
        form method="post" action=(action) class="bg-white rounded-lg shadow-sm p-4 mb-6 flex gap-4" {
            input type="search" name="search_term" value=(search_term) placeholder=(placeholder) class=(INPUT_CLASS);
            button type="submit" class="bg-primary text-white font-semibold py-2 px-4 rounded-md" { "Search" }
        }
    }
}

fn show_slot_card(slot: &ShowSlot, counterpart_path: &str) -> Markup {
    html! {
        a href={(format!("/{}/{}", counterpart_path, slot.counterpart_id))}
          class="listing-card flex items-center gap-4 bg-white rounded-lg shadow-sm p-3" {
            img src=(slot.counterpart_image_link) alt=(slot.counterpart_name) class="w-16 h-16 rounded object-cover";
            div {
                p class="font-semibold text-gray-900" { (slot.counterpart_name) }
                p class="text-sm text-gray-600" { (slot.start_time) }
            }
        }
    }
}

/// Upcoming and past sections for a detail page. `counterpart_path` is
/// `artists` on a venue page and `venues` on an artist page.
pub fn show_sections(shows: &PartitionedShows, counterpart_path: &str) -> Markup {
    html! {
        section class="mt-8" {
            h2 class="text-xl font-bold text-gray-900 mb-4" {
                (shows.upcoming_count()) " Upcoming "
                (if shows.upcoming_count() == 1 { "Show" } else { "Shows" })
            }
            div class="grid grid-cols-1 md:grid-cols-2 gap-4" {
                @for slot in &shows.upcoming {
                    (show_slot_card(slot, counterpart_path))
                }
            }
        }
        section class="mt-8" {
            h2 class="text-xl font-bold text-gray-900 mb-4" {
                (shows.past_count()) " Past "
                (if shows.past_count() == 1 { "Show" } else { "Shows" })
            }
            div class="grid grid-cols-1 md:grid-cols-2 gap-4" {
                @for slot in &shows.past {
                    (show_slot_card(slot, counterpart_path))
                }
            }
        }
    }
}

/// Current values shown in a venue or artist form.
#[derive(Debug, Clone, Default)]
pub struct ProfileFormData {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub image_link: String,
    pub seeking: bool,
    pub seeking_description: String,
}

impl From<&venues::Model> for ProfileFormData {
    fn from(venue: &venues::Model) -> Self {
        Self {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone(),
            genres: venue.genres.0.clone(),
            facebook_link: venue.facebook_link.clone().unwrap_or_default(),
            image_link: venue.image_link.clone(),
            seeking: venue.seeking_artist.unwrap_or(false),
            seeking_description: venue.seeking_description.clone().unwrap_or_default(),
        }
    }
}

impl From<&artists::Model> for ProfileFormData {
    fn from(artist: &artists::Model) -> Self {
        Self {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            address: artist.address.clone(),
            phone: artist.phone.clone(),
            genres: artist.genres.0.clone(),
            facebook_link: artist.facebook_link.clone().unwrap_or_default(),
            image_link: artist.image_link.clone(),
            seeking: artist.seeking_venue.unwrap_or(false),
            seeking_description: artist.seeking_description.clone().unwrap_or_default(),
        }
    }
}

fn text_field(label: &str, name: &str, value: &str, required: bool) -> Markup {
    html! {
        div {
            label for=(name) class="block text-sm font-medium text-gray-700 mb-2" { (label) }
            input type="text" id=(name) name=(name) value=(value) required[required] class=(INPUT_CLASS);
        }
    }
}

pub fn profile_form(
    action: &str,
    submit_label: &str,
    data: &ProfileFormData,
    seeking_field: &str,
    seeking_label: &str,
) -> Markup {
    html! {
        form method="post" action=(action) class="bg-white rounded-lg shadow-sm p-6 space-y-4" {
            (text_field("Name", "name", &data.name, true))
            div class="grid grid-cols-1 md:grid-cols-2 gap-4" {
                (text_field("City", "city", &data.city, true))
                (text_field("State", "state", &data.state, true))
            }
            (text_field("Address", "address", &data.address, true))
            (text_field("Phone", "phone", &data.phone, true))
            div {
                label for="genres" class="block text-sm font-medium text-gray-700 mb-2" { "Genres" }
                select id="genres" name="genres" multiple required class=(INPUT_CLASS) {
                    @for genre in GENRE_CHOICES {
                        option value=(genre) selected[data.genres.iter().any(|g| g == genre)] { (genre) }
                    }
                    // Stored genres outside the fixed choices stay selectable and selected.
                    @for genre in data.genres.iter().filter(|g| !GENRE_CHOICES.contains(&g.as_str())) {
                        option value=(genre) selected { (genre) }
                    }
                }
            }
            (text_field("Image Link", "image_link", &data.image_link, true))
            (text_field("Facebook Link", "facebook_link", &data.facebook_link, false))
            div class="flex items-center gap-2" {
                input type="checkbox" id=(seeking_field) name=(seeking_field) value="y" checked[data.seeking];
                label for=(seeking_field) class="text-sm font-medium text-gray-700" { (seeking_label) }
            }
            div {
                label for="seeking_description" class="block text-sm font-medium text-gray-700 mb-2" { "Seeking Description" }
                textarea id="seeking_description" name="seeking_description" class=(INPUT_CLASS) { (data.seeking_description) }
            }
            button type="submit" class="w-full bg-primary text-white font-semibold py-2 px-4 rounded-md" { (submit_label) }
        }
    }
}

pub fn show_form(artists: &[artists::Model], venues: &[venues::Model]) -> Markup {
    html! {
        form method="post" action="/shows/create" class="bg-white rounded-lg shadow-sm p-6 space-y-4" {
            div {
                label for="artist_id" class="block text-sm font-medium text-gray-700 mb-2" { "Artist" }
                select id="artist_id" name="artist_id" required class=(INPUT_CLASS) {
                    @for artist in artists {
                        option value=(artist.id) { (artist.name) }
                    }
                }
            }
            div {
                label for="venue_id" class="block text-sm font-medium text-gray-700 mb-2" { "Venue" }
                select id="venue_id" name="venue_id" required class=(INPUT_CLASS) {
                    @for venue in venues {
                        option value=(venue.id) { (venue.name) }
                    }
                }
            }
            div {
                label for="start_time" class="block text-sm font-medium text-gray-700 mb-2" { "Start Time" }
                input type="datetime-local" id="start_time" name="start_time" required class=(INPUT_CLASS);
            }
            button type="submit" class="w-full bg-primary text-white font-semibold py-2 px-4 rounded-md" { "Create Show" }
        }
    }
}

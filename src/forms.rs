//! Typed decoding of submitted HTML forms.
//!
//! Bodies arrive as ordered `(name, value)` pairs so that repeated fields
//! such as `genres` keep every value in submission order. Each form has an
//! explicit allow-list; anything outside it is rejected.

use chrono::{DateTime, NaiveDateTime, Utc};
use sea_orm::Set;
use serde::Deserialize;

use crate::{
    db::{
        entities::{artists, shows, venues},
        types::Genres,
    },
    error::{AppError, Result},
};

/// Checkbox field carrying a venue's "looking for talent" flag.
pub const VENUE_SEEKING_FIELD: &str = "seeking_talent";
/// Checkbox field carrying an artist's "looking for venues" flag.
pub const ARTIST_SEEKING_FIELD: &str = "seeking_shows";

const PROFILE_FIELDS: [&str; 9] = [
    "name",
    "city",
    "state",
    "address",
    "phone",
    "genres",
    "facebook_link",
    "image_link",
    "seeking_description",
];

const SHOW_FIELDS: [&str; 3] = ["artist_id", "venue_id", "start_time"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// Raw submitted pairs.
#[derive(Debug, Clone, Default)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn get_all(&self, name: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(key, _)| key == name)
    }

    /// Rejects the first field that is not in `allowed`.
    pub fn ensure_only(&self, allowed: &[&str]) -> Result<()> {
        match self.0.iter().find(|(key, _)| !allowed.contains(&key.as_str())) {
            Some((key, _)) => Err(AppError::validation(key.as_str(), "is not a recognized field")),
            None => Ok(()),
        }
    }

    fn required(&self, name: &str) -> Result<String> {
        let value = self
            .get(name)
            .ok_or_else(|| AppError::validation(name, "is required"))?
            .trim();

        if value.is_empty() {
            return Err(AppError::validation(name, "must not be blank"));
        }

        Ok(value.to_string())
    }

    fn optional(&self, name: &str) -> Option<String> {
        self.get(name)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    fn genres(&self) -> Result<Vec<String>> {
        let genres: Vec<String> = self
            .get_all("genres")
            .into_iter()
            .map(|genre| genre.trim().to_string())
            .filter(|genre| !genre.is_empty())
            .collect();

        if genres.is_empty() {
            return Err(AppError::validation("genres", "at least one genre is required"));
        }

        Ok(genres)
    }

    /// Absent means false.
    fn checkbox(&self, name: &str) -> Result<bool> {
        match self.get(name) {
            None => Ok(false),
            Some(value) => parse_checkbox(value)
                .ok_or_else(|| AppError::validation(name, format!("'{}' is not a yes/no value", value))),
        }
    }

    fn integer(&self, name: &str) -> Result<i32> {
        let value = self.required(name)?;
        value
            .parse()
            .map_err(|_| AppError::validation(name, format!("'{}' is not a valid id", value)))
    }
}

pub fn parse_checkbox(value: &str) -> Option<bool> {
    match value.trim() {
        "y" | "on" | "true" | "True" | "1" => Some(true),
        "n" | "off" | "false" | "False" | "0" => Some(false),
        _ => None,
    }
}

/// Accepts RFC 3339 or a naive date-time, which is read as UTC.
pub fn parse_start_time(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

/// A complete venue or artist submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub image_link: String,
    pub seeking: bool,
    pub seeking_description: Option<String>,
}

impl ProfileForm {
    pub fn parse(fields: &FormFields, seeking_field: &str) -> Result<Self> {
        fields.ensure_only(&allowed_profile_fields(seeking_field))?;

        Ok(Self {
            name: fields.required("name")?,
            city: fields.required("city")?,
            state: fields.required("state")?,
            address: fields.required("address")?,
            phone: fields.required("phone")?,
            genres: fields.genres()?,
            facebook_link: fields.optional("facebook_link"),
            image_link: fields.required("image_link")?,
            seeking: fields.checkbox(seeking_field)?,
            seeking_description: fields.optional("seeking_description"),
        })
    }

    pub fn into_venue(self) -> venues::ActiveModel {
        venues::ActiveModel {
            name: Set(self.name),
            city: Set(self.city),
            state: Set(self.state),
            address: Set(self.address),
            phone: Set(self.phone),
            genres: Set(Genres::from(self.genres)),
            facebook_link: Set(self.facebook_link),
            image_link: Set(self.image_link),
            seeking_artist: Set(Some(self.seeking)),
            seeking_description: Set(self.seeking_description),
            ..Default::default()
        }
    }

    pub fn into_artist(self) -> artists::ActiveModel {
        artists::ActiveModel {
            name: Set(self.name),
            city: Set(self.city),
            state: Set(self.state),
            address: Set(self.address),
            phone: Set(self.phone),
            genres: Set(Genres::from(self.genres)),
            facebook_link: Set(self.facebook_link),
            image_link: Set(self.image_link),
            seeking_venue: Set(Some(self.seeking)),
            seeking_description: Set(self.seeking_description),
            ..Default::default()
        }
    }
}

/// A partial venue or artist submission; `None` leaves the stored value alone.
///
/// The seeking checkbox is the exception: a browser sends nothing for an
/// unticked box, so an edit without it always stores `false`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileEdit {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub genres: Option<Vec<String>>,
    pub facebook_link: Option<Option<String>>,
    pub image_link: Option<String>,
    pub seeking: bool,
    pub seeking_description: Option<Option<String>>,
}

impl ProfileEdit {
    pub fn parse(fields: &FormFields, seeking_field: &str) -> Result<Self> {
        fields.ensure_only(&allowed_profile_fields(seeking_field))?;

        let required_if_present = |name: &str| -> Result<Option<String>> {
            if fields.contains(name) {
                fields.required(name).map(Some)
            } else {
                Ok(None)
            }
        };

        let optional_if_present = |name: &str| {
            fields.contains(name).then(|| fields.optional(name))
        };

        Ok(Self {
            name: required_if_present("name")?,
            city: required_if_present("city")?,
            state: required_if_present("state")?,
            address: required_if_present("address")?,
            phone: required_if_present("phone")?,
            genres: if fields.contains("genres") {
                Some(fields.genres()?)
            } else {
                None
            },
            facebook_link: optional_if_present("facebook_link"),
            image_link: required_if_present("image_link")?,
            seeking: fields.checkbox(seeking_field)?,
            seeking_description: optional_if_present("seeking_description"),
        })
    }

    pub fn apply_to_venue(self, venue: &mut venues::ActiveModel) {
        if let Some(name) = self.name {
            venue.name = Set(name);
        }
        if let Some(city) = self.city {
            venue.city = Set(city);
        }
        if let Some(state) = self.state {
            venue.state = Set(state);
        }
        if let Some(address) = self.address {
            venue.address = Set(address);
        }
        if let Some(phone) = self.phone {
            venue.phone = Set(phone);
        }
        if let Some(genres) = self.genres {
            venue.genres = Set(Genres::from(genres));
        }
        if let Some(link) = self.facebook_link {
            venue.facebook_link = Set(link);
        }
        if let Some(link) = self.image_link {
            venue.image_link = Set(link);
        }
        venue.seeking_artist = Set(Some(self.seeking));
        if let Some(description) = self.seeking_description {
            venue.seeking_description = Set(description);
        }
    }

    pub fn apply_to_artist(self, artist: &mut artists::ActiveModel) {
        if let Some(name) = self.name {
            artist.name = Set(name);
        }
        if let Some(city) = self.city {
            artist.city = Set(city);
        }
        if let Some(state) = self.state {
            artist.state = Set(state);
        }
        if let Some(address) = self.address {
            artist.address = Set(address);
        }
        if let Some(phone) = self.phone {
            artist.phone = Set(phone);
        }
        if let Some(genres) = self.genres {
            artist.genres = Set(Genres::from(genres));
        }
        if let Some(link) = self.facebook_link {
            artist.facebook_link = Set(link);
        }
        if let Some(link) = self.image_link {
            artist.image_link = Set(link);
        }
        artist.seeking_venue = Set(Some(self.seeking));
        if let Some(description) = self.seeking_description {
            artist.seeking_description = Set(description);
        }
    }
}

fn allowed_profile_fields(seeking_field: &str) -> Vec<&str> {
    let mut allowed = PROFILE_FIELDS.to_vec();
    allowed.push(seeking_field);
    allowed
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShowForm {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: DateTime<Utc>,
}

impl ShowForm {
    pub fn parse(fields: &FormFields) -> Result<Self> {
        fields.ensure_only(&SHOW_FIELDS)?;

        let raw_start = fields.required("start_time")?;
        let start_time = parse_start_time(&raw_start).ok_or_else(|| {
            AppError::validation("start_time", format!("'{}' is not a valid date and time", raw_start))
        })?;

        Ok(Self {
            artist_id: fields.integer("artist_id")?,
            venue_id: fields.integer("venue_id")?,
            start_time,
        })
    }

    pub fn into_active_model(self) -> shows::ActiveModel {
        shows::ActiveModel {
            artist_id: Set(self.artist_id),
            venue_id: Set(self.venue_id),
            start_time: Set(self.start_time.into()),
            ..Default::default()
        }
    }
}

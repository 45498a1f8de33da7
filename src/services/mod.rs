pub mod bookings;
pub mod datetime;

pub use bookings::{
    artist_detail, group_by_area, partition_shows, show_listing, venue_detail, venue_directory,
    Area, ArtistDetail, PartitionedShows, ShowRow, ShowSlot, VenueDetail, VenueSummary,
};
pub use datetime::{format_datetime, DateFormat};

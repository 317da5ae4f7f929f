//! Read-path presentation
//!
//! Turns stored venues into the strings a venue card shows.

use super::price;
use super::types::{StatusSwatch, Venue, VenueId};
use serde::Serialize;

/// Format a drive time for display
///
/// `None` and `0` have no display value; the card shows the location instead.
pub fn format_drive_time(minutes: Option<u32>) -> Option<String> {
    match minutes {
        None | Some(0) => None,
        Some(m) if m < 60 => Some(format!("{} mins", m)),
        Some(m) => Some(format!("{} hr {} mins", m / 60, m % 60)),
    }
}

/// Everything a venue card renders
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VenueCard {
    pub id: Option<VenueId>,
    pub name: String,
    pub hero_image: Option<String>,
    pub image_count: usize,
    pub status: Option<String>,
    pub status_color: String,
    /// Drive time when known, otherwise the raw location text
    pub distance_label: Option<String>,
    pub price_saturday: String,
    pub price_sunday: String,
    pub price_midweek: String,
    pub website_url: Option<String>,
    pub brochure_url: Option<String>,
    pub note_lines: Vec<String>,
    pub active: bool,
}

impl From<&Venue> for VenueCard {
    fn from(venue: &Venue) -> Self {
        let distance_label = format_drive_time(venue.drive_time_minutes)
            .or_else(|| venue.trimmed_location().map(str::to_string));

        let note_lines = venue
            .notes
            .as_deref()
            .map(|notes| notes.lines().map(str::to_string).collect())
            .unwrap_or_default();

        Self {
            id: venue.id,
            name: venue.name.clone(),
            hero_image: venue.hero_image().map(str::to_string),
            image_count: venue.images.len(),
            status: venue.status.clone().filter(|s| !s.trim().is_empty()),
            status_color: venue
                .status_color
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| StatusSwatch::Slate.hex().to_string()),
            distance_label,
            price_saturday: price::display(venue.price_saturday.as_deref()),
            price_sunday: price::display(venue.price_sunday.as_deref()),
            price_midweek: price::display(venue.price_midweek.as_deref()),
            website_url: venue.website_url.clone(),
            brochure_url: venue.brochure_url.clone(),
            note_lines,
            active: venue.is_active(),
        }
    }
}

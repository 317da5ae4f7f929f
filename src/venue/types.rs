//! Core data types for venue records
//!
//! - `Venue`: one row of the venues table, also used as the form draft
//! - `StatusSwatch`: the predefined status colors offered by the color picker

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of images a venue may carry
pub const MAX_IMAGES: usize = 10;

/// Literal text standing in for a price that cannot be booked
pub const PRICE_UNAVAILABLE: &str = "Unavailable";

/// Identifier assigned by the store on insert
pub type VenueId = i64;

/// A wedding venue
///
/// Field names match the columns of the hosted `venues` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Venue {
    /// Present once persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<VenueId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Free-text address
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub brochure_url: Option<String>,
    #[serde(default)]
    pub price_saturday: Option<String>,
    #[serde(default)]
    pub price_sunday: Option<String>,
    #[serde(default)]
    pub price_midweek: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Hex color, usually one of the `StatusSwatch` values
    #[serde(default)]
    pub status_color: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Driving minutes from the configured origin
    #[serde(default)]
    pub drive_time_minutes: Option<u32>,
    #[serde(default)]
    pub active: Option<bool>,
    /// Image URLs; position 0 is the hero image
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    /// Assigned by the store, never written back
    #[serde(default, skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Venue {
    /// Create an empty draft with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: Some(true),
            ..Default::default()
        }
    }

    /// Builder method: set location
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method: set Saturday price
    pub fn price_saturday(mut self, price: impl Into<String>) -> Self {
        self.price_saturday = Some(price.into());
        self
    }

    /// Builder method: set drive time
    pub fn drive_time(mut self, minutes: u32) -> Self {
        self.drive_time_minutes = Some(minutes);
        self
    }

    /// Builder method: set the store identifier
    pub fn with_id(mut self, id: VenueId) -> Self {
        self.id = Some(id);
        self
    }

    /// Builder method: append an image URL
    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    /// True when the record has not been persisted yet
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Unset means visible
    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(true)
    }

    /// The primary display image
    pub fn hero_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Location with surrounding whitespace removed, `None` when blank
    pub fn trimmed_location(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    /// Remaining image slots before the cap
    pub fn image_capacity(&self) -> usize {
        MAX_IMAGES.saturating_sub(self.images.len())
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "#{} {}", id, self.name),
            None => write!(f, "(new) {}", self.name),
        }
    }
}

/// Predefined status colors offered by the color picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum StatusSwatch {
    Slate,
    Blue,
    Green,
    Yellow,
    Red,
}

impl StatusSwatch {
    pub const ALL: [StatusSwatch; 5] = [
        StatusSwatch::Slate,
        StatusSwatch::Blue,
        StatusSwatch::Green,
        StatusSwatch::Yellow,
        StatusSwatch::Red,
    ];

    /// Hex value stored in `status_color`
    pub fn hex(&self) -> &'static str {
        match self {
            StatusSwatch::Slate => "#64748b",
            StatusSwatch::Blue => "#3b82f6",
            StatusSwatch::Green => "#22c55e",
            StatusSwatch::Yellow => "#eab308",
            StatusSwatch::Red => "#ef4444",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StatusSwatch::Slate => "slate",
            StatusSwatch::Blue => "blue",
            StatusSwatch::Green => "green",
            StatusSwatch::Yellow => "yellow",
            StatusSwatch::Red => "red",
        }
    }

    /// Reverse lookup from a stored hex value (case-insensitive)
    pub fn from_hex(hex: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.hex().eq_ignore_ascii_case(hex.trim()))
    }
}

impl FromStr for StatusSwatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|swatch| swatch.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown status color: {}", s))
    }
}

impl fmt::Display for StatusSwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_draft_defaults() {
        let venue = Venue::new("Hall");
        assert!(venue.is_new());
        assert_eq!(venue.active, Some(true));
        assert!(venue.images.is_empty());
        assert_eq!(venue.image_capacity(), MAX_IMAGES);
    }

    #[test]
    fn test_deserialize_row_with_nulls() {
        let row = r#"{
            "id": 7,
            "name": "Barn",
            "location": null,
            "price_saturday": "Unavailable",
            "drive_time_minutes": null,
            "active": null,
            "images": null,
            "created_at": "2024-05-01T10:00:00+00:00"
        }"#;
        let venue: Venue = serde_json::from_str(row).unwrap();
        assert_eq!(venue.id, Some(7));
        assert!(venue.is_active());
        assert!(venue.images.is_empty());
        assert!(venue.created_at.is_some());
        assert_eq!(venue.price_saturday.as_deref(), Some(PRICE_UNAVAILABLE));
    }

    #[test]
    fn test_serialize_omits_id_and_created_at() {
        let mut venue = Venue::new("Barn").image("a").image("b");
        venue.created_at = Some(Utc::now());
        let json = serde_json::to_value(&venue).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("created_at").is_none());
        assert_eq!(json["images"], serde_json::json!(["a", "b"]));

        let json = serde_json::to_value(venue.with_id(3)).unwrap();
        assert_eq!(json["id"], 3);
    }

    #[test]
    fn test_hero_image_is_first() {
        let venue = Venue::new("Barn").image("hero").image("second");
        assert_eq!(venue.hero_image(), Some("hero"));
        assert_eq!(Venue::new("Empty").hero_image(), None);
    }

    #[test]
    fn test_trimmed_location() {
        assert_eq!(Venue::new("a").location("  ").trimmed_location(), None);
        assert_eq!(
            Venue::new("a").location(" Bath ").trimmed_location(),
            Some("Bath")
        );
    }

    #[test]
    fn test_swatch_lookup() {
        assert_eq!("Green".parse::<StatusSwatch>(), Ok(StatusSwatch::Green));
        assert!("purple".parse::<StatusSwatch>().is_err());
        assert_eq!(StatusSwatch::from_hex("#EF4444"), Some(StatusSwatch::Red));
        assert_eq!(StatusSwatch::from_hex("#123456"), None);
    }
}

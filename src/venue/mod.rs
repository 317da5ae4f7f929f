//! Venue records
//!
//! The single entity of the system plus the pure logic built on it:
//! - `types`: `Venue`, `StatusSwatch`, image cap
//! - `price`: defensive parsing of free-text prices
//! - `sort`: list ordering
//! - `display`: card presentation and drive-time formatting

mod display;
pub mod price;
mod sort;
mod types;

pub use display::{format_drive_time, VenueCard};
pub use sort::{locale_compare, sort_venues, SortKey};
pub use types::{StatusSwatch, Venue, VenueId, MAX_IMAGES, PRICE_UNAVAILABLE};

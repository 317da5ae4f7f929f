//! # Venuebook
//!
//! Keep a shortlist of wedding venues: list, sort, create and edit venue
//! records with images, prices, location, drive time and brochure links.
//!
//! Records live in a hosted table with two public object-storage buckets.
//! Location search and drive times come from a maps API.
//!
//! ## Modules
//!
//! - [`venue`]: the `Venue` record, price parsing, sorting and display
//! - [`store`]: venue table and object storage access
//! - [`maps`]: place search and drive-time estimation
//! - [`controller`]: the venue list, the venue form and the session tying them together
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use venuebook::controller::{FieldEdit, Services, VenueBook};
//! use venuebook::maps::{GoogleMapsClient, MapsConfig};
//! use venuebook::store::{SupabaseClient, SupabaseConfig};
//! use venuebook::venue::SortKey;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let supabase = Arc::new(SupabaseClient::new(SupabaseConfig::default())?);
//!     let maps = Arc::new(GoogleMapsClient::new(MapsConfig::default())?);
//!
//!     let mut book = VenueBook::new(Services {
//!         store: supabase.clone(),
//!         storage: supabase,
//!         places: maps.clone(),
//!         directions: maps,
//!     });
//!     book.load().await?;
//!
//!     let form = book.open_new();
//!     form.set_field(FieldEdit::Name("Orchard Barn".into())).await?;
//!     form.set_field(FieldEdit::Location("Frome, Somerset".into())).await?;
//!     book.save(&form).await?;
//!
//!     for venue in book.list().sorted(SortKey::Distance) {
//!         println!("{}", venue.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod controller;
pub mod maps;
pub mod store;
pub mod venue;

// Re-export top-level types for convenience
pub use venue::{
    format_drive_time, sort_venues, SortKey, StatusSwatch, Venue, VenueCard, VenueId, MAX_IMAGES,
};

pub use store::{ObjectStorage, StoreError, StoreResult, SupabaseClient, UploadFile, VenueStore};

pub use maps::{DriveTimeEstimator, GoogleMapsClient, MapsError, PlaceSearch};

pub use controller::{
    FieldEdit, FormAction, FormError, Services, VenueBook, VenueForm, VenueList,
    VisibilityFilter,
};

pub use config::{Config, ConfigError, LoggingConfig};

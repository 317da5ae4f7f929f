//! Venue Store
//!
//! The hosted venue table and its two object-storage buckets are external
//! collaborators. Controllers only see the traits defined here.
//!
//! ## Architecture
//!
//! - **VenueStore**: select all rows, insert a row, update a row by id
//! - **ObjectStorage**: upload a file to a bucket and get its public URL
//! - **SupabaseClient**: the HTTP implementation of both
//!
//! Nothing here ever deletes a row or a stored object.

mod error;
mod supabase;
mod upload;

pub use error::{StoreError, StoreResult};
pub use supabase::{SupabaseClient, SupabaseConfig};
pub use upload::{random_object_name, UploadFile};

use crate::venue::{Venue, VenueId};
use async_trait::async_trait;

/// Bucket holding venue images
pub const IMAGES_BUCKET: &str = "images";

/// Bucket holding venue brochures
pub const BROCHURES_BUCKET: &str = "brochures";

/// Row access to the venues table
#[async_trait]
pub trait VenueStore: Send + Sync {
    /// Fetch every venue, unfiltered and unpaginated
    async fn list_venues(&self) -> StoreResult<Vec<Venue>>;

    /// Insert a new row and return it as stored
    async fn insert_venue(&self, venue: &Venue) -> StoreResult<Venue>;

    /// Replace the row with the given id and return it as stored
    async fn update_venue(&self, id: VenueId, venue: &Venue) -> StoreResult<Venue>;
}

/// File uploads to public buckets
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload `file` to `bucket` under `object_name`, returning the public URL
    async fn upload(
        &self,
        bucket: &str,
        object_name: &str,
        file: &UploadFile,
    ) -> StoreResult<String>;
}

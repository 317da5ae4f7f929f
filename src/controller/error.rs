//! Form error types
//!
//! Every variant is scoped to one user action. Nothing here is fatal; the
//! user retries by repeating the action.

use super::in_flight::FormAction;
use crate::maps::MapsError;
use crate::store::StoreError;
use crate::venue::MAX_IMAGES;
use thiserror::Error;

/// Errors surfaced to the user by the venue form
#[derive(Error, Debug)]
pub enum FormError {
    /// The same action is already running
    #[error("Another {0} is already in progress")]
    Busy(FormAction),

    /// The form was closed by a successful save
    #[error("This form has already been saved and closed")]
    Closed,

    #[error("Venue name is required")]
    MissingName,

    #[error("You can only upload up to {} images", MAX_IMAGES)]
    ImageLimitReached,

    #[error("Error uploading {file_name}: {source}")]
    Upload {
        file_name: String,
        #[source]
        source: StoreError,
    },

    /// Location search needs a maps API key
    #[error("Maps API key is not configured")]
    MapsUnavailable,

    #[error("No location found for {0:?}")]
    NoPlaceFound(String),

    #[error("Error fetching location: {0}")]
    Places(MapsError),

    #[error("Error saving venue: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for form operations
pub type FormResult<T> = Result<T, FormError>;

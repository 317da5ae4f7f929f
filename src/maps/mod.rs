//! Maps Integration
//!
//! Location auto-fill and drive-time estimation through an external maps API.
//!
//! - **PlaceSearch**: free-text place search returning formatted addresses
//! - **DriveTimeEstimator**: driving minutes from the configured origin
//! - **GoogleMapsClient**: Places Text Search + Routes implementation of both
//!
//! One API key serves both calls. Without it, search fails with
//! `MapsError::MissingApiKey` and drive time is simply unknown.

mod client;
mod duration;

pub use client::{GoogleMapsClient, MapsConfig};
pub use duration::parse_duration_minutes;

use async_trait::async_trait;
use thiserror::Error;

/// A single place search result
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceCandidate {
    pub formatted_address: String,
}

/// Free-text place search
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Candidates in the order the API ranks them; may be empty
    async fn search_text(&self, query: &str) -> Result<Vec<PlaceCandidate>, MapsError>;
}

/// Drive-time estimation from a fixed origin
#[async_trait]
pub trait DriveTimeEstimator: Send + Sync {
    /// Driving minutes to `destination`, or `None` when no usable route exists
    /// or the service cannot be reached
    async fn drive_time_minutes(&self, destination: &str) -> Option<u32>;
}

/// Errors that can occur when calling the maps API
#[derive(Error, Debug)]
pub enum MapsError {
    #[error("No maps API key configured")]
    MissingApiKey,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    Decode(String),
}

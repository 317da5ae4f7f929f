//! Venue list controller
//!
//! Holds the last fetched snapshot of all venues and derives sorted views
//! from it. Never writes to the store.

use crate::store::{StoreResult, VenueStore};
use crate::venue::{sort_venues, SortKey, Venue, VenueCard, VenueId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which venues a view includes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VisibilityFilter {
    #[default]
    All,
    ActiveOnly,
}

impl VisibilityFilter {
    fn includes(&self, venue: &Venue) -> bool {
        match self {
            VisibilityFilter::All => true,
            VisibilityFilter::ActiveOnly => venue.is_active(),
        }
    }
}

/// Read side of the venue book
pub struct VenueList {
    store: Arc<dyn VenueStore>,
    venues: Vec<Venue>,
}

impl VenueList {
    pub fn new(store: Arc<dyn VenueStore>) -> Self {
        Self {
            store,
            venues: Vec::new(),
        }
    }

    /// Fetch every venue, replacing the snapshot
    ///
    /// On failure the error is logged and the snapshot is left empty. The
    /// list is borrowed mutably for the whole fetch, so no reader sees a
    /// half-finished load.
    pub async fn load(&mut self) -> StoreResult<usize> {
        match self.store.list_venues().await {
            Ok(venues) => {
                tracing::info!("Loaded {} venues", venues.len());
                self.venues = venues;
                Ok(self.venues.len())
            }
            Err(e) => {
                tracing::error!("Error fetching venues: {}", e);
                self.venues.clear();
                Err(e)
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    /// Venues in fetch order
    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    /// Look up a loaded venue for editing
    pub fn find(&self, id: VenueId) -> Option<&Venue> {
        self.venues.iter().find(|v| v.id == Some(id))
    }

    /// All venues in the given order
    pub fn sorted(&self, key: SortKey) -> Vec<&Venue> {
        sort_venues(&self.venues, key)
    }

    /// Sorted venues passing the filter
    pub fn view(&self, key: SortKey, filter: VisibilityFilter) -> Vec<&Venue> {
        self.sorted(key)
            .into_iter()
            .filter(|v| filter.includes(v))
            .collect()
    }

    /// Cards for the current view
    pub fn cards(&self, key: SortKey, filter: VisibilityFilter) -> Vec<VenueCard> {
        self.view(key, filter)
            .into_iter()
            .map(VenueCard::from)
            .collect()
    }
}

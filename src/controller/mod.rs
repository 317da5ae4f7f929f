//! Venue Controllers
//!
//! ## Architecture
//!
//! - **VenueList**: last fetched snapshot of all venues, sorted views
//! - **VenueForm**: one draft venue being created or edited
//! - **VenueBook**: the session tying them together
//!
//! ## Control Flow
//!
//! 1. `VenueBook::load` fills the list from the store
//! 2. The user opens a form for a new venue or an existing one
//! 3. The form edits its draft, uploading files as they are picked
//! 4. `VenueBook::save` persists the draft and reloads the list

mod error;
mod form;
mod in_flight;
mod list;

#[cfg(test)]
pub(crate) mod fakes;

pub use error::{FormError, FormResult};
pub use form::{FieldEdit, VenueForm};
pub use in_flight::{FormAction, InFlight, InFlightGuard};
pub use list::{VenueList, VisibilityFilter};

use crate::maps::{DriveTimeEstimator, PlaceSearch};
use crate::store::{ObjectStorage, StoreResult, VenueStore};
use crate::venue::{Venue, VenueId};
use std::sync::Arc;

/// External collaborators shared by the list and every form
#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn VenueStore>,
    pub storage: Arc<dyn ObjectStorage>,
    pub places: Arc<dyn PlaceSearch>,
    pub directions: Arc<dyn DriveTimeEstimator>,
}

/// A venue browsing session
pub struct VenueBook {
    services: Services,
    list: VenueList,
}

impl VenueBook {
    pub fn new(services: Services) -> Self {
        let list = VenueList::new(Arc::clone(&services.store));
        Self { services, list }
    }

    /// Fetch every venue into the list
    pub async fn load(&mut self) -> StoreResult<usize> {
        self.list.load().await
    }

    pub fn list(&self) -> &VenueList {
        &self.list
    }

    /// Open a form for a new venue
    pub fn open_new(&self) -> VenueForm {
        VenueForm::create(self.services.clone())
    }

    /// Open a form for a loaded venue
    pub fn open_edit(&self, id: VenueId) -> Option<VenueForm> {
        self.list
            .find(id)
            .map(|venue| VenueForm::edit(self.services.clone(), venue))
    }

    /// Save a form, then refetch the list
    ///
    /// A failed refetch is logged by the list and does not undo the save.
    pub async fn save(&mut self, form: &VenueForm) -> FormResult<Venue> {
        let stored = form.save().await?;
        if let Err(e) = self.list.load().await {
            tracing::debug!("Saved venue {} but the list refetch failed: {}", stored, e);
        }
        Ok(stored)
    }
}

//! Venue form controller
//!
//! Owns one draft venue for the lifetime of a create or edit session. Field
//! edits mutate the draft in place; uploads and location search go out to
//! the collaborators and write their results back; `save` reconciles the
//! draft with the store.
//!
//! ## Save reconciliation
//!
//! 1. Drive time is recomputed when the venue is new or its location changed,
//!    and only if there is a location to route to
//! 2. `active` defaults to true
//! 3. New drafts are inserted, persisted ones updated by id
//! 4. On success the form closes; on failure the draft is left as it was

use super::error::{FormError, FormResult};
use super::in_flight::{FormAction, InFlight, InFlightGuard};
use super::Services;
use crate::maps::MapsError;
use crate::store::{random_object_name, UploadFile, BROCHURES_BUCKET, IMAGES_BUCKET};
use crate::venue::{StatusSwatch, Venue};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// A single scalar field edit
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Name(String),
    Location(String),
    WebsiteUrl(String),
    PriceSaturday(String),
    PriceSunday(String),
    PriceMidweek(String),
    Status(String),
    /// Free text; the swatch picker goes through `pick_color`
    StatusColor(String),
    Notes(String),
}

impl FieldEdit {
    fn apply(self, venue: &mut Venue) {
        match self {
            FieldEdit::Name(v) => venue.name = v,
            FieldEdit::Location(v) => venue.location = non_empty(v),
            FieldEdit::WebsiteUrl(v) => venue.website_url = non_empty(v),
            FieldEdit::PriceSaturday(v) => venue.price_saturday = non_empty(v),
            FieldEdit::PriceSunday(v) => venue.price_sunday = non_empty(v),
            FieldEdit::PriceMidweek(v) => venue.price_midweek = non_empty(v),
            FieldEdit::Status(v) => venue.status = non_empty(v),
            FieldEdit::StatusColor(v) => venue.status_color = non_empty(v),
            FieldEdit::Notes(v) => venue.notes = non_empty(v),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Create or edit session for one venue
pub struct VenueForm {
    services: Services,
    draft: RwLock<Venue>,
    /// Location before editing started; `None` for new venues
    original_location: Option<String>,
    in_flight: InFlight,
    closed: AtomicBool,
}

impl VenueForm {
    /// Start a create session with an empty draft
    pub fn create(services: Services) -> Self {
        Self::with_draft(services, Venue::new(""))
    }

    /// Start an edit session from a stored venue
    pub fn edit(services: Services, venue: &Venue) -> Self {
        Self::with_draft(services, venue.clone())
    }

    fn with_draft(services: Services, draft: Venue) -> Self {
        Self {
            services,
            original_location: draft.location.clone(),
            draft: RwLock::new(draft),
            in_flight: InFlight::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// Snapshot of the current draft
    pub async fn draft(&self) -> Venue {
        self.draft.read().await.clone()
    }

    /// Image URLs of the draft, hero first
    pub async fn images(&self) -> Vec<String> {
        self.draft.read().await.images.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// True while `action` is running
    pub fn is_busy(&self, action: FormAction) -> bool {
        self.in_flight.is_running(action)
    }

    fn ensure_open(&self) -> FormResult<()> {
        if self.is_closed() {
            Err(FormError::Closed)
        } else {
            Ok(())
        }
    }

    fn begin(&self, action: FormAction) -> FormResult<InFlightGuard> {
        self.ensure_open()?;
        self.in_flight.begin(action).ok_or(FormError::Busy(action))
    }

    // ============================================
    // Field edits
    // ============================================

    /// Replace one scalar field of the draft
    pub async fn set_field(&self, edit: FieldEdit) -> FormResult<()> {
        self.ensure_open()?;
        edit.apply(&mut *self.draft.write().await);
        Ok(())
    }

    /// Set the status color to a predefined swatch
    pub async fn pick_color(&self, swatch: StatusSwatch) -> FormResult<()> {
        self.set_field(FieldEdit::StatusColor(swatch.hex().to_string())).await
    }

    /// Flip visibility, returning the new value
    pub async fn toggle_active(&self) -> FormResult<bool> {
        self.ensure_open()?;
        let mut draft = self.draft.write().await;
        let active = !draft.is_active();
        draft.active = Some(active);
        Ok(active)
    }

    // ============================================
    // Images
    // ============================================

    /// Upload a batch of images and append their URLs
    ///
    /// At the cap the whole batch is rejected before anything is uploaded.
    /// Otherwise files beyond the remaining capacity are dropped. If any
    /// upload fails none of the batch is added; objects already uploaded are
    /// left in the bucket.
    pub async fn upload_images(&self, files: Vec<UploadFile>) -> FormResult<usize> {
        let _guard = self.begin(FormAction::UploadImages)?;

        let capacity = self.draft.read().await.image_capacity();
        if capacity == 0 {
            tracing::warn!("Image limit reached, rejecting batch of {}", files.len());
            return Err(FormError::ImageLimitReached);
        }
        if files.len() > capacity {
            tracing::debug!("Dropping {} images over the limit", files.len() - capacity);
        }

        let mut urls = Vec::with_capacity(capacity.min(files.len()));
        for file in files.iter().take(capacity) {
            let object_name = random_object_name(file);
            match self
                .services
                .storage
                .upload(IMAGES_BUCKET, &object_name, file)
                .await
            {
                Ok(url) => urls.push(url),
                Err(e) => {
                    tracing::error!("Error uploading image {}: {}", file.file_name, e);
                    return Err(FormError::Upload {
                        file_name: file.file_name.clone(),
                        source: e,
                    });
                }
            }
        }

        let mut draft = self.draft.write().await;
        let room = draft.image_capacity();
        let added = urls.len().min(room);
        draft.images.extend(urls.into_iter().take(room));

        tracing::info!("Added {} images to {}", added, draft.name);
        Ok(added)
    }

    /// Swap the image at `index` with its left neighbour
    pub async fn move_image_left(&self, index: usize) -> FormResult<bool> {
        self.ensure_open()?;
        let mut draft = self.draft.write().await;
        if index == 0 || index >= draft.images.len() {
            return Ok(false);
        }
        draft.images.swap(index - 1, index);
        Ok(true)
    }

    /// Swap the image at `index` with its right neighbour
    pub async fn move_image_right(&self, index: usize) -> FormResult<bool> {
        self.ensure_open()?;
        let mut draft = self.draft.write().await;
        if index + 1 >= draft.images.len() {
            return Ok(false);
        }
        draft.images.swap(index, index + 1);
        Ok(true)
    }

    /// Drop the image at `index` from the draft; the stored object stays
    pub async fn remove_image(&self, index: usize) -> FormResult<Option<String>> {
        self.ensure_open()?;
        let mut draft = self.draft.write().await;
        if index >= draft.images.len() {
            return Ok(None);
        }
        Ok(Some(draft.images.remove(index)))
    }

    // ============================================
    // Brochure
    // ============================================

    /// Upload a brochure and point the draft at it
    pub async fn upload_brochure(&self, file: UploadFile) -> FormResult<String> {
        let _guard = self.begin(FormAction::UploadBrochure)?;

        let object_name = random_object_name(&file);
        let url = self
            .services
            .storage
            .upload(BROCHURES_BUCKET, &object_name, &file)
            .await
            .map_err(|e| {
                tracing::error!("Error uploading brochure {}: {}", file.file_name, e);
                FormError::Upload {
                    file_name: file.file_name.clone(),
                    source: e,
                }
            })?;

        self.draft.write().await.brochure_url = Some(url.clone());
        Ok(url)
    }

    // ============================================
    // Location
    // ============================================

    /// Fill `location` from a place search on the venue name
    pub async fn autofill_location(&self) -> FormResult<String> {
        let _guard = self.begin(FormAction::AutofillLocation)?;

        let name = self.draft.read().await.name.trim().to_string();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }

        let candidates = match self.services.places.search_text(&name).await {
            Ok(candidates) => candidates,
            Err(MapsError::MissingApiKey) => {
                tracing::warn!("Maps API key not configured, cannot search for {:?}", name);
                return Err(FormError::MapsUnavailable);
            }
            Err(e) => {
                tracing::error!("Error fetching location for {:?}: {}", name, e);
                return Err(FormError::Places(e));
            }
        };

        let address = candidates
            .into_iter()
            .next()
            .map(|c| c.formatted_address)
            .ok_or_else(|| FormError::NoPlaceFound(name.clone()))?;

        tracing::debug!("Location for {:?}: {}", name, address);
        self.draft.write().await.location = Some(address.clone());
        Ok(address)
    }

    // ============================================
    // Save
    // ============================================

    /// True when saving should ask for a fresh drive time
    fn needs_drive_time(&self, venue: &Venue) -> bool {
        venue.is_new() || venue.location != self.original_location
    }

    /// Persist the draft
    ///
    /// Returns the stored venue and closes the form. On failure the form
    /// stays open with the draft unchanged.
    pub async fn save(&self) -> FormResult<Venue> {
        let _guard = self.begin(FormAction::Save)?;

        let mut venue = self.draft.read().await.clone();
        if venue.name.trim().is_empty() {
            return Err(FormError::MissingName);
        }

        if self.needs_drive_time(&venue) {
            if let Some(destination) = venue.trimmed_location().map(str::to_string) {
                match self
                    .services
                    .directions
                    .drive_time_minutes(&destination)
                    .await
                {
                    Some(minutes) => venue.drive_time_minutes = Some(minutes),
                    None => tracing::warn!(
                        "Drive time unavailable for {}, keeping {:?}",
                        venue,
                        venue.drive_time_minutes
                    ),
                }
            }
        }

        if venue.active.is_none() {
            venue.active = Some(true);
        }

        let result = match venue.id {
            None => self.services.store.insert_venue(&venue).await,
            Some(id) => self.services.store.update_venue(id, &venue).await,
        };

        match result {
            Ok(stored) => {
                tracing::info!("Saved venue {}", stored);
                *self.draft.write().await = stored.clone();
                self.closed.store(true, Ordering::SeqCst);
                Ok(stored)
            }
            Err(e) => {
                tracing::error!("Error saving venue {}: {}", venue, e);
                Err(FormError::Store(e))
            }
        }
    }
}

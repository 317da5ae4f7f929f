//! In-memory collaborators for controller tests

use crate::maps::{DriveTimeEstimator, MapsError, PlaceCandidate, PlaceSearch};
use crate::store::{ObjectStorage, StoreError, StoreResult, UploadFile, VenueStore};
use crate::venue::{Venue, VenueId};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Venue table backed by a vector
#[derive(Default)]
pub struct FakeStore {
    rows: Mutex<Vec<Venue>>,
    next_id: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    pub inserts: Mutex<Vec<Venue>>,
    pub updates: Mutex<Vec<(VenueId, Venue)>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicUsize::new(1),
            ..Default::default()
        }
    }

    /// Store seeded with rows; rows without ids get one
    pub fn with_rows(rows: Vec<Venue>) -> Self {
        let store = Self::new();
        for row in rows {
            store.push_row(row);
        }
        store
    }

    pub fn push_row(&self, mut row: Venue) {
        if row.id.is_none() {
            row.id = Some(self.allocate_id());
        }
        self.rows.lock().unwrap().push(row);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.lock().unwrap().len()
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }

    fn allocate_id(&self) -> VenueId {
        self.next_id.fetch_add(1, Ordering::SeqCst) as VenueId
    }

    fn write_error() -> StoreError {
        StoreError::Api {
            status: 500,
            message: "write rejected".to_string(),
        }
    }
}

#[async_trait]
impl VenueStore for FakeStore {
    async fn list_venues(&self) -> StoreResult<Vec<Venue>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn insert_venue(&self, venue: &Venue) -> StoreResult<Venue> {
        self.inserts.lock().unwrap().push(venue.clone());
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::write_error());
        }
        let mut stored = venue.clone();
        stored.id = Some(self.allocate_id());
        self.rows.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn update_venue(&self, id: VenueId, venue: &Venue) -> StoreResult<Venue> {
        self.updates.lock().unwrap().push((id, venue.clone()));
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::write_error());
        }
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == Some(id))
            .ok_or(StoreError::EmptyResponse)?;
        *row = venue.clone();
        row.id = Some(id);
        Ok(row.clone())
    }
}

/// Object storage that records uploads and can fail on the n-th call
#[derive(Default)]
pub struct FakeStorage {
    pub uploads: Mutex<Vec<(String, String)>>,
    fail_on_call: Mutex<Option<usize>>,
}

impl FakeStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the upload with this zero-based call index
    pub fn fail_on_call(&self, index: usize) {
        *self.fail_on_call.lock().unwrap() = Some(index);
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn upload(
        &self,
        bucket: &str,
        object_name: &str,
        _file: &UploadFile,
    ) -> StoreResult<String> {
        let mut uploads = self.uploads.lock().unwrap();
        let call = uploads.len();
        uploads.push((bucket.to_string(), object_name.to_string()));

        if *self.fail_on_call.lock().unwrap() == Some(call) {
            return Err(StoreError::Api {
                status: 413,
                message: "Payload too large".to_string(),
            });
        }
        Ok(format!("https://cdn.test/{}/{}", bucket, object_name))
    }
}

/// Place search returning canned results
pub struct FakePlaces {
    response: Mutex<Option<Result<Vec<PlaceCandidate>, MapsError>>>,
    pub queries: Mutex<Vec<String>>,
}

impl FakePlaces {
    pub fn returning(addresses: &[&str]) -> Self {
        let candidates = addresses
            .iter()
            .map(|a| PlaceCandidate {
                formatted_address: a.to_string(),
            })
            .collect();
        Self {
            response: Mutex::new(Some(Ok(candidates))),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: MapsError) -> Self {
        Self {
            response: Mutex::new(Some(Err(error))),
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PlaceSearch for FakePlaces {
    async fn search_text(&self, query: &str) -> Result<Vec<PlaceCandidate>, MapsError> {
        self.queries.lock().unwrap().push(query.to_string());
        match self.response.lock().unwrap().take() {
            Some(response) => response,
            None => Ok(Vec::new()),
        }
    }
}

/// Drive-time estimator returning a fixed answer and counting calls
pub struct FakeDirections {
    minutes: Option<u32>,
    pub destinations: Mutex<Vec<String>>,
}

impl FakeDirections {
    pub fn returning(minutes: Option<u32>) -> Self {
        Self {
            minutes,
            destinations: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.destinations.lock().unwrap().len()
    }
}

#[async_trait]
impl DriveTimeEstimator for FakeDirections {
    async fn drive_time_minutes(&self, destination: &str) -> Option<u32> {
        self.destinations.lock().unwrap().push(destination.to_string());
        self.minutes
    }
}

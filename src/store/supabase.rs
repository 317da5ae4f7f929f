//! Supabase REST client
//!
//! Talks to the PostgREST endpoint for venue rows and to the Storage endpoint
//! for uploads. Every request carries the project key both as `apikey` and as
//! a bearer token.

use super::{ObjectStorage, StoreError, StoreResult, UploadFile, VenueStore};
use crate::venue::{Venue, VenueId};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};

/// Hosted venue store client
pub struct SupabaseClient {
    client: Client,
    config: SupabaseConfig,
}

/// Configuration for the Supabase client
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL (e.g., "https://abcd.supabase.co")
    pub base_url: String,
    /// Project API key
    pub api_key: String,
    /// Table holding venue rows
    pub table: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            api_key: String::new(),
            table: "venues".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl SupabaseClient {
    /// Create a new client with the given configuration
    pub fn new(mut config: SupabaseConfig) -> StoreResult<Self> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();

        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }

    fn rows_url(&self) -> String {
        format!("{}/rest/v1/{}", self.config.base_url, self.config.table)
    }

    /// Public URL of an object in a public bucket
    pub fn public_url(&self, bucket: &str, object_name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.base_url,
            bucket,
            urlencoding::encode(object_name)
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }

    async fn send(&self, request: RequestBuilder) -> StoreResult<Response> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(StoreError::from_send)?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(StoreError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }

    async fn single_row(response: Response) -> StoreResult<Venue> {
        let rows: Vec<Venue> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        rows.into_iter().next().ok_or(StoreError::EmptyResponse)
    }
}

#[async_trait]
impl VenueStore for SupabaseClient {
    async fn list_venues(&self) -> StoreResult<Vec<Venue>> {
        let request = self.client.get(self.rows_url()).query(&[("select", "*")]);
        let response = self.send(request).await?;

        let venues: Vec<Venue> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        tracing::debug!("Fetched {} venues", venues.len());
        Ok(venues)
    }

    async fn insert_venue(&self, venue: &Venue) -> StoreResult<Venue> {
        let request = self
            .client
            .post(self.rows_url())
            .header("Prefer", "return=representation")
            .json(venue);
        let response = self.send(request).await?;

        let stored = Self::single_row(response).await?;
        tracing::info!("Inserted venue {}", stored);
        Ok(stored)
    }

    async fn update_venue(&self, id: VenueId, venue: &Venue) -> StoreResult<Venue> {
        let request = self
            .client
            .patch(self.rows_url())
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(venue);
        let response = self.send(request).await?;

        let stored = Self::single_row(response).await?;
        tracing::info!("Updated venue {}", stored);
        Ok(stored)
    }
}

#[async_trait]
impl ObjectStorage for SupabaseClient {
    async fn upload(
        &self,
        bucket: &str,
        object_name: &str,
        file: &UploadFile,
    ) -> StoreResult<String> {
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.config.base_url,
            bucket,
            urlencoding::encode(object_name)
        );

        let request = self
            .client
            .post(&url)
            .header("Content-Type", &file.content_type)
            .header("x-upsert", "false")
            .body(file.bytes.clone());
        self.send(request).await?;

        tracing::debug!(
            "Uploaded {} ({} bytes) to {}/{}",
            file.file_name,
            file.bytes.len(),
            bucket,
            object_name
        );
        Ok(self.public_url(bucket, object_name))
    }
}

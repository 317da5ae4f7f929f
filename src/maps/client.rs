//! Google Maps REST API Client
//!
//! Places Text Search for location auto-fill and Routes `computeRoutes` for
//! drive times. Both use field masks so responses only carry what is read.

use super::{parse_duration_minutes, DriveTimeEstimator, MapsError, PlaceCandidate, PlaceSearch};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Google Maps client
pub struct GoogleMapsClient {
    client: Client,
    config: MapsConfig,
}

/// Configuration for the maps client
#[derive(Debug, Clone)]
pub struct MapsConfig {
    /// API key shared by both calls; `None` disables them
    pub api_key: Option<String>,
    /// Fixed origin address for drive times
    pub origin: String,
    /// Places API base URL
    pub places_base_url: String,
    /// Routes API base URL
    pub routes_base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            origin: String::new(),
            places_base_url: "https://places.googleapis.com".to_string(),
            routes_base_url: "https://routes.googleapis.com".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl GoogleMapsClient {
    /// Create a new maps client
    pub fn new(mut config: MapsConfig) -> Result<Self, MapsError> {
        config.api_key = config.api_key.filter(|k| !k.trim().is_empty());
        config.places_base_url = config.places_base_url.trim_end_matches('/').to_string();
        config.routes_base_url = config.routes_base_url.trim_end_matches('/').to_string();

        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &MapsConfig {
        &self.config
    }

    /// True when an API key is configured
    pub fn is_enabled(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, MapsError> {
        self.config.api_key.as_deref().ok_or(MapsError::MissingApiKey)
    }

    async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        url: &str,
        field_mask: &str,
        body: &B,
    ) -> Result<R, MapsError> {
        let api_key = self.api_key()?;

        let response = self
            .client
            .post(url)
            .header("X-Goog-Api-Key", api_key)
            .header("X-Goog-FieldMask", field_mask)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MapsError::Timeout
                } else {
                    MapsError::Request(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(MapsError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        response
            .json()
            .await
            .map_err(|e| MapsError::Decode(e.to_string()))
    }

    /// Duration of the first route, in minutes
    pub async fn compute_route_minutes(&self, destination: &str) -> Result<Option<u32>, MapsError> {
        let url = format!("{}/directions/v2:computeRoutes", self.config.routes_base_url);
        let body = RoutesRequest {
            origin: Waypoint {
                address: self.config.origin.clone(),
            },
            destination: Waypoint {
                address: destination.to_string(),
            },
            travel_mode: "DRIVE",
            routing_preference: "TRAFFIC_AWARE",
        };

        let response: RoutesResponse = self.post(&url, "routes.duration", &body).await?;

        Ok(response
            .routes
            .first()
            .and_then(|route| route.duration.as_deref())
            .and_then(parse_duration_minutes))
    }
}

#[async_trait]
impl PlaceSearch for GoogleMapsClient {
    async fn search_text(&self, query: &str) -> Result<Vec<PlaceCandidate>, MapsError> {
        let url = format!("{}/v1/places:searchText", self.config.places_base_url);
        let body = SearchTextRequest {
            text_query: query.to_string(),
        };

        let response: SearchTextResponse =
            self.post(&url, "places.formattedAddress", &body).await?;

        Ok(response
            .places
            .into_iter()
            .filter_map(|p| p.formatted_address)
            .map(|formatted_address| PlaceCandidate { formatted_address })
            .collect())
    }
}

#[async_trait]
impl DriveTimeEstimator for GoogleMapsClient {
    async fn drive_time_minutes(&self, destination: &str) -> Option<u32> {
        if !self.is_enabled() {
            tracing::debug!("No maps API key, skipping drive time for {:?}", destination);
            return None;
        }
        if self.config.origin.trim().is_empty() {
            tracing::warn!("No drive-time origin configured, skipping drive time");
            return None;
        }

        match self.compute_route_minutes(destination).await {
            Ok(Some(minutes)) => {
                tracing::debug!("Drive time to {:?}: {} mins", destination, minutes);
                Some(minutes)
            }
            Ok(None) => {
                tracing::warn!("No usable route to {:?}", destination);
                None
            }
            Err(e) => {
                tracing::error!("Drive time lookup for {:?} failed: {}", destination, e);
                None
            }
        }
    }
}

// ============================================
// Request/Response DTOs
// ============================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchTextRequest {
    text_query: String,
}

#[derive(Debug, Deserialize)]
struct SearchTextResponse {
    #[serde(default)]
    places: Vec<Place>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Place {
    formatted_address: Option<String>,
}

#[derive(Debug, Serialize)]
struct Waypoint {
    address: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RoutesRequest {
    origin: Waypoint,
    destination: Waypoint,
    travel_mode: &'static str,
    routing_preference: &'static str,
}

#[derive(Debug, Deserialize)]
struct RoutesResponse {
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    duration: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, api_key: Option<&str>) -> GoogleMapsClient {
        GoogleMapsClient::new(MapsConfig {
            api_key: api_key.map(str::to_string),
            origin: "Bristol Temple Meads".to_string(),
            places_base_url: server.uri(),
            routes_base_url: server.uri(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_blank_key_disables_client() {
        let client = GoogleMapsClient::new(MapsConfig {
            api_key: Some("  ".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert!(!client.is_enabled());
    }

    #[tokio::test]
    async fn test_search_text_returns_addresses_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/places:searchText"))
            .and(header("X-Goog-Api-Key", "k"))
            .and(header("X-Goog-FieldMask", "places.formattedAddress"))
            .and(body_json(serde_json::json!({"textQuery": "Orchard Barn"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "places": [
                    {"formattedAddress": "1 Orchard Lane, Frome"},
                    {"formattedAddress": "Orchard Barn, Devizes"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let results = client_for(&server, Some("k"))
            .search_text("Orchard Barn")
            .await
            .unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].formatted_address, "1 Orchard Lane, Frome");
    }

    #[tokio::test]
    async fn test_search_text_with_no_results() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let results = client_for(&server, Some("k")).search_text("zzz").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_text_without_key_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server, None).search_text("x").await.unwrap_err();
        assert!(matches!(err, MapsError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_drive_time_request_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/directions/v2:computeRoutes"))
            .and(header("X-Goog-FieldMask", "routes.duration"))
            .and(body_json(serde_json::json!({
                "origin": {"address": "Bristol Temple Meads"},
                "destination": {"address": "Frome"},
                "travelMode": "DRIVE",
                "routingPreference": "TRAFFIC_AWARE"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "routes": [{"duration": "2714s"}, {"duration": "9999s"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let minutes = client_for(&server, Some("k")).drive_time_minutes("Frome").await;
        assert_eq!(minutes, Some(45));
    }

    #[tokio::test]
    async fn test_drive_time_failures_yield_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;
        assert_eq!(
            client_for(&server, Some("k")).drive_time_minutes("Frome").await,
            None
        );

        let empty = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&empty)
            .await;
        assert_eq!(
            client_for(&empty, Some("k")).drive_time_minutes("Frome").await,
            None
        );
    }

    #[tokio::test]
    async fn test_drive_time_without_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        assert_eq!(client_for(&server, None).drive_time_minutes("Frome").await, None);
    }
}

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::error::Result;

/// A single candidate returned by the geocoding service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCandidate {
    pub lat: f64,
    pub lng: f64,
}

/// Boundary to the geocoding service: one free-text address in, zero or
/// more candidates out. The pipeline consumes only the first candidate.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> anyhow::Result<Vec<GeoCandidate>>;
}

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Google Maps Geocoding API client with a client-side request throttle.
pub struct GoogleGeocoder {
    client: reqwest::Client,
    api_key: String,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

impl GeocodeResponse {
    /// Maps the service response onto candidates. `ZERO_RESULTS` is an
    /// empty list, not an error; any other non-OK status is a service
    /// failure.
    fn into_candidates(self) -> anyhow::Result<Vec<GeoCandidate>> {
        match self.status.as_str() {
            "OK" => Ok(self
                .results
                .into_iter()
                .map(|r| GeoCandidate {
                    lat: r.geometry.location.lat,
                    lng: r.geometry.location.lng,
                })
                .collect()),
            "ZERO_RESULTS" => Ok(Vec::new()),
            status => anyhow::bail!(
                "geocoding service returned status {status}{}",
                self.error_message
                    .map(|m| format!(": {m}"))
                    .unwrap_or_default()
            ),
        }
    }
}

impl GoogleGeocoder {
    pub fn new(api_key: String, delay_ms: u64, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key,
            min_interval: Duration::from_millis(delay_ms),
            last_request: Mutex::new(None),
        })
    }

    /// Keeps at least `min_interval` between consecutive requests.
    async fn throttle(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn geocode(&self, address: &str) -> anyhow::Result<Vec<GeoCandidate>> {
        self.throttle().await;

        let response: GeocodeResponse = self
            .client
            .get(GEOCODE_URL)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let candidates = response.into_candidates()?;
        debug!("Geocoded \"{}\" with {} candidate(s)", address, candidates.len());
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_response_yields_candidates_in_order() {
        let response: GeocodeResponse = serde_json::from_str(
            r#"{
                "status": "OK",
                "results": [
                    {"geometry": {"location": {"lat": 40.0, "lng": -75.0}}},
                    {"geometry": {"location": {"lat": 41.0, "lng": -76.0}}}
                ]
            }"#,
        )
        .unwrap();

        let candidates = response.into_candidates().unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0], GeoCandidate { lat: 40.0, lng: -75.0 });
    }

    #[test]
    fn test_zero_results_is_an_empty_list() {
        let response: GeocodeResponse =
            serde_json::from_str(r#"{"status": "ZERO_RESULTS", "results": []}"#).unwrap();
        assert!(response.into_candidates().unwrap().is_empty());
    }

    #[test]
    fn test_error_status_is_a_service_failure() {
        let response: GeocodeResponse = serde_json::from_str(
            r#"{"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid."}"#,
        )
        .unwrap();

        let err = response.into_candidates().unwrap_err();
        assert!(err.to_string().contains("REQUEST_DENIED"));
        assert!(err.to_string().contains("API key is invalid"));
    }
}

use crate::config::PlacesSettings;
use crate::core::distance::search_radius_m;
use crate::models::{GeoBound, Place, PlaceReview, Position};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when querying the places provider
#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    #[serde(default)]
    results: Vec<NearbyResult>,
}

#[derive(Debug, Deserialize)]
struct NearbyResult {
    place_id: String,
    name: String,
    #[serde(default)]
    vicinity: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Position,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    result: PlaceDetails,
}

#[derive(Debug, Default, Deserialize)]
struct PlaceDetails {
    formatted_address: Option<String>,
    #[serde(default)]
    reviews: Vec<PlaceReview>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
}

/// Places provider client
///
/// Handles the map-provider lookups the page needs:
/// - Nearby restaurant search for a viewport, with reviews
/// - Reverse geocoding of a clicked coordinate
pub struct PlacesClient {
    base_url: String,
    api_key: String,
    language: Option<String>,
    max_radius_m: f64,
    client: Client,
}

impl PlacesClient {
    /// Create a new places client
    pub fn new(
        base_url: String,
        api_key: String,
        timeout: Duration,
        max_radius_m: f64,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            language: None,
            max_radius_m,
            client,
        })
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Build a client from settings, or `None` when no API key is configured
    pub fn from_settings(settings: &PlacesSettings) -> Result<Option<Self>, PlacesError> {
        let api_key = match settings.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => return Ok(None),
        };

        let client = Self::new(
            settings.endpoint.clone(),
            api_key,
            Duration::from_secs(settings.timeout_secs),
            settings.max_radius_m,
        )?;

        Ok(Some(match &settings.language {
            Some(language) => client.with_language(language.clone()),
            None => client,
        }))
    }

    fn url(&self, path: &str, params: &[(&str, String)]) -> String {
        let mut url = format!(
            "{}/{}?key={}",
            self.base_url.trim_end_matches('/'),
            path,
            urlencoding::encode(&self.api_key)
        );

        for (name, value) in params {
            url.push('&');
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }

        if let Some(language) = &self.language {
            url.push_str("&language=");
            url.push_str(&urlencoding::encode(language));
        }

        url
    }

    /// Perform a GET and check both the HTTP status and the provider status field
    async fn fetch<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T, PlacesError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(PlacesError::ApiError(format!(
                "Failed to fetch {}: {}",
                what,
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let status = json
            .get("status")
            .and_then(|s| s.as_str())
            .ok_or_else(|| PlacesError::InvalidResponse("Missing status field".into()))?;

        if status != "OK" && status != "ZERO_RESULTS" {
            let message = json
                .get("error_message")
                .and_then(|m| m.as_str())
                .unwrap_or("no error message");
            return Err(PlacesError::ApiError(format!("{} returned {}: {}", what, status, message)));
        }

        serde_json::from_value(json)
            .map_err(|e| PlacesError::InvalidResponse(format!("Failed to parse {}: {}", what, e)))
    }

    /// Search restaurants around the viewport
    ///
    /// The viewport is turned into its centre and the radius reaching its
    /// corners, capped by `max_radius_m`. Details (address and reviews) are
    /// fetched for every result; a place whose details fail keeps its
    /// short address and no reviews.
    pub async fn nearby_search(&self, bound: &GeoBound) -> Result<Vec<Place>, PlacesError> {
        let center = bound.center();
        let radius = search_radius_m(bound).min(self.max_radius_m).max(1.0);

        let url = self.url(
            "place/nearbysearch/json",
            &[
                ("location", format!("{},{}", center.lat, center.lng)),
                ("radius", format!("{}", radius.round() as u64)),
                ("type", "restaurant".to_string()),
            ],
        );

        tracing::debug!("Nearby search at {},{} radius {}m", center.lat, center.lng, radius.round());

        let nearby: NearbySearchResponse = self.fetch(&url, "nearby search").await?;

        let mut places = Vec::with_capacity(nearby.results.len());
        for result in nearby.results {
            let details = match self.place_details(&result.place_id).await {
                Ok(details) => details,
                Err(e) => {
                    tracing::warn!("Failed to fetch details for {}, using vicinity: {}", result.place_id, e);
                    PlaceDetails::default()
                }
            };

            places.push(Place {
                name: result.name,
                address: details.formatted_address.unwrap_or(result.vicinity),
                position: result.geometry.location,
                reviews: details.reviews,
            });
        }

        tracing::debug!("Nearby search returned {} places", places.len());

        Ok(places)
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let url = self.url(
            "place/details/json",
            &[
                ("place_id", place_id.to_string()),
                ("fields", "formatted_address,reviews".to_string()),
            ],
        );

        let details: DetailsResponse = self.fetch(&url, "place details").await?;
        Ok(details.result)
    }

    /// Resolve a coordinate into the first formatted address, if any
    pub async fn reverse_geocode(&self, position: Position) -> Result<Option<String>, PlacesError> {
        let url = self.url(
            "geocode/json",
            &[("latlng", format!("{},{}", position.lat, position.lng))],
        );

        let geocode: GeocodeResponse = self.fetch(&url, "reverse geocoding").await?;

        Ok(geocode.results.into_iter().next().map(|r| r.formatted_address))
    }
}

use serde::{Deserialize, Serialize};
use crate::core::{average_rating, slugify, Selection};
use crate::models::domain::{GeoBound, Position, Rating, Restaurant, StarFilterRange};

/// Restaurant as handed to the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantView {
    pub slug: String,
    pub name: String,
    pub address: String,
    pub position: Position,
    #[serde(rename = "averageRating")]
    pub average_rating: f64,
    pub ratings: Vec<Rating>,
}

impl From<&Restaurant> for RestaurantView {
    fn from(restaurant: &Restaurant) -> Self {
        Self {
            slug: slugify(&restaurant.name),
            name: restaurant.name.clone(),
            address: restaurant.address.clone(),
            position: restaurant.position,
            average_rating: average_rating(&restaurant.ratings),
            ratings: restaurant.ratings.clone(),
        }
    }
}

/// Selected, deduplicated restaurants for the current viewport and filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionResponse {
    pub restaurants: Vec<RestaurantView>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "duplicatesDropped")]
    pub duplicates_dropped: usize,
    #[serde(rename = "starRange")]
    pub star_range: StarFilterRange,
    pub viewport: Option<GeoBound>,
    #[serde(rename = "userPosition")]
    pub user_position: Option<Position>,
}

impl From<Selection> for SelectionResponse {
    fn from(selection: Selection) -> Self {
        let restaurants: Vec<RestaurantView> =
            selection.restaurants.iter().map(RestaurantView::from).collect();

        Self {
            total_results: restaurants.len(),
            restaurants,
            total_candidates: selection.total_candidates,
            duplicates_dropped: selection.duplicates_dropped,
            star_range: selection.star_range,
            viewport: selection.viewport,
            user_position: selection.user_position,
        }
    }
}

/// Result of a nearby places lookup merged into the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyPlacesResponse {
    pub discovered: usize,
    pub added: usize,
    pub selection: SelectionResponse,
}

/// Reverse geocoding result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressResponse {
    pub position: Position,
    pub address: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub restaurants: usize,
    #[serde(rename = "placesEnabled")]
    pub places_enabled: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

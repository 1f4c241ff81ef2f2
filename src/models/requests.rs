use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{GeoBound, NewRating, Position};

/// Viewport sent by the map page whenever its bounds change
///
/// GET /api/v1/restaurants?swLat=..&swLng=..&neLat=..&neLng=..
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ViewportQuery {
    #[serde(rename = "swLat")]
    pub sw_lat: f64,
    #[serde(rename = "swLng")]
    pub sw_lng: f64,
    #[serde(rename = "neLat")]
    pub ne_lat: f64,
    #[serde(rename = "neLng")]
    pub ne_lng: f64,
}

impl From<ViewportQuery> for GeoBound {
    fn from(query: ViewportQuery) -> Self {
        GeoBound::new(
            Position::new(query.sw_lat, query.sw_lng),
            Position::new(query.ne_lat, query.ne_lng),
        )
    }
}

/// Request to rate a restaurant
///
/// `target` is matched against addresses first, then names.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddRatingRequest {
    #[validate(length(min = 1))]
    pub target: String,
    pub stars: i64,
    pub comment: String,
}

impl AddRatingRequest {
    pub fn rating(&self) -> NewRating {
        NewRating::new(self.stars, self.comment.clone())
    }
}

/// Clicked coordinate to resolve into a street address
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReverseGeocodeQuery {
    pub lat: f64,
    pub lng: f64,
}

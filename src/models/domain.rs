use geo::{Coord, Rect};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A single star rating with its comment.
///
/// Ratings are only ever appended to a restaurant, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub stars: u8,
    pub comment: String,
}

/// Restaurant record as held by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    pub address: String,
    pub position: Position,
    #[serde(default)]
    pub ratings: Vec<Rating>,
}

/// Rectangular viewport, inclusive on every edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBound {
    pub southwest: Position,
    pub northeast: Position,
}

impl GeoBound {
    pub fn new(southwest: Position, northeast: Position) -> Self {
        Self { southwest, northeast }
    }

    pub fn south(&self) -> f64 {
        self.southwest.lat
    }

    pub fn north(&self) -> f64 {
        self.northeast.lat
    }

    pub fn west(&self) -> f64 {
        self.southwest.lng
    }

    pub fn east(&self) -> f64 {
        self.northeast.lng
    }

    /// Planar rectangle with x = longitude, y = latitude
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            Coord { x: self.west(), y: self.south() },
            Coord { x: self.east(), y: self.north() },
        )
    }

    pub fn center(&self) -> Position {
        let center = self.to_rect().center();
        Position::new(center.y, center.x)
    }
}

/// Inclusive star range used to filter aggregate ratings.
///
/// No ordering is enforced between `min` and `max`; an inverted range
/// simply selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarFilterRange {
    pub min: f64,
    pub max: f64,
}

impl StarFilterRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl Default for StarFilterRange {
    fn default() -> Self {
        Self { min: 0.0, max: 5.0 }
    }
}

/// Rating as submitted by a user, before it is accepted into the store
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewRating {
    #[validate(range(min = 1, max = 5))]
    pub stars: i64,
    #[validate(length(min = 1))]
    pub comment: String,
}

impl NewRating {
    pub fn new(stars: i64, comment: impl Into<String>) -> Self {
        Self {
            stars,
            comment: comment.into(),
        }
    }

    /// Trim surrounding whitespace so a blank comment fails validation
    pub fn normalized(self) -> Self {
        Self {
            stars: self.stars,
            comment: self.comment.trim().to_string(),
        }
    }

    /// Convert into a stored rating. Only meaningful once validated.
    pub(crate) fn into_rating(self) -> Rating {
        Rating {
            stars: self.stars.clamp(0, 5) as u8,
            comment: self.comment,
        }
    }
}

/// Restaurant added by hand from the map page
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewRestaurant {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
    #[serde(default)]
    #[validate(nested)]
    pub ratings: Vec<NewRating>,
}

impl NewRestaurant {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            lat: self.lat,
            lng: self.lng,
            ratings: self.ratings.into_iter().map(NewRating::normalized).collect(),
        }
    }
}

/// Place returned by the external nearby search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub address: String,
    pub position: Position,
    #[serde(default)]
    pub reviews: Vec<PlaceReview>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceReview {
    pub rating: i64,
    #[serde(default)]
    pub text: String,
}

use geo::{HaversineDistance, Point};
use crate::models::{GeoBound, Position};

/// Great-circle distance between two positions in meters
#[inline]
pub fn haversine_distance_m(from: &Position, to: &Position) -> f64 {
    Point::new(from.lng, from.lat).haversine_distance(&Point::new(to.lng, to.lat))
}

/// Radius in meters of the circle centred on the viewport that reaches its corners
///
/// Used to turn the rectangular map viewport into the centre + radius
/// query expected by nearby place searches.
pub fn search_radius_m(bound: &GeoBound) -> f64 {
    haversine_distance_m(&bound.center(), &bound.northeast)
}

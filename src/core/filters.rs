use crate::models::{GeoBound, Position, StarFilterRange};

/// Check if a position lies inside the viewport
///
/// All four edges are inclusive. A bound whose west edge is east of its
/// east edge contains nothing.
#[inline]
pub fn in_bounds(position: &Position, bound: &GeoBound) -> bool {
    position.lat >= bound.south()
        && position.lat <= bound.north()
        && position.lng >= bound.west()
        && position.lng <= bound.east()
}

/// Check if an aggregate rating falls within the star filter
#[inline]
pub fn in_range(rating: f64, range: &StarFilterRange) -> bool {
    rating >= range.min && rating <= range.max
}

// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{GeoBound, NewRating, NewRestaurant, Place, PlaceReview, Position, Rating, Restaurant, StarFilterRange};
pub use requests::{AddRatingRequest, ReverseGeocodeQuery, ViewportQuery};
pub use responses::{AddressResponse, ErrorResponse, HealthResponse, NearbyPlacesResponse, RestaurantView, SelectionResponse};

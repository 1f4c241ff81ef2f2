// Service exports
pub mod places;
pub mod seed;

pub use places::{PlacesClient, PlacesError};
pub use seed::{load_seed, parse_seed, SeedError};

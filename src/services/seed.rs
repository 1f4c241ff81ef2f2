use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use crate::models::{Position, Rating, Restaurant};

/// Errors that can occur while loading the seed dataset
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid seed data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid rating for {restaurant}: {stars} stars")]
    InvalidRating { restaurant: String, stars: i64 },
}

/// Record layout of the static restaurant dataset
#[derive(Debug, Deserialize)]
struct SeedRestaurant {
    #[serde(rename = "restaurantName")]
    restaurant_name: String,
    address: String,
    lat: f64,
    long: f64,
    #[serde(default)]
    ratings: Vec<SeedRating>,
}

#[derive(Debug, Deserialize)]
struct SeedRating {
    stars: i64,
    #[serde(default)]
    comment: String,
}

impl TryFrom<SeedRestaurant> for Restaurant {
    type Error = SeedError;

    fn try_from(seed: SeedRestaurant) -> Result<Self, Self::Error> {
        let mut ratings = Vec::with_capacity(seed.ratings.len());
        for rating in seed.ratings {
            if !(0..=5).contains(&rating.stars) {
                return Err(SeedError::InvalidRating {
                    restaurant: seed.restaurant_name,
                    stars: rating.stars,
                });
            }
            ratings.push(Rating {
                stars: rating.stars as u8,
                comment: rating.comment,
            });
        }

        Ok(Restaurant {
            name: seed.restaurant_name,
            address: seed.address,
            position: Position::new(seed.lat, seed.long),
            ratings,
        })
    }
}

/// Parse the seed dataset from its JSON text
///
/// Star counts outside 0..=5 reject the whole dataset.
pub fn parse_seed(json: &str) -> Result<Vec<Restaurant>, SeedError> {
    let records: Vec<SeedRestaurant> = serde_json::from_str(json)?;
    records.into_iter().map(Restaurant::try_from).collect()
}

/// Read the seed dataset from disk
pub fn load_seed<P: AsRef<Path>>(path: P) -> Result<Vec<Restaurant>, SeedError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let restaurants = parse_seed(&json)?;

    tracing::debug!("Loaded {} seed restaurants from {}", restaurants.len(), path.display());

    Ok(restaurants)
}

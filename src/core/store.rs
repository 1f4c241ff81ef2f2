use thiserror::Error;
use validator::Validate;
use crate::models::{NewRating, NewRestaurant, Place, Position, Rating, Restaurant};

/// Errors raised when mutating the restaurant store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Restaurant not found: {0}")]
    NotFound(String),
}

/// In-memory, append-only collection of restaurants
///
/// Seeded once at startup, then grown by user submissions and nearby
/// place lookups. Nothing is ever removed and nothing is written back.
#[derive(Debug, Clone, Default)]
pub struct RestaurantStore {
    restaurants: Vec<Restaurant>,
}

impl RestaurantStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(restaurants: Vec<Restaurant>) -> Self {
        Self { restaurants }
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    pub fn contains_address(&self, address: &str) -> bool {
        self.restaurants.iter().any(|r| r.address == address)
    }

    /// Resolve a rating target: address first, then display name
    fn find_index(&self, target: &str) -> Option<usize> {
        self.restaurants
            .iter()
            .position(|r| r.address == target)
            .or_else(|| self.restaurants.iter().position(|r| r.name == target))
    }

    /// Append a rating to the restaurant matching `target`
    ///
    /// The rating is validated before anything is touched; on error the
    /// store is unchanged.
    pub fn add_rating(&mut self, target: &str, rating: NewRating) -> Result<&Restaurant, StoreError> {
        let rating = rating.normalized();
        rating.validate()?;

        let index = self
            .find_index(target)
            .ok_or_else(|| StoreError::NotFound(target.to_string()))?;

        let restaurant = &mut self.restaurants[index];
        restaurant.ratings.push(rating.into_rating());

        tracing::debug!(
            "Added rating to {} ({} ratings)",
            restaurant.name,
            restaurant.ratings.len()
        );

        Ok(&self.restaurants[index])
    }

    /// Append a restaurant created by the user
    pub fn add_custom_restaurant(&mut self, restaurant: NewRestaurant) -> Result<&Restaurant, StoreError> {
        let restaurant = restaurant.normalized();
        restaurant.validate()?;

        tracing::debug!("Adding custom restaurant {} at {}", restaurant.name, restaurant.address);

        self.restaurants.push(Restaurant {
            name: restaurant.name,
            address: restaurant.address,
            position: Position::new(restaurant.lat, restaurant.lng),
            ratings: restaurant
                .ratings
                .into_iter()
                .map(NewRating::into_rating)
                .collect(),
        });

        Ok(&self.restaurants[self.restaurants.len() - 1])
    }

    /// Merge places found by a nearby search
    ///
    /// Places whose address is already known, or that have no address,
    /// are skipped. Reviews outside 1..=5 stars are dropped.
    /// Returns the number of restaurants appended.
    pub fn merge_places(&mut self, places: Vec<Place>) -> usize {
        let mut added = 0;

        for place in places {
            let address = place.address.trim();
            if address.is_empty() || self.contains_address(address) {
                continue;
            }

            let ratings: Vec<Rating> = place
                .reviews
                .into_iter()
                .filter(|review| (1..=5).contains(&review.rating))
                .map(|review| Rating {
                    stars: review.rating as u8,
                    comment: review.text,
                })
                .collect();

            self.restaurants.push(Restaurant {
                name: place.name,
                address: address.to_string(),
                position: place.position,
                ratings,
            });
            added += 1;
        }

        if added > 0 {
            tracing::debug!("Merged {} places into store ({} restaurants)", added, self.len());
        }

        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlaceReview;

    fn create_store() -> RestaurantStore {
        RestaurantStore::from_seed(vec![
            Restaurant {
                name: "Bronco".to_string(),
                address: "39 Rue des Petites Écuries, 75010 Paris".to_string(),
                position: Position::new(48.8737815, 2.3501649),
                ratings: vec![Rating {
                    stars: 4,
                    comment: "Un excellent restaurant, j'y reviendrai !".to_string(),
                }],
            },
            Restaurant {
                name: "Babalou".to_string(),
                address: "4 Rue Lamarck, 75018 Paris".to_string(),
                position: Position::new(48.8865035, 2.3442197),
                ratings: vec![],
            },
        ])
    }

    fn create_place(name: &str, address: &str, reviews: Vec<PlaceReview>) -> Place {
        Place {
            name: name.to_string(),
            address: address.to_string(),
            position: Position::new(48.87, 2.35),
            reviews,
        }
    }

    #[test]
    fn test_add_rating_by_address() {
        let mut store = create_store();

        let restaurant = store
            .add_rating("4 Rue Lamarck, 75018 Paris", NewRating::new(5, "Superbe vue"))
            .unwrap();

        assert_eq!(restaurant.name, "Babalou");
        assert_eq!(restaurant.ratings.len(), 1);
    }

    #[test]
    fn test_add_rating_by_name_appends_in_order() {
        let mut store = create_store();

        store.add_rating("Bronco", NewRating::new(2, "Trop cher")).unwrap();

        let ratings = &store.restaurants()[0].ratings;
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[0].stars, 4);
        assert_eq!(ratings[1].stars, 2);
        assert_eq!(ratings[1].comment, "Trop cher");
    }

    #[test]
    fn test_add_rating_rejects_invalid_input() {
        let mut store = create_store();

        assert!(matches!(
            store.add_rating("Bronco", NewRating::new(0, "Nul")),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            store.add_rating("Bronco", NewRating::new(4, "")),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            store.add_rating("Bronco", NewRating::new(4, "  \n ")),
            Err(StoreError::Validation(_))
        ));

        assert_eq!(store.len(), 2);
        assert_eq!(store.restaurants()[0].ratings.len(), 1);
    }

    #[test]
    fn test_add_rating_unknown_target() {
        let mut store = create_store();

        assert!(matches!(
            store.add_rating("Nowhere", NewRating::new(3, "Ok")),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_add_custom_restaurant() {
        let mut store = create_store();

        let added = store
            .add_custom_restaurant(NewRestaurant {
                name: "  Chez Gladines ".to_string(),
                address: "30 Rue des Cinq Diamants, 75013 Paris".to_string(),
                lat: 48.8272,
                lng: 2.3492,
                ratings: vec![NewRating::new(5, "Copieux")],
            })
            .unwrap();

        assert_eq!(added.name, "Chez Gladines");
        assert_eq!(added.ratings.len(), 1);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_add_custom_restaurant_rejects_invalid_rating() {
        let mut store = create_store();

        let result = store.add_custom_restaurant(NewRestaurant {
            name: "Chez Gladines".to_string(),
            address: "30 Rue des Cinq Diamants, 75013 Paris".to_string(),
            lat: 48.8272,
            lng: 2.3492,
            ratings: vec![NewRating::new(9, "Trop bien")],
        });

        assert!(result.is_err());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_merge_places_skips_known_addresses() {
        let mut store = create_store();

        let added = store.merge_places(vec![
            create_place("Bronco bis", "39 Rue des Petites Écuries, 75010 Paris", vec![]),
            create_place("Le Petit Cambodge", "20 Rue Alibert, 75010 Paris", vec![]),
            create_place("Le Petit Cambodge", "20 Rue Alibert, 75010 Paris", vec![]),
            create_place("Nameless", "  ", vec![]),
        ]);

        assert_eq!(added, 1);
        assert_eq!(store.len(), 3);
        assert_eq!(store.restaurants()[2].name, "Le Petit Cambodge");
    }

    #[test]
    fn test_merge_places_maps_reviews() {
        let mut store = RestaurantStore::new();

        store.merge_places(vec![create_place(
            "Le Petit Cambodge",
            "20 Rue Alibert, 75010 Paris",
            vec![
                PlaceReview { rating: 5, text: "Délicieux".to_string() },
                PlaceReview { rating: 0, text: "Invalid".to_string() },
                PlaceReview { rating: 3, text: String::new() },
            ],
        )]);

        let ratings = &store.restaurants()[0].ratings;
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[0], Rating { stars: 5, comment: "Délicieux".to_string() });
        assert_eq!(ratings[1].stars, 3);
    }
}

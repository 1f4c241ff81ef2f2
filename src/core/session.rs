use crate::models::{GeoBound, NewRating, NewRestaurant, Place, Position, Restaurant, StarFilterRange};
use crate::core::{
    selector::select_visible,
    store::{RestaurantStore, StoreError},
};

/// Events raised by the map page
#[derive(Debug, Clone)]
pub enum MapEvent {
    /// The visible map region moved or was resized
    ViewportChanged(GeoBound),
    /// The user changed the star filter
    StarRangeChanged(StarFilterRange),
    /// A rating was submitted for the restaurant matching `target`
    RatingSubmitted { target: String, rating: NewRating },
    /// A restaurant was added by clicking on the map
    RestaurantAdded(NewRestaurant),
    /// A nearby place search completed
    PlacesDiscovered(Vec<Place>),
    /// Geolocation update; `None` when the position is unavailable
    UserPositionChanged(Option<Position>),
}

/// Restaurants to render, with the state they were computed from
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub restaurants: Vec<Restaurant>,
    pub total_candidates: usize,
    pub duplicates_dropped: usize,
    pub star_range: StarFilterRange,
    pub viewport: Option<GeoBound>,
    pub user_position: Option<Position>,
}

/// State of one map page
///
/// Owns the restaurant store and the star filter. Every event is applied
/// synchronously and answered with a fresh selection; a rejected mutation
/// leaves the session untouched.
#[derive(Debug, Clone)]
pub struct MapSession {
    store: RestaurantStore,
    star_range: StarFilterRange,
    viewport: Option<GeoBound>,
    user_position: Option<Position>,
}

impl MapSession {
    pub fn new(store: RestaurantStore, star_range: StarFilterRange) -> Self {
        Self {
            store,
            star_range,
            viewport: None,
            user_position: None,
        }
    }

    pub fn store(&self) -> &RestaurantStore {
        &self.store
    }

    pub fn star_range(&self) -> StarFilterRange {
        self.star_range
    }

    pub fn viewport(&self) -> Option<GeoBound> {
        self.viewport
    }

    pub fn user_position(&self) -> Option<Position> {
        self.user_position
    }

    /// Apply an event and recompute the selection
    pub fn handle(&mut self, event: MapEvent) -> Result<Selection, StoreError> {
        match event {
            MapEvent::ViewportChanged(bound) => {
                tracing::trace!("Viewport changed: {:?}", bound);
                self.viewport = Some(bound);
            }
            MapEvent::StarRangeChanged(range) => {
                if range.min > range.max {
                    tracing::debug!("Star range {} > {} selects nothing", range.min, range.max);
                }
                self.star_range = range;
            }
            MapEvent::RatingSubmitted { target, rating } => {
                self.store.add_rating(&target, rating)?;
            }
            MapEvent::RestaurantAdded(restaurant) => {
                self.store.add_custom_restaurant(restaurant)?;
            }
            MapEvent::PlacesDiscovered(places) => {
                let found = places.len();
                let added = self.store.merge_places(places);
                tracing::debug!("Nearby search found {} places, {} new", found, added);
            }
            MapEvent::UserPositionChanged(position) => {
                if position.is_none() {
                    tracing::debug!("User position unavailable, hiding user marker");
                }
                self.user_position = position;
            }
        }

        Ok(self.selection())
    }

    /// Selection for the current viewport and star range
    ///
    /// Empty until the first viewport is known.
    pub fn selection(&self) -> Selection {
        let (restaurants, total_candidates, duplicates_dropped): (Vec<Restaurant>, usize, usize) = match &self.viewport {
            Some(bound) => {
                let result = select_visible(self.store.restaurants(), bound, &self.star_range);
                (
                    result.restaurants.into_iter().cloned().collect(),
                    result.total_candidates,
                    result.duplicates_dropped,
                )
            }
            None => (Vec::new(), 0, 0),
        };

        Selection {
            restaurants,
            total_candidates,
            duplicates_dropped,
            star_range: self.star_range,
            viewport: self.viewport,
            user_position: self.user_position,
        }
    }
}

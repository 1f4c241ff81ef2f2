use crate::models::{GeoBound, Restaurant, StarFilterRange};
use crate::core::{
    dedupe::dedupe,
    filters::{in_bounds, in_range},
    rating::average_rating,
};

/// Result of the selection pipeline
#[derive(Debug)]
pub struct SelectionResult<'a> {
    pub restaurants: Vec<&'a Restaurant>,
    pub total_candidates: usize,
    pub duplicates_dropped: usize,
}

/// Select the restaurants visible in `bound` whose aggregate rating is in `range`
///
/// Stable filter: relative order of the input is preserved.
pub fn select<'a>(
    restaurants: &'a [Restaurant],
    bound: &GeoBound,
    range: &StarFilterRange,
) -> Vec<&'a Restaurant> {
    restaurants
        .iter()
        // Stage 1: viewport containment
        .filter(|restaurant| in_bounds(&restaurant.position, bound))
        // Stage 2: star range on the aggregate rating
        .filter(|restaurant| in_range(average_rating(&restaurant.ratings), range))
        .collect()
}

/// Run the full pipeline shown to the user: select, then dedupe by address
pub fn select_visible<'a>(
    restaurants: &'a [Restaurant],
    bound: &GeoBound,
    range: &StarFilterRange,
) -> SelectionResult<'a> {
    let selected = select(restaurants, bound, range);
    let selected_count = selected.len();

    // Stage 3: address deduplication
    let deduped = dedupe(selected);

    SelectionResult {
        duplicates_dropped: selected_count - deduped.len(),
        restaurants: deduped,
        total_candidates: restaurants.len(),
    }
}

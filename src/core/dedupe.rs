use std::collections::HashSet;
use crate::models::Restaurant;

/// Remove restaurants sharing an address, keeping the first occurrence
///
/// Order is preserved. Distinct restaurants that happen to share a
/// street address are merged into the first one.
pub fn dedupe<'a, I>(restaurants: I) -> Vec<&'a Restaurant>
where
    I: IntoIterator<Item = &'a Restaurant>,
{
    let mut seen: HashSet<&'a str> = HashSet::new();

    restaurants
        .into_iter()
        .filter(|&restaurant| seen.insert(restaurant.address.as_str()))
        .collect()
}

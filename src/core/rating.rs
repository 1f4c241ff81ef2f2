use crate::models::Rating;

/// Calculate the aggregate star rating of a restaurant
///
/// Returns the arithmetic mean of `stars`, rounded to one decimal place
/// (half away from zero). A restaurant without ratings averages to 0.
pub fn average_rating(ratings: &[Rating]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }

    let total: u32 = ratings.iter().map(|rating| u32::from(rating.stars)).sum();
    let mean = f64::from(total) / ratings.len() as f64;

    round_to_tenth(mean)
}

#[inline]
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(stars: &[u8]) -> Vec<Rating> {
        stars
            .iter()
            .map(|&stars| Rating {
                stars,
                comment: format!("{} stars", stars),
            })
            .collect()
    }

    #[test]
    fn test_empty_ratings_average_to_zero() {
        assert_eq!(average_rating(&[]), 0.0);
    }

    #[test]
    fn test_average_of_two() {
        assert_eq!(average_rating(&ratings(&[5, 3])), 4.0);
    }

    #[test]
    fn test_average_rounds_to_one_decimal() {
        // 13 / 3 = 4.333..
        assert_eq!(average_rating(&ratings(&[4, 4, 5])), 4.3);
        // 17 / 4 = 4.25, half away from zero
        assert_eq!(average_rating(&ratings(&[5, 4, 4, 4])), 4.3);
        // 2 / 3 = 0.666..
        assert_eq!(average_rating(&ratings(&[0, 1, 1])), 0.7);
    }

    #[test]
    fn test_single_zero_star_rating() {
        assert_eq!(average_rating(&ratings(&[0])), 0.0);
    }
}

//! Booking validation and listing metrics. Pure functions over data already
//! fetched from the store; recomputed on every call, never cached.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::errors::ValidationError;
use crate::models::Review;

/// Rejects a date range where checkout does not come strictly after
/// check-in. Equal dates are a zero-night stay and are invalid.
pub fn validate_booking_dates(
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<(), ValidationError> {
    if check_in >= check_out {
        return Err(ValidationError::new(
            "Check-out date must be after check-in date.",
        ));
    }
    Ok(())
}

pub fn validate_price(price_per_night: &BigDecimal) -> Result<(), ValidationError> {
    if price_per_night <= &BigDecimal::from(0) {
        return Err(ValidationError::new("price_per_night must be positive."));
    }
    Ok(())
}

/// Number of nights covered by a booking. Callers validate the range first.
pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Booking price: nightly rate times the number of nights.
pub fn total_price(
    price_per_night: &BigDecimal,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> BigDecimal {
    price_per_night * BigDecimal::from(nights(check_in, check_out))
}

/// Mean rating rounded to two decimal places, or `None` when the listing
/// has no reviews yet. Never returns zero for an unreviewed listing.
pub fn average_rating<'a>(reviews: impl IntoIterator<Item = &'a Review>) -> Option<f64> {
    let ratings: Vec<i64> = reviews.into_iter().map(|r| i64::from(r.rating)).collect();
    if ratings.is_empty() {
        return None;
    }
    let mean = ratings.iter().sum::<i64>() as f64 / ratings.len() as f64;
    Some((mean * 100.0).round() / 100.0)
}

pub fn total_reviews<'a>(reviews: impl IntoIterator<Item = &'a Review>) -> i64 {
    reviews.into_iter().count() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn review_rated(rating: i32) -> Review {
        let now = Utc::now().naive_utc();
        Review {
            id: Uuid::new_v4(),
            listing_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            rating,
            comment: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn checkout_after_checkin_is_accepted() {
        assert!(validate_booking_dates(date(2024, 5, 10), date(2024, 5, 12)).is_ok());
    }

    #[test]
    fn equal_dates_are_rejected() {
        assert!(validate_booking_dates(date(2024, 5, 10), date(2024, 5, 10)).is_err());
    }

    #[test]
    fn reversed_dates_are_rejected() {
        assert!(validate_booking_dates(date(2024, 5, 12), date(2024, 5, 10)).is_err());
    }

    #[test]
    fn non_positive_price_is_rejected() {
        assert!(validate_price(&BigDecimal::from(0)).is_err());
        assert!(validate_price(&BigDecimal::from(-10)).is_err());
        assert!(validate_price(&BigDecimal::from(50)).is_ok());
    }

    #[test]
    fn total_price_is_rate_times_nights() {
        let price = total_price(&BigDecimal::from(100), date(2024, 5, 10), date(2024, 5, 12));
        assert_eq!(price, BigDecimal::from(200));
    }

    #[test]
    fn average_of_three_four_five_is_four() {
        let reviews: Vec<_> = [3, 4, 5].into_iter().map(review_rated).collect();
        assert_eq!(average_rating(&reviews), Some(4.0));
        assert_eq!(total_reviews(&reviews), 3);
    }

    #[test]
    fn average_of_one_and_five_is_three() {
        let reviews: Vec<_> = [1, 5].into_iter().map(review_rated).collect();
        assert_eq!(average_rating(&reviews), Some(3.0));
        assert_eq!(total_reviews(&reviews), 2);
    }

    #[test]
    fn average_rounds_to_two_decimals() {
        let reviews: Vec<_> = [5, 4, 4].into_iter().map(review_rated).collect();
        assert_eq!(average_rating(&reviews), Some(4.33));
    }

    #[test]
    fn no_reviews_yields_no_rating_not_zero() {
        assert_eq!(average_rating(&[]), None);
        assert_eq!(total_reviews(&[]), 0);
    }

    #[test]
    fn metrics_are_idempotent_over_unchanged_reviews() {
        let reviews: Vec<_> = [2, 3, 5].into_iter().map(review_rated).collect();
        let first = (average_rating(&reviews), total_reviews(&reviews));
        let second = (average_rating(&reviews), total_reviews(&reviews));
        assert_eq!(first, second);
    }
}

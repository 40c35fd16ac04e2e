//! Wire representations. Storage rows map to nested response shapes here:
//! a review carries its author, a listing carries its reviews plus derived
//! metrics, and a booking carries its full listing and user.

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use uuid::Uuid;

use crate::domain;
use crate::models::{Booking, Listing, Review, User};

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub user: UserResponse,
    pub rating: i32,
    pub comment: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

pub fn review_response(review: Review, user: User) -> ReviewResponse {
    ReviewResponse {
        id: review.id,
        user: user.into(),
        rating: review.rating,
        comment: review.comment,
        created_at: review.created_at,
        updated_at: review.updated_at,
    }
}

#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub price_per_night: BigDecimal,
    pub available: bool,
    pub max_guests: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub reviews: Vec<ReviewResponse>,
    pub average_rating: Option<f64>,
    pub total_reviews: i64,
}

/// Builds the nested listing shape; the metrics are recomputed from the
/// supplied review set on every call.
pub fn listing_response(listing: Listing, reviews: Vec<(Review, User)>) -> ListingResponse {
    let average_rating = domain::average_rating(reviews.iter().map(|(review, _)| review));
    let total_reviews = domain::total_reviews(reviews.iter().map(|(review, _)| review));
    ListingResponse {
        id: listing.id,
        title: listing.title,
        description: listing.description,
        location: listing.location,
        price_per_night: listing.price_per_night,
        available: listing.available,
        max_guests: listing.max_guests,
        created_at: listing.created_at,
        updated_at: listing.updated_at,
        reviews: reviews
            .into_iter()
            .map(|(review, user)| review_response(review, user))
            .collect(),
        average_rating,
        total_reviews,
    }
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub listing: ListingResponse,
    pub user: UserResponse,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: String,
    pub total_price: BigDecimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

pub fn booking_response(
    booking: Booking,
    listing: Listing,
    listing_reviews: Vec<(Review, User)>,
    user: User,
) -> BookingResponse {
    BookingResponse {
        id: booking.id,
        listing: listing_response(listing, listing_reviews),
        user: user.into(),
        check_in: booking.check_in,
        check_out: booking.check_out,
        status: booking.status,
        total_price: booking.total_price,
        created_at: booking.created_at,
        updated_at: booking.updated_at,
    }
}

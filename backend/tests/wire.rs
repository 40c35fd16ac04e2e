//! Wire-shape tests for the nested response representations.

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, Utc};
use serde_json::json;
use uuid::Uuid;

use homestay_backend::booking::CreateBookingRequest;
use homestay_backend::models::{Booking, Listing, Review, User};
use homestay_backend::serializers;

fn sample_user(name: &str) -> User {
    let now = Utc::now().naive_utc();
    User {
        id: Uuid::new_v4(),
        username: name.to_string(),
        email: format!("{}@example.com", name),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        created_at: now,
        updated_at: now,
    }
}

fn sample_listing(price_per_night: i64) -> Listing {
    let now = Utc::now().naive_utc();
    Listing {
        id: Uuid::new_v4(),
        title: "Loft in Denver, CO".to_string(),
        description: "Bright and airy.".to_string(),
        location: "Denver, CO".to_string(),
        price_per_night: BigDecimal::from(price_per_night),
        available: true,
        max_guests: 4,
        created_at: now,
        updated_at: now,
    }
}

fn sample_review(listing: &Listing, user: &User, rating: i32) -> Review {
    let now = Utc::now().naive_utc();
    Review {
        id: Uuid::new_v4(),
        listing_id: listing.id,
        user_id: user.id,
        rating,
        comment: "Great place to stay!".to_string(),
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn listing_nests_reviews_and_derived_metrics() {
    let listing = sample_listing(100);
    let alice = sample_user("alice");
    let bob = sample_user("bob");
    let reviews = vec![
        (sample_review(&listing, &alice, 1), alice.clone()),
        (sample_review(&listing, &bob, 5), bob.clone()),
    ];

    let response = serializers::listing_response(listing, reviews);
    assert_eq!(response.average_rating, Some(3.0));
    assert_eq!(response.total_reviews, 2);
    assert_eq!(response.reviews.len(), 2);
    assert_eq!(response.reviews[0].user.username, "alice");
}

#[test]
fn unreviewed_listing_serializes_null_rating_not_zero() {
    let response = serializers::listing_response(sample_listing(100), Vec::new());
    let value = serde_json::to_value(&response).unwrap();
    assert!(value["average_rating"].is_null());
    assert_eq!(value["total_reviews"], 0);
}

#[test]
fn booking_nests_full_listing_and_user() {
    let listing = sample_listing(100);
    let user = sample_user("carol");
    let now = Utc::now().naive_utc();
    let booking = Booking {
        id: Uuid::new_v4(),
        listing_id: listing.id,
        user_id: user.id,
        check_in: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
        check_out: NaiveDate::from_ymd_opt(2024, 5, 12).unwrap(),
        status: "pending".to_string(),
        total_price: BigDecimal::from(200),
        created_at: now,
        updated_at: now,
    };

    let response = serializers::booking_response(booking, listing.clone(), Vec::new(), user.clone());
    assert_eq!(response.user.id, user.id);
    assert_eq!(response.listing.id, listing.id);
    assert_eq!(response.status, "pending");
    assert_eq!(response.total_price, BigDecimal::from(200));
}

#[test]
fn booking_write_shape_carries_no_user_field() {
    // a client-supplied user is ignored at the type level; the booking user
    // comes from the authenticated requester
    let request: CreateBookingRequest = serde_json::from_value(json!({
        "listing_id": Uuid::new_v4(),
        "check_in": "2024-05-10",
        "check_out": "2024-05-12",
        "user": "someone-else",
    }))
    .unwrap();
    assert_eq!(
        request.check_in,
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    );
}

//! Seeds the database with synthetic users, listings, bookings, and
//! reviews for development and demo environments. Existing data is wiped
//! first via the store's cascade delete.

use bigdecimal::BigDecimal;
use chrono::{Duration, Utc};
use clap::Parser;
use rand::Rng;

use homestay_backend::config::AppConfig;
use homestay_backend::domain;
use homestay_backend::models::BookingStatus;
use homestay_backend::store::{NewBooking, NewListing, NewReview, NewUser, Store};

const PROPERTY_TYPES: &[&str] = &[
    "Apartment", "House", "Villa", "Condo", "Studio", "Loft", "Cottage",
];

const LOCATIONS: &[&str] = &[
    "New York, NY",
    "Los Angeles, CA",
    "Chicago, IL",
    "Houston, TX",
    "Phoenix, AZ",
    "Philadelphia, PA",
    "San Antonio, TX",
    "San Diego, CA",
    "Dallas, TX",
    "San Jose, CA",
    "Austin, TX",
    "Jacksonville, FL",
    "Fort Worth, TX",
    "Columbus, OH",
    "Charlotte, NC",
    "San Francisco, CA",
    "Indianapolis, IN",
    "Seattle, WA",
    "Denver, CO",
    "Washington, DC",
];

const FIRST_NAMES: &[&str] = &[
    "James", "Maria", "Robert", "Linda", "Michael", "Sofia", "David", "Emma", "Daniel", "Olivia",
    "Kevin", "Amara", "Lucas", "Priya", "Tomas", "Hana",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Garcia", "Johnson", "Chen", "Williams", "Patel", "Brown", "Kim", "Jones", "Novak",
    "Miller", "Okafor", "Davis", "Silva", "Wilson", "Haddad",
];

const DESCRIPTIONS: &[&str] = &[
    "Bright and airy space just minutes from the city center, with fast wifi and a fully equipped kitchen.",
    "Quiet retreat on a tree-lined street. Freshly renovated, with a private entrance and free parking.",
    "Spacious open-plan home with plenty of natural light, a washer/dryer, and room for the whole group.",
    "Cozy spot close to restaurants and nightlife. Comfortable beds, blackout curtains, and a great shower.",
    "Stylish interior with a balcony overlooking the neighborhood. Self check-in and flexible arrival times.",
    "Family-friendly home with a backyard, board games, and a well-stocked kitchen for longer stays.",
    "Modern unit in a secure building with an elevator, gym access, and a workspace suited for remote work.",
    "Charming older property full of character, walking distance to public transport and local markets.",
];

const REVIEW_COMMENTS: &[&str] = &[
    "Great place to stay! Highly recommended.",
    "Beautiful location and excellent amenities.",
    "Perfect for a weekend getaway.",
    "Clean and comfortable, exactly as described.",
    "Amazing views and great service.",
    "Would definitely stay here again.",
    "Nice place but could use some improvements.",
    "Good value for money.",
    "Excellent location, close to everything.",
    "Very comfortable and well-equipped.",
];

#[derive(Parser)]
#[command(
    name = "seed",
    about = "Seed the database with sample listings, bookings, and reviews"
)]
struct SeedArgs {
    /// Number of listings to create
    #[arg(long, default_value_t = 20)]
    listings: usize,

    /// Number of users to create
    #[arg(long, default_value_t = 10)]
    users: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args = SeedArgs::parse();
    let config = AppConfig::load()?;
    let mut store = Store::connect(&config.database_url)?;
    let mut rng = rand::thread_rng();

    log::info!("Clearing existing data...");
    store.delete_all()?;

    log::info!("Creating users...");
    let mut users = Vec::with_capacity(args.users);
    for i in 0..args.users {
        let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
        let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
        let username = format!("{}{}{}", first.to_lowercase(), last.to_lowercase(), i);
        let user = store.create_user(NewUser {
            email: format!("{}@example.com", username),
            username,
            first_name: first.to_string(),
            last_name: last.to_string(),
        })?;
        users.push(user);
    }

    log::info!("Creating listings...");
    let mut listings = Vec::with_capacity(args.listings);
    for _ in 0..args.listings {
        let property_type = PROPERTY_TYPES[rng.gen_range(0..PROPERTY_TYPES.len())];
        let location = LOCATIONS[rng.gen_range(0..LOCATIONS.len())];
        let price_cents: i64 = rng.gen_range(5_000..=50_000);
        let listing = store.create_listing(NewListing {
            title: format!("{} in {}", property_type, location),
            description: DESCRIPTIONS[rng.gen_range(0..DESCRIPTIONS.len())].to_string(),
            location: location.to_string(),
            price_per_night: BigDecimal::new(price_cents.into(), 2),
            available: rng.gen_bool(0.75),
            max_guests: rng.gen_range(1..=8),
        })?;
        listings.push(listing);
    }

    if !users.is_empty() && !listings.is_empty() {
        log::info!("Creating bookings...");
        for _ in 0..50 {
            let listing = &listings[rng.gen_range(0..listings.len())];
            let user = &users[rng.gen_range(0..users.len())];
            let check_in = Utc::now().date_naive() + Duration::days(rng.gen_range(-30..=60));
            let check_out = check_in + Duration::days(rng.gen_range(1..=14));
            store.create_booking(NewBooking {
                listing_id: listing.id,
                user_id: user.id,
                check_in,
                check_out,
                status: BookingStatus::ALL[rng.gen_range(0..BookingStatus::ALL.len())],
                total_price: domain::total_price(&listing.price_per_night, check_in, check_out),
            })?;
        }

        log::info!("Creating reviews...");
        for _ in 0..80 {
            let listing = &listings[rng.gen_range(0..listings.len())];
            let user = &users[rng.gen_range(0..users.len())];
            // one review per (listing, user)
            if store.review_exists(listing.id, user.id)? {
                continue;
            }
            store.create_review(NewReview {
                listing_id: listing.id,
                user_id: user.id,
                rating: rng.gen_range(1..=5),
                comment: REVIEW_COMMENTS[rng.gen_range(0..REVIEW_COMMENTS.len())].to_string(),
            })?;
        }
    }

    log::info!(
        "Successfully seeded database with: {} users, {} listings, {} bookings, {} reviews",
        users.len(),
        listings.len(),
        store.booking_count()?,
        store.review_count()?,
    );
    Ok(())
}

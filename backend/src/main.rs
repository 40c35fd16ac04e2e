use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::{Json, Router};
use diesel::prelude::*;
use serde_json::json;

use homestay_backend::config::AppConfig;
use homestay_backend::{auth, booking, db, listing, review, AppState};

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let config = AppConfig::load()?;
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));

    let mut conn = db::establish_connection(&config.database_url)?;
    let test_query: i32 = diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>("1"))
        .get_result(&mut conn)?;
    log::info!("Database test query result: {}", test_query);

    log::info!("Starting server on {}", addr);

    let state = AppState { config };
    let app = Router::new()
        .route("/", get(|| async { "Hello, Homestay!" }))
        .route("/health", get(health))
        .route("/login", post(auth::login))
        .route(
            "/listings",
            get(listing::list_listings).post(listing::create_listing),
        )
        .route(
            "/listings/:id",
            get(listing::get_listing)
                .put(listing::update_listing)
                .delete(listing::delete_listing),
        )
        .route(
            "/listings/:id/reviews",
            get(review::list_reviews).post(review::create_review),
        )
        .route(
            "/bookings",
            get(booking::list_bookings).post(booking::create_booking),
        )
        .route(
            "/bookings/:id",
            get(booking::get_booking).patch(booking::update_booking_status),
        )
        .with_state(state);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app.into_make_service()).await?;

    Ok(())
}

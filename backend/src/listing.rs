use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bigdecimal::BigDecimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::auth::AuthUser;
use crate::domain;
use crate::errors::ApiError;
use crate::serializers::{self, ListingResponse};
use crate::store::{NewListing, Store};
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct ListingRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: String,
    #[validate(length(min = 1, max = 100))]
    pub location: String,
    pub price_per_night: BigDecimal,
    #[serde(default = "default_available")]
    pub available: bool,
    #[validate(range(min = 1))]
    pub max_guests: i32,
}

fn default_available() -> bool {
    true
}

impl ListingRequest {
    fn into_fields(self) -> NewListing {
        NewListing {
            title: self.title,
            description: self.description,
            location: self.location,
            price_per_night: self.price_per_night,
            available: self.available,
            max_guests: self.max_guests,
        }
    }
}

/// Fetches all listings, newest first, in the nested wire shape.
pub async fn list_listings(
    State(state): State<AppState>,
) -> Result<Json<Vec<ListingResponse>>, ApiError> {
    let mut store = Store::connect(&state.config.database_url)?;
    let listings = store.listings()?;
    log::info!("Fetched {} listings", listings.len());

    let mut responses = Vec::with_capacity(listings.len());
    for listing in listings {
        let reviews = store.reviews_with_users(listing.id)?;
        responses.push(serializers::listing_response(listing, reviews));
    }
    Ok(Json(responses))
}

/// Fetches a single listing by its ID.
pub async fn get_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
) -> Result<Json<ListingResponse>, ApiError> {
    let mut store = Store::connect(&state.config.database_url)?;
    let listing = store
        .listing(listing_id)?
        .ok_or(ApiError::NotFound("Listing"))?;
    let reviews = store.reviews_with_users(listing.id)?;
    Ok(Json(serializers::listing_response(listing, reviews)))
}

/// Creates a new listing from validated fields.
pub async fn create_listing(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(body): Json<ListingRequest>,
) -> Result<(StatusCode, Json<ListingResponse>), ApiError> {
    body.validate()?;
    domain::validate_price(&body.price_per_night)?;

    let mut store = Store::connect(&state.config.database_url)?;
    let listing = store.create_listing(body.into_fields())?;
    log::info!("Created listing {}", listing.id);
    Ok((
        StatusCode::CREATED,
        Json(serializers::listing_response(listing, Vec::new())),
    ))
}

/// Replaces a listing's fields.
pub async fn update_listing(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(listing_id): Path<Uuid>,
    Json(body): Json<ListingRequest>,
) -> Result<Json<ListingResponse>, ApiError> {
    body.validate()?;
    domain::validate_price(&body.price_per_night)?;

    let mut store = Store::connect(&state.config.database_url)?;
    let listing = store
        .update_listing(listing_id, body.into_fields())?
        .ok_or(ApiError::NotFound("Listing"))?;
    log::info!("Updated listing {}", listing.id);
    let reviews = store.reviews_with_users(listing.id)?;
    Ok(Json(serializers::listing_response(listing, reviews)))
}

/// Deletes a listing together with its bookings and reviews.
pub async fn delete_listing(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(listing_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mut store = Store::connect(&state.config.database_url)?;
    if store.delete_listing(listing_id)? {
        log::info!("Deleted listing {} and its dependents", listing_id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Listing"))
    }
}

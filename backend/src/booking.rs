use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::domain;
use crate::errors::{ApiError, ValidationError};
use crate::models::{Booking, BookingStatus, User};
use crate::serializers::{self, BookingResponse};
use crate::store::{NewBooking, Store};
use crate::AppState;

/// Booking writes accept a listing ID and a date range; the booking user is
/// always the authenticated requester, never part of the request body.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub listing_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingRequest {
    pub status: String,
}

fn booking_detail(
    store: &mut Store,
    booking: Booking,
    user: User,
) -> Result<BookingResponse, ApiError> {
    let listing = store
        .listing(booking.listing_id)?
        .ok_or(ApiError::NotFound("Listing"))?;
    let reviews = store.reviews_with_users(listing.id)?;
    Ok(serializers::booking_response(booking, listing, reviews, user))
}

/// Creates a booking for the authenticated user with the total price
/// computed from the listing's nightly rate.
pub async fn create_booking(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(body): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    domain::validate_booking_dates(body.check_in, body.check_out)?;

    let mut store = Store::connect(&state.config.database_url)?;
    let listing = store
        .listing(body.listing_id)?
        .ok_or(ApiError::NotFound("Listing"))?;

    let total_price = domain::total_price(&listing.price_per_night, body.check_in, body.check_out);
    let booking = store.create_booking(NewBooking {
        listing_id: listing.id,
        user_id: user.id,
        check_in: body.check_in,
        check_out: body.check_out,
        status: BookingStatus::Pending,
        total_price,
    })?;
    log::info!("Created booking {} for user {}", booking.id, user.username);

    let reviews = store.reviews_with_users(listing.id)?;
    Ok((
        StatusCode::CREATED,
        Json(serializers::booking_response(booking, listing, reviews, user)),
    ))
}

/// Fetches the requester's bookings, newest first.
pub async fn list_bookings(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let mut store = Store::connect(&state.config.database_url)?;
    let bookings = store.bookings_for_user(user.id)?;

    let mut responses = Vec::with_capacity(bookings.len());
    for booking in bookings {
        responses.push(booking_detail(&mut store, booking, user.clone())?);
    }
    Ok(Json(responses))
}

/// Fetches one of the requester's bookings.
pub async fn get_booking(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    let mut store = Store::connect(&state.config.database_url)?;
    let booking = store
        .booking(booking_id)?
        .ok_or(ApiError::NotFound("Booking"))?;

    if booking.user_id != user.id {
        return Err(ApiError::Forbidden(
            "You don't have permission to view this booking".to_string(),
        ));
    }
    Ok(Json(booking_detail(&mut store, booking, user)?))
}

/// Updates a booking's status. Transitions are not constrained; any known
/// status may be set by the booking's owner.
pub async fn update_booking_status(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(booking_id): Path<Uuid>,
    Json(body): Json<UpdateBookingRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    let status = BookingStatus::parse(&body.status).ok_or_else(|| {
        ValidationError::new(format!("unknown booking status: {}", body.status))
    })?;

    let mut store = Store::connect(&state.config.database_url)?;
    let booking = store
        .booking(booking_id)?
        .ok_or(ApiError::NotFound("Booking"))?;

    if booking.user_id != user.id {
        return Err(ApiError::Forbidden(
            "You don't have permission to update this booking".to_string(),
        ));
    }

    let updated = store
        .update_booking_status(booking_id, status)?
        .ok_or(ApiError::NotFound("Booking"))?;
    log::info!("Booking {} set to {}", updated.id, updated.status);
    Ok(Json(booking_detail(&mut store, updated, user)?))
}

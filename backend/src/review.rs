use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::auth::AuthUser;
use crate::errors::ApiError;
use crate::serializers::{self, ReviewResponse};
use crate::store::{NewReview, Store};
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    pub comment: String,
}

/// Fetches a listing's reviews with their authors, newest first.
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let mut store = Store::connect(&state.config.database_url)?;
    let listing = store
        .listing(listing_id)?
        .ok_or(ApiError::NotFound("Listing"))?;

    let reviews = store.reviews_with_users(listing.id)?;
    Ok(Json(
        reviews
            .into_iter()
            .map(|(review, user)| serializers::review_response(review, user))
            .collect(),
    ))
}

/// Creates a review by the authenticated user. A user may review a listing
/// at most once.
pub async fn create_review(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(listing_id): Path<Uuid>,
    Json(body): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), ApiError> {
    body.validate()?;

    let mut store = Store::connect(&state.config.database_url)?;
    let listing = store
        .listing(listing_id)?
        .ok_or(ApiError::NotFound("Listing"))?;

    if store.review_exists(listing.id, user.id)? {
        return Err(ApiError::Conflict(
            "You have already reviewed this listing.".to_string(),
        ));
    }

    let review = match store.create_review(NewReview {
        listing_id: listing.id,
        user_id: user.id,
        rating: body.rating,
        comment: body.comment,
    }) {
        Ok(review) => review,
        // the unique index closes the race two concurrent creations could
        // otherwise win past the exists-check
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            return Err(ApiError::Conflict(
                "You have already reviewed this listing.".to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    log::info!(
        "User {} reviewed listing {} with rating {}",
        user.username,
        listing.id,
        review.rating
    );
    Ok((
        StatusCode::CREATED,
        Json(serializers::review_response(review, user)),
    ))
}

use axum::async_trait;
use axum::extract::{FromRequestParts, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::Json;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::User;
use crate::store::Store;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub exp: usize,  // Expiration time
}

pub fn create_token(
    user_id: &str,
    jwt_secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
}

pub fn validate_token(
    token: &str,
    jwt_secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims.sub)
}

/// The authenticated requester. Handlers that take this extractor reject
/// requests without a valid bearer token, and every entity they create is
/// bound to this user rather than anything client-supplied.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(ApiError::Unauthorized)?;
        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(ApiError::Unauthorized)?;

        let subject = validate_token(token, &state.config.jwt_secret)
            .map_err(|_| ApiError::Unauthorized)?;
        let user_id = Uuid::parse_str(&subject).map_err(|_| ApiError::Unauthorized)?;

        let mut store = Store::connect(&state.config.database_url)?;
        let user = store.user_by_id(user_id)?.ok_or(ApiError::Unauthorized)?;
        Ok(AuthUser(user))
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Issues a bearer token for a known username. Account provisioning lives
/// with the identity layer (the seeder, in development).
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let mut store = Store::connect(&state.config.database_url)?;
    let user = store
        .user_by_username(&body.username)?
        .ok_or(ApiError::Unauthorized)?;

    let token = create_token(&user.id.to_string(), &state.config.jwt_secret)?;
    log::info!("Issued token for user {}", user.username);
    Ok(Json(TokenResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_subject() {
        let id = Uuid::new_v4().to_string();
        let token = create_token(&id, "test-secret").unwrap();
        assert_eq!(validate_token(&token, "test-secret").unwrap(), id);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = create_token("someone", "secret-a").unwrap();
        assert!(validate_token(&token, "secret-b").is_err());
    }
}

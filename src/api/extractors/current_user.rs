//! Authenticated-user extractor.
//!
//! Extracting `CurrentUser` rejects the request with 401 unless a valid
//! bearer token is present. Handlers that allow anonymous access extract
//! `Option<CurrentUser>` instead and treat `None` as the public path.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::UserRole;
use crate::errors::{AppError, AppResult};

/// The user identified by the request's bearer token
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl CurrentUser {
    /// Reject with 403 unless this user is an admin
    pub fn require_admin(&self) -> AppResult<()> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = header_value
            .strip_prefix(BEARER_TOKEN_PREFIX)
            .ok_or(AppError::Unauthorized)?;

        let claims = state.services.auth().verify_token(token)?;

        Ok(CurrentUser {
            id: claims.sub,
            email: claims.email,
            role: UserRole::from(claims.role.as_str()),
        })
    }
}

//! Bearer token extraction for protected routes.

use super::{ApiError, AppState};
use crate::account::services::AuthenticatedUser;
use crate::task::domain::OwnerId;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

/// The caller identified by the request's bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub AuthenticatedUser);

impl CurrentUser {
    /// Returns the caller as a task owner.
    #[must_use]
    pub const fn owner(&self) -> OwnerId {
        OwnerId::from_uuid(self.0.id.into_inner())
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Unauthenticated("Not authorized, no token".to_owned()))?;

        let user = state.accounts.authenticate(token)?;
        Ok(Self(user))
    }
}

//! Authenticated-user extractor
//!
//! The authentication middleware resolves the bearer token and stores
//! the result as a request extension; this extractor hands it to
//! handlers. A missing extension means the route was mounted without
//! the middleware, which surfaces as 401 rather than a panic.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use market_core::entities::User;
use market_core::UserId;

use crate::response::ApiError;

/// Authenticated user resolved from the session behind the bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The full user record at the time of authentication
    pub user: User,
    /// The presented bearer token, kept for logout
    pub token: String,
}

impl AuthUser {
    pub fn user_id(&self) -> UserId {
        self.user.id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(ApiError::MissingAuth)
    }
}

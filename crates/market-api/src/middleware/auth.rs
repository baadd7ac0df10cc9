//! Authentication and authorization guards
//!
//! Route groups are gated by a chain of request middleware, each stage
//! assuming the previous one ran:
//!
//! 1. [`authenticate`] resolves the bearer token to a live session and
//!    an active user, and stores the result as a request extension
//! 2. [`require_verified`] rejects accounts that have not verified
//!    their email address
//! 3. [`require_buyer`] / [`require_seller`] / [`require_admin`] check
//!    the account's role
//!
//! Ordering matters: an unverified seller hitting a seller route gets
//! the verification error, not the role error.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use market_core::{DomainError, RoleSet};
use market_service::AuthService;

use crate::extractors::AuthUser;
use crate::response::ApiError;
use crate::state::AppState;

/// Resolve the bearer token and attach the authenticated user to the
/// request. Everything behind this layer can rely on the extension
/// being present.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())?;

    let service = AuthService::new(state.service_context());
    let user = service.authenticate_token(&token).await?;

    request.extensions_mut().insert(AuthUser { user, token });

    Ok(next.run(request).await)
}

/// Reject accounts that have not verified their email address
pub async fn require_verified(request: Request, next: Next) -> Result<Response, ApiError> {
    let auth = request
        .extensions()
        .get::<AuthUser>()
        .ok_or(ApiError::MissingAuth)?;

    if !auth.user.is_verified() {
        return Err(ApiError::Domain(DomainError::EmailNotVerified));
    }

    Ok(next.run(request).await)
}

/// Only let buyer accounts through
pub async fn require_buyer(request: Request, next: Next) -> Result<Response, ApiError> {
    require_role(RoleSet::BUYER, request, next).await
}

/// Only let seller accounts through
pub async fn require_seller(request: Request, next: Next) -> Result<Response, ApiError> {
    require_role(RoleSet::SELLER, request, next).await
}

/// Only let administrator accounts through
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    require_role(RoleSet::ADMIN, request, next).await
}

async fn require_role(
    required: RoleSet,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth = request
        .extensions()
        .get::<AuthUser>()
        .ok_or(ApiError::MissingAuth)?;

    if !required.contains(auth.user.role) {
        return Err(ApiError::Domain(DomainError::ForbiddenRole { required }));
    }

    Ok(next.run(request).await)
}

/// Pull the token out of `Authorization: Bearer <token>`. A missing
/// header and a malformed one are distinct 401s.
fn bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(ApiError::MissingAuth)?;

    value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or(ApiError::InvalidAuthFormat)
}

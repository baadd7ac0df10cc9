//! Authentication handlers
//!
//! Endpoints for registration, email verification, login/logout, and
//! the authenticated user's own record.

use axum::{extract::State, Json};
use market_service::dto::{
    AuthResponse, CurrentUserResponse, LoginRequest, MessageResponse, RegisterRequest,
    ResendVerificationRequest, UpdateProfileRequest, UserMessageResponse, VerifyEmailRequest,
};
use market_service::{AuthService, ProfileService};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a new buyer or seller account
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<UserMessageResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Login with email and password
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Consume an emailed verification token
///
/// POST /api/auth/verify-email
pub async fn verify_email(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<VerifyEmailRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.verify_email(request).await?;
    Ok(Json(response))
}

/// Reissue the verification email with a fresh token
///
/// POST /api/auth/resend-verification-email
pub async fn resend_verification(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ResendVerificationRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.resend_verification(request).await?;
    Ok(Json(response))
}

/// Revoke the presented bearer token
///
/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.logout(auth.user_id(), &auth.token).await?;
    Ok(Json(response))
}

/// Get the authenticated user
///
/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.current_user(auth.user_id()).await?;
    Ok(Json(response))
}

/// Update the authenticated user's profile
///
/// PUT /api/auth/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserMessageResponse>> {
    let service = ProfileService::new(state.service_context());
    let response = service.update_profile(auth.user_id(), request).await?;
    Ok(Json(response))
}

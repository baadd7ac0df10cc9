//! Verified-only and role-gated user surfaces
//!
//! These routes exist to sit behind the full guard chain; the payloads
//! are the same user record the auth surface serves.

use axum::{extract::State, Json};
use market_service::dto::{CurrentUserResponse, UserMessageResponse, UserResponse};
use market_service::ProfileService;

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Verified-account profile read
///
/// GET /api/account
pub async fn get_account(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = ProfileService::new(state.service_context());
    let response = service.get_profile(auth.user_id()).await?;
    Ok(Json(response))
}

/// Buyer-only landing payload
///
/// GET /api/buyer/dashboard
pub async fn buyer_dashboard(auth: AuthUser) -> Json<UserMessageResponse> {
    Json(UserMessageResponse::new(
        "Buyer dashboard",
        UserResponse::from(&auth.user),
    ))
}

/// Seller-only landing payload
///
/// GET /api/seller/dashboard
pub async fn seller_dashboard(auth: AuthUser) -> Json<UserMessageResponse> {
    Json(UserMessageResponse::new(
        "Seller dashboard",
        UserResponse::from(&auth.user),
    ))
}

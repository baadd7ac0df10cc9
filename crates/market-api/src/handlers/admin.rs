//! Administrative user management handlers
//!
//! CRUD over accounts plus the activation toggle, all behind the admin
//! role gate.

use axum::{
    extract::{Path, State},
    Json,
};
use market_service::dto::{
    AdminCreateUserRequest, AdminUpdateUserRequest, CurrentUserResponse, ListUsersQuery,
    MessageResponse, UserListResponse, UserMessageResponse,
};
use market_service::AdminService;

use crate::extractors::{ApiQuery, AuthUser, UserIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List users with search, role, and status filters
///
/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListUsersQuery>,
) -> ApiResult<Json<UserListResponse>> {
    let service = AdminService::new(state.service_context());
    let response = service.list_users(query).await?;
    Ok(Json(response))
}

/// Create an account directly, optionally pre-verified
///
/// POST /api/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AdminCreateUserRequest>,
) -> ApiResult<Created<Json<UserMessageResponse>>> {
    let service = AdminService::new(state.service_context());
    let response = service.create_user(request).await?;
    Ok(Created(Json(response)))
}

/// Fetch a single user
///
/// GET /api/admin/users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let user_id = path.user_id()?;
    let service = AdminService::new(state.service_context());
    let response = service.get_user(user_id).await?;
    Ok(Json(response))
}

/// Update any account, including role, password, and active flag
///
/// PUT /api/admin/users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(path): Path<UserIdPath>,
    ValidatedJson(request): ValidatedJson<AdminUpdateUserRequest>,
) -> ApiResult<Json<UserMessageResponse>> {
    let user_id = path.user_id()?;
    let service = AdminService::new(state.service_context());
    let response = service.update_user(user_id, request).await?;
    Ok(Json(response))
}

/// Delete an account. Deleting your own account is rejected.
///
/// DELETE /api/admin/users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<MessageResponse>> {
    let user_id = path.user_id()?;
    let service = AdminService::new(state.service_context());
    let response = service.delete_user(auth.user_id(), user_id).await?;
    Ok(Json(response))
}

/// Flip an account between active and deactivated
///
/// PATCH /api/admin/users/{user_id}/toggle-status
pub async fn toggle_status(
    State(state): State<AppState>,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<UserMessageResponse>> {
    let user_id = path.user_id()?;
    let service = AdminService::new(state.service_context());
    let response = service.toggle_status(user_id).await?;
    Ok(Json(response))
}

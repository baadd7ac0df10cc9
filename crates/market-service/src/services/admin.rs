//! Administrative user management
//!
//! Full CRUD over user accounts for the admin surface, including the
//! operations ordinary users never get: role changes, activation
//! toggles, and pre-verified account creation.

use chrono::Utc;
use market_common::auth::{generate_token, hash_password, validate_password_strength};
use market_core::entities::User;
use market_core::traits::UserFilter;
use market_core::{DomainError, UserId};
use tracing::{info, instrument, warn};

use crate::dto::{
    AdminCreateUserRequest, AdminUpdateUserRequest, CurrentUserResponse, ListUsersQuery,
    MessageResponse, PaginationMeta, UserListResponse, UserMessageResponse, UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notifier::dispatch_verification;

/// Highest page size the listing will serve
const MAX_PER_PAGE: i64 = 100;

/// Administrative user service
pub struct AdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdminService<'a> {
    /// Create a new AdminService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Paginated user listing with search and role/active filters.
    /// Out-of-range paging values are clamped, not rejected.
    #[instrument(skip(self))]
    pub async fn list_users(&self, query: ListUsersQuery) -> ServiceResult<UserListResponse> {
        let filter = UserFilter {
            search: query.search.filter(|s| !s.trim().is_empty()),
            role: query.role,
            active: query.status.as_active_flag(),
            page: query.page.unwrap_or(1).max(1),
            per_page: query.per_page.unwrap_or(10).clamp(1, MAX_PER_PAGE),
        };

        let page = self.ctx.user_repo().list(&filter).await?;

        Ok(UserListResponse {
            success: true,
            pagination: PaginationMeta {
                page: page.page,
                per_page: page.per_page,
                total: page.total,
                total_pages: page.total_pages(),
            },
            users: page.users.iter().map(UserResponse::from).collect(),
        })
    }

    /// Fetch a single user by id
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: UserId) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        Ok(CurrentUserResponse::new(UserResponse::from(&user)))
    }

    /// Create an account directly. Defaults to pre-verified, since the
    /// usual case is staff provisioning; pass `verified: false` to put
    /// the account through the normal email flow instead.
    #[instrument(skip(self, request), fields(email = %request.email, role = %request.role))]
    pub async fn create_user(
        &self,
        request: AdminCreateUserRequest,
    ) -> ServiceResult<UserMessageResponse> {
        validate_password_strength(&request.password).map_err(ServiceError::from)?;

        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(ServiceError::from(DomainError::EmailAlreadyExists));
        }

        let password_hash = hash_password(&request.password)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        let mut user = User::new(request.name, request.email, request.role);
        user.phone = request.phone;
        user.description = request.description;
        if user.role.is_seller() {
            user.store_name = request.store_name;
        }

        let now = Utc::now();
        let pending_token = if request.verified {
            user.email_verified_at = Some(now);
            None
        } else {
            let token = generate_token();
            user.issue_verification_token(token.clone(), now);
            Some(token)
        };

        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, verified = request.verified, "User created by admin");

        if let Some(token) = pending_token {
            dispatch_verification(self.ctx, &user, &token);
        }

        Ok(UserMessageResponse::new(
            "User created successfully",
            UserResponse::from(&user),
        ))
    }

    /// Apply a partial update to any account, including fields the
    /// self-service profile never exposes
    #[instrument(skip(self, request))]
    pub async fn update_user(
        &self,
        user_id: UserId,
        request: AdminUpdateUserRequest,
    ) -> ServiceResult<UserMessageResponse> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        if let Some(name) = request.name {
            user.name = name;
        }
        if let Some(email) = request.email {
            user.email = email.to_lowercase();
        }
        if let Some(role) = request.role {
            user.role = role;
        }
        if let Some(phone) = request.phone {
            user.phone = Some(phone);
        }
        if let Some(description) = request.description {
            user.description = Some(description);
        }
        if let Some(store_name) = request.store_name {
            if !user.role.is_seller() {
                return Err(ServiceError::from(DomainError::ValidationError(
                    "store_name is only available to seller accounts".to_string(),
                )));
            }
            user.store_name = Some(store_name);
        }
        // A role change away from seller drops the store
        if !user.role.is_seller() {
            user.store_name = None;
        }

        let deactivating = match request.is_active {
            Some(active) => {
                let was_active = user.is_active;
                user.is_active = active;
                was_active && !active
            }
            None => false,
        };

        let new_password_hash = match &request.password {
            Some(password) => {
                validate_password_strength(password).map_err(ServiceError::from)?;
                Some(hash_password(password).map_err(|e| ServiceError::internal(e.to_string()))?)
            }
            None => None,
        };

        self.ctx.user_repo().update(&user).await?;

        let password_changed = new_password_hash.is_some();
        if let Some(hash) = new_password_hash {
            self.ctx.user_repo().update_password(user.id, &hash).await?;
        }

        // A reset password cuts off whoever held the old credentials
        if deactivating || password_changed {
            self.revoke_sessions_best_effort(user.id).await;
        }

        info!(user_id = %user.id, "User updated by admin");

        Ok(UserMessageResponse::new(
            "User updated successfully",
            UserResponse::from(&user),
        ))
    }

    /// Permanently remove an account and its sessions. Admins cannot
    /// delete themselves.
    #[instrument(skip(self))]
    pub async fn delete_user(
        &self,
        acting_admin: UserId,
        user_id: UserId,
    ) -> ServiceResult<MessageResponse> {
        if acting_admin == user_id {
            return Err(ServiceError::validation(
                "You cannot delete your own account",
            ));
        }

        self.ctx.user_repo().delete(user_id).await?;
        self.revoke_sessions_best_effort(user_id).await;

        info!(user_id = %user_id, "User deleted by admin");

        Ok(MessageResponse::new("User deleted successfully"))
    }

    /// Flip the account between active and deactivated. Deactivating
    /// also revokes the user's live sessions.
    #[instrument(skip(self))]
    pub async fn toggle_status(&self, user_id: UserId) -> ServiceResult<UserMessageResponse> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let now_active = !user.is_active;
        self.ctx.user_repo().set_active(user_id, now_active).await?;
        user.is_active = now_active;

        if !now_active {
            self.revoke_sessions_best_effort(user_id).await;
        }

        info!(user_id = %user_id, now_active, "User status toggled");

        let message = if now_active {
            "User activated successfully"
        } else {
            "User deactivated successfully"
        };
        Ok(UserMessageResponse::new(message, UserResponse::from(&user)))
    }

    /// Session revocation here is hygiene, not enforcement: token
    /// resolution re-checks the account on every request, so a failed
    /// revoke only leaves records for the store's TTL to clean up.
    async fn revoke_sessions_best_effort(&self, user_id: UserId) {
        if let Err(e) = self.ctx.session_store().revoke_all_for_user(user_id).await {
            warn!(user_id = %user_id, error = %e, "Failed to revoke sessions");
        }
    }
}

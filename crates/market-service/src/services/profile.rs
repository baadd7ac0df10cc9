//! Profile service
//!
//! Self-service reads and partial updates of the authenticated user's
//! own record. Email, role, and verification state are not reachable
//! from here.

use market_core::{DomainError, UserId};
use tracing::{info, instrument};

use crate::dto::{CurrentUserResponse, UpdateProfileRequest, UserMessageResponse, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Profile service
pub struct ProfileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProfileService<'a> {
    /// Create a new ProfileService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the authenticated user's profile
    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: UserId) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        Ok(CurrentUserResponse::new(UserResponse::from(&user)))
    }

    /// Apply a partial profile update. Absent fields stay as they are.
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: UserId,
        request: UpdateProfileRequest,
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

        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user.id, "Profile updated");

        Ok(UserMessageResponse::new(
            "Profile updated successfully",
            UserResponse::from(&user),
        ))
    }
}

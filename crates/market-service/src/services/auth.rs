//! Authentication service
//!
//! Handles registration, email verification, login, logout, and the
//! token-to-user resolution the request middleware runs on.

use chrono::Utc;
use market_common::auth::{
    generate_token, hash_password, validate_password_strength, verify_password_or_decoy,
};
use market_common::AppError;
use market_core::entities::{Session, User};
use market_core::{DomainError, UserId};
use tracing::{info, instrument, warn};

use crate::dto::{
    AuthResponse, CurrentUserResponse, LoginRequest, MessageResponse, RegisterRequest,
    ResendVerificationRequest, UserMessageResponse, UserResponse, VerifyEmailRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notifier::dispatch_verification;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new buyer or seller account
    #[instrument(skip(self, request), fields(email = %request.email, role = %request.role))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<UserMessageResponse> {
        // Validate password strength before proceeding
        validate_password_strength(&request.password).map_err(ServiceError::from)?;

        // Check if email already exists
        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(ServiceError::from(DomainError::EmailAlreadyExists));
        }

        // Hash password
        let password_hash = hash_password(&request.password)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        let mut user = User::new(request.name, request.email, request.role);
        user.phone = request.phone;
        user.description = request.description;
        // Store names only exist for sellers; anything a buyer sent is dropped
        if user.role.is_seller() {
            user.store_name = request.store_name;
        }

        // New accounts start unverified with a live token
        let token = generate_token();
        user.issue_verification_token(token.clone(), Utc::now());

        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered, verification pending");

        dispatch_verification(self.ctx, &user, &token);

        Ok(UserMessageResponse::new(
            "Registration successful. Please check your email to verify your account.",
            UserResponse::from(&user),
        ))
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self.ctx.user_repo().find_by_email(&request.email).await?;

        let stored_hash = match &user {
            Some(u) => self.ctx.user_repo().get_password_hash(u.id).await?,
            None => None,
        };

        // A missing account burns the same hashing cost as a wrong password,
        // so unknown-email and bad-password are indistinguishable by timing
        let password_valid = verify_password_or_decoy(&request.password, stored_hash.as_deref())
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        let Some(mut user) = user.filter(|_| password_valid) else {
            warn!("Login failed: invalid credentials");
            return Err(ServiceError::from(DomainError::InvalidCredentials));
        };

        if !user.is_active {
            warn!(user_id = %user.id, "Login rejected: account deactivated");
            return Err(ServiceError::from(DomainError::AccountDeactivated));
        }

        if !user.is_verified() {
            warn!(user_id = %user.id, "Login rejected: email not verified");
            return Err(ServiceError::from(DomainError::EmailNotVerified));
        }

        let now = Utc::now();
        user.record_login(now);
        self.ctx.user_repo().record_login(user.id, now).await?;

        // Issue an opaque bearer token backed by a stored session
        let token = generate_token();
        let session = Session::new(user.id, now, self.ctx.session_ttl_seconds());
        self.ctx
            .session_store()
            .store(&token, &session)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        info!(user_id = %user.id, "User logged in");

        Ok(AuthResponse::new(
            "Login successful",
            UserResponse::from(&user),
            token,
        ))
    }

    /// Consume a verification token, marking the account's email verified
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn verify_email(&self, request: VerifyEmailRequest) -> ServiceResult<MessageResponse> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            // An unknown email reads the same as a bad token
            .ok_or(ServiceError::Domain(DomainError::TokenMismatch))?;

        if user.is_verified() {
            return Ok(MessageResponse::new("Email is already verified"));
        }

        let now = Utc::now();

        // Entity-level check gives the precise failure (mismatch vs expired)
        user.consume_verification_token(&request.token, now)?;

        // The guarded write decides; a concurrent resend or verify between
        // the read and this update turns it into a no-op
        let consumed = self
            .ctx
            .user_repo()
            .consume_verification_token(user.id, &request.token, now)
            .await?;
        if !consumed {
            return Err(ServiceError::from(DomainError::TokenMismatch));
        }

        info!(user_id = %user.id, "Email verified");

        Ok(MessageResponse::new("Email verified successfully"))
    }

    /// Issue a fresh verification token, invalidating the previous one
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn resend_verification(
        &self,
        request: ResendVerificationRequest,
    ) -> ServiceResult<MessageResponse> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or(ServiceError::Domain(DomainError::EmailNotFound))?;

        if user.is_verified() {
            return Err(ServiceError::from(DomainError::AlreadyVerified));
        }

        let now = Utc::now();
        if !user.can_resend_verification(now) {
            let retry_after_seconds = user.resend_retry_after_seconds(now);
            return Err(ServiceError::from(DomainError::ResendThrottled {
                retry_after_seconds,
            }));
        }

        let token = generate_token();
        user.issue_verification_token(token.clone(), now);
        self.ctx
            .user_repo()
            .rotate_verification_token(user.id, &token, now)
            .await?;

        info!(user_id = %user.id, "Verification email reissued");

        dispatch_verification(self.ctx, &user, &token);

        Ok(MessageResponse::new("Verification email sent"))
    }

    /// Revoke the session behind the presented bearer token
    #[instrument(skip(self, token))]
    pub async fn logout(&self, user_id: UserId, token: &str) -> ServiceResult<MessageResponse> {
        self.ctx
            .session_store()
            .revoke(token)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        info!(user_id = %user_id, "User logged out");

        Ok(MessageResponse::new("Logged out successfully"))
    }

    /// Get the authenticated user's record
    #[instrument(skip(self))]
    pub async fn current_user(&self, user_id: UserId) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        Ok(CurrentUserResponse::new(UserResponse::from(&user)))
    }

    /// Resolve a bearer token to its user, enforcing session liveness.
    /// This is the entry point the authentication middleware calls.
    #[instrument(skip(self, token))]
    pub async fn authenticate_token(&self, token: &str) -> ServiceResult<User> {
        let session = self
            .ctx
            .session_store()
            .get(token)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        let now = Utc::now();
        if session.is_expired(now) {
            // Redis TTL normally removes these; clean up the leftover
            if let Err(e) = self.ctx.session_store().revoke(token).await {
                warn!(error = %e, "Failed to drop expired session");
            }
            return Err(ServiceError::App(AppError::SessionExpired));
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_id(session.user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        // Deactivation cuts off existing sessions, not only new logins
        if !user.is_active {
            return Err(ServiceError::from(DomainError::AccountDeactivated));
        }

        Ok(user)
    }
}

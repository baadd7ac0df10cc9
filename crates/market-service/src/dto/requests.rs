//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` so every
//! operation has a statically defined input schema.

use market_core::Role;
use serde::Deserialize;
use validator::{Validate, ValidationError};

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_register", skip_on_field_errors = false))]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 50, message = "Name must be 2-50 characters"))]
    pub name: String,

    #[validate(
        email(message = "Invalid email format"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub password_confirmation: String,

    /// Requested account role; admin accounts cannot self-register
    pub role: Role,

    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,

    #[validate(length(min = 2, max = 50, message = "Store name must be 2-50 characters"))]
    pub store_name: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
}

fn validate_register(request: &RegisterRequest) -> Result<(), ValidationError> {
    match request.role {
        Role::Admin => {
            let mut err = ValidationError::new("role_not_allowed");
            err.message = Some("Admin accounts cannot be self-registered".into());
            Err(err)
        }
        Role::Seller
            if request
                .store_name
                .as_deref()
                .is_none_or(|s| s.trim().is_empty()) =>
        {
            let mut err = ValidationError::new("store_name_required");
            err.message = Some("The store_name field is required for sellers".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Email verification request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Resend verification email request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResendVerificationRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

// ============================================================================
// Profile Requests
// ============================================================================

/// Self-service profile update. Email and role are not self-editable.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 50, message = "Name must be 2-50 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 2, max = 50, message = "Store name must be 2-50 characters"))]
    pub store_name: Option<String>,
}

// ============================================================================
// Admin Requests
// ============================================================================

/// Administrative user creation; may pre-verify the account
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_admin_create", skip_on_field_errors = false))]
pub struct AdminCreateUserRequest {
    #[validate(length(min = 2, max = 50, message = "Name must be 2-50 characters"))]
    pub name: String,

    #[validate(
        email(message = "Invalid email format"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    pub role: Role,

    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,

    #[validate(length(min = 2, max = 50, message = "Store name must be 2-50 characters"))]
    pub store_name: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    /// When true the account skips email verification entirely
    #[serde(default = "default_verified")]
    pub verified: bool,
}

fn default_verified() -> bool {
    true
}

fn validate_admin_create(request: &AdminCreateUserRequest) -> Result<(), ValidationError> {
    if request.role == Role::Seller
        && request
            .store_name
            .as_deref()
            .is_none_or(|s| s.trim().is_empty())
    {
        let mut err = ValidationError::new("store_name_required");
        err.message = Some("The store_name field is required for sellers".into());
        return Err(err);
    }
    Ok(())
}

/// Administrative user update; all fields optional
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdminUpdateUserRequest {
    #[validate(length(min = 2, max = 50, message = "Name must be 2-50 characters"))]
    pub name: Option<String>,

    #[validate(
        email(message = "Invalid email format"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: Option<String>,

    pub role: Option<Role>,

    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,

    #[validate(length(min = 2, max = 50, message = "Store name must be 2-50 characters"))]
    pub store_name: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    pub is_active: Option<bool>,
}

/// Activation filter for the administrative user listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    /// The `is_active` value this filter selects, if any
    #[must_use]
    pub fn as_active_flag(self) -> Option<bool> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Active => Some(true),
            StatusFilter::Inactive => Some(false),
        }
    }
}

/// Query parameters for the administrative user listing.
/// Out-of-range values are clamped rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersQuery {
    pub search: Option<String>,
    pub role: Option<Role>,
    #[serde(default)]
    pub status: StatusFilter,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

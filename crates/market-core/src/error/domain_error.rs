//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{RoleSet, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("No account found for that email address")]
    EmailNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Authentication Errors
    // =========================================================================
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account has been deactivated")]
    AccountDeactivated,

    // =========================================================================
    // Access Errors
    // =========================================================================
    #[error("Email address is not verified")]
    EmailNotVerified,

    #[error("Access restricted to role: {required}")]
    ForbiddenRole { required: RoleSet },

    // =========================================================================
    // Verification Errors
    // =========================================================================
    #[error("Verification token does not match")]
    TokenMismatch,

    #[error("Verification token has expired")]
    TokenExpired,

    #[error("Email address is already verified")]
    AlreadyVerified,

    #[error("Please wait {retry_after_seconds} seconds before requesting another email")]
    ResendThrottled { retry_after_seconds: i64 },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Store name already in use")]
    StoreNameAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::EmailNotFound => "EMAIL_NOT_FOUND",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",

            // Authentication
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AccountDeactivated => "ACCOUNT_DEACTIVATED",

            // Access
            Self::EmailNotVerified => "EMAIL_NOT_VERIFIED",
            Self::ForbiddenRole { required } => {
                if *required == RoleSet::BUYER {
                    "NOT_A_BUYER"
                } else if *required == RoleSet::SELLER {
                    "NOT_A_SELLER"
                } else if *required == RoleSet::ADMIN {
                    "NOT_AN_ADMIN"
                } else {
                    "FORBIDDEN_ROLE"
                }
            }

            // Verification
            Self::TokenMismatch => "INVALID_VERIFICATION_TOKEN",
            Self::TokenExpired => "VERIFICATION_TOKEN_EXPIRED",
            Self::AlreadyVerified => "ALREADY_VERIFIED",
            Self::ResendThrottled { .. } => "RESEND_THROTTLED",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::StoreNameAlreadyExists => "STORE_NAME_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::EmailNotFound)
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    /// Check if this is an authentication failure (reported as 401)
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::AccountDeactivated)
    }

    /// Check if this is an access denial for an authenticated user (403)
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::EmailNotVerified | Self::ForbiddenRole { .. })
    }

    /// Check if this is a uniqueness conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists | Self::StoreNameAlreadyExists)
    }
}

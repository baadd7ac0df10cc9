//! Test fixtures and data generators
//!
//! Request and response shapes are declared locally rather than imported
//! from the service crate, so these tests pin the wire format as clients
//! see it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data. Includes a per-run component so
/// reruns against a persistent database never collide on email.
pub fn unique_suffix() -> String {
    static RUN_ID: OnceLock<u64> = OnceLock::new();
    let run = RUN_ID.get_or_init(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    format!("{:x}-{}", run, COUNTER.fetch_add(1, Ordering::SeqCst))
}

// ============================================================================
// Auth Requests
// ============================================================================

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RegisterRequest {
    pub fn buyer() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Test Buyer {suffix}"),
            email: format!("buyer-{suffix}@campus.edu"),
            password: "TestPass123".to_string(),
            password_confirmation: "TestPass123".to_string(),
            role: "buyer".to_string(),
            phone: None,
            store_name: None,
            description: None,
        }
    }

    pub fn seller() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Test Seller {suffix}"),
            email: format!("seller-{suffix}@campus.edu"),
            password: "TestPass123".to_string(),
            password_confirmation: "TestPass123".to_string(),
            role: "seller".to_string(),
            phone: None,
            store_name: Some(format!("Test Store {suffix}")),
            description: None,
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Email verification request
#[derive(Debug, Serialize)]
pub struct VerifyEmailRequest {
    pub token: String,
    pub email: String,
}

/// Resend verification email request
#[derive(Debug, Serialize)]
pub struct ResendVerificationRequest {
    pub email: String,
}

/// Profile update request; all fields optional
#[derive(Debug, Default, Serialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
}

// ============================================================================
// Admin Requests
// ============================================================================

/// Administrative user creation request
#[derive(Debug, Serialize)]
pub struct AdminCreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub verified: bool,
}

impl AdminCreateUserRequest {
    pub fn verified_buyer() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Created Buyer {suffix}"),
            email: format!("created-{suffix}@campus.edu"),
            password: "TestPass123".to_string(),
            role: "buyer".to_string(),
            phone: None,
            store_name: None,
            description: None,
            verified: true,
        }
    }
}

/// Administrative user update request; all fields optional
#[derive(Debug, Default, Serialize)]
pub struct AdminUpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

// ============================================================================
// Responses
// ============================================================================

/// User record as every surface returns it
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub phone: Option<String>,
    pub store_name: Option<String>,
    pub description: Option<String>,
    pub email_verified: bool,
    pub store_verified: bool,
    pub last_login_at: Option<String>,
    pub created_at: String,
}

/// Plain acknowledgement response
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Message plus the affected user record
#[derive(Debug, Deserialize)]
pub struct UserMessageResponse {
    pub success: bool,
    pub message: String,
    pub user: UserResponse,
}

/// Single user record response
#[derive(Debug, Deserialize)]
pub struct CurrentUserResponse {
    pub success: bool,
    pub user: UserResponse,
}

/// Login response with the issued bearer token
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub user: UserResponse,
    pub token: String,
}

/// Pagination metadata
#[derive(Debug, Deserialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
}

/// Paginated user listing
#[derive(Debug, Deserialize)]
pub struct UserListResponse {
    pub success: bool,
    pub users: Vec<UserResponse>,
    pub pagination: PaginationMeta,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub error_code: String,
    pub errors: Option<HashMap<String, Vec<String>>>,
}

//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Success
//! payloads carry a top-level `success` flag matching the error envelope.

use chrono::{DateTime, Utc};
use market_core::Role;
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Plain acknowledgement response
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Pagination metadata for page-numbered listings
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
}

// ============================================================================
// User Responses
// ============================================================================

/// The user record shape shared by auth, profile, and admin surfaces
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub email_verified: bool,
    pub store_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Response carrying a single user record
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub success: bool,
    pub user: UserResponse,
}

impl CurrentUserResponse {
    pub fn new(user: UserResponse) -> Self {
        Self {
            success: true,
            user,
        }
    }
}

/// Response carrying a message and the affected user record
#[derive(Debug, Clone, Serialize)]
pub struct UserMessageResponse {
    pub success: bool,
    pub message: String,
    pub user: UserResponse,
}

impl UserMessageResponse {
    pub fn new(message: impl Into<String>, user: UserResponse) -> Self {
        Self {
            success: true,
            message: message.into(),
            user,
        }
    }
}

/// Paginated user listing for the administrative surface
#[derive(Debug, Clone, Serialize)]
pub struct UserListResponse {
    pub success: bool,
    pub users: Vec<UserResponse>,
    pub pagination: PaginationMeta,
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Successful login response with the issued bearer token
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub user: UserResponse,
    pub token: String,
}

impl AuthResponse {
    pub fn new(message: impl Into<String>, user: UserResponse, token: String) -> Self {
        Self {
            success: true,
            message: message.into(),
            user,
            token,
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, redis_healthy: bool) -> Self {
        let all_healthy = database_healthy && redis_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
                redis: if redis_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}

//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::User;
use crate::error::DomainError;
use crate::value_objects::{Role, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Filter and pagination options for the administrative user listing
#[derive(Debug, Clone)]
pub struct UserFilter {
    /// Substring match against name, email, and phone
    pub search: Option<String>,
    pub role: Option<Role>,
    pub active: Option<bool>,
    /// 1-based page number
    pub page: i64,
    pub per_page: i64,
}

impl Default for UserFilter {
    fn default() -> Self {
        Self {
            search: None,
            role: None,
            active: None,
            page: 1,
            per_page: 10,
        }
    }
}

impl UserFilter {
    /// Offset into the result set implied by page/per_page
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.per_page.max(1)
    }
}

/// One page of an administrative user listing
#[derive(Debug, Clone)]
pub struct UserPage {
    pub users: Vec<User>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

impl UserPage {
    pub fn total_pages(&self) -> i64 {
        if self.per_page <= 0 {
            return 0;
        }
        (self.total + self.per_page - 1) / self.per_page
    }
}

// ============================================================================
// User Repository
// ============================================================================

/// Persistence port for user records.
///
/// Password material crosses this boundary only as a pre-computed hash;
/// implementations never hash and never return hashes alongside profile
/// reads.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user with the given password hash
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update an existing user's mutable fields
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Delete a user permanently
    async fn delete(&self, id: UserId) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: UserId, password_hash: &str) -> RepoResult<()>;

    /// Record a successful login timestamp
    async fn record_login(&self, id: UserId, at: DateTime<Utc>) -> RepoResult<()>;

    /// Replace the verification token in a single atomic write, so
    /// concurrent resends cannot leave a stale token live
    async fn rotate_verification_token(
        &self,
        id: UserId,
        token: &str,
        issued_at: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Atomically consume the verification token: mark verified and clear
    /// the token only if the stored token still matches and the user is
    /// still unverified. Returns whether a row was changed.
    async fn consume_verification_token(
        &self,
        id: UserId,
        token: &str,
        verified_at: DateTime<Utc>,
    ) -> RepoResult<bool>;

    /// Paginated listing for the administrative surface
    async fn list(&self, filter: &UserFilter) -> RepoResult<UserPage>;

    /// Flip the account-active flag
    async fn set_active(&self, id: UserId, active: bool) -> RepoResult<()>;
}

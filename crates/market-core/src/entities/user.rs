//! User entity - a marketplace account

use chrono::{DateTime, Duration, Utc};

use crate::error::DomainError;
use crate::value_objects::{Role, UserId};

/// User entity representing a marketplace account.
///
/// The password hash is deliberately not part of the entity; it is passed
/// alongside on creation and fetched separately for credential checks, so
/// profile reads never carry credential material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub store_name: Option<String>,
    pub email_verified_at: Option<DateTime<Utc>>,
    /// Live verification token. Present only while unverified; cleared
    /// forever the moment it is consumed or replaced.
    pub email_verification_token: Option<String>,
    pub token_issued_at: Option<DateTime<Utc>>,
    pub store_verified_at: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// How long an issued verification token stays valid
    pub const VERIFICATION_TOKEN_TTL_HOURS: i64 = 24;

    /// Minimum wait between verification resends
    pub const RESEND_COOLDOWN_SECONDS: i64 = 60;

    /// Create a new unverified account. Email is normalized to lowercase
    /// here so uniqueness and lookups are case-insensitive everywhere.
    pub fn new(name: String, email: String, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            name,
            email: email.to_lowercase(),
            role,
            phone: None,
            description: None,
            store_name: None,
            email_verified_at: None,
            email_verification_token: None,
            token_issued_at: None,
            store_verified_at: None,
            last_login_at: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the email address has been verified
    #[inline]
    pub fn is_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }

    /// Check if the live token (if any) is past its validity window
    pub fn verification_token_expired(&self, now: DateTime<Utc>) -> bool {
        match self.token_issued_at {
            Some(issued_at) => now - issued_at > Duration::hours(Self::VERIFICATION_TOKEN_TTL_HOURS),
            None => false,
        }
    }

    /// Attach a fresh verification token, invalidating any previous one.
    /// Only one token field exists, so the old token dies the instant a
    /// new one is written.
    pub fn issue_verification_token(&mut self, token: String, now: DateTime<Utc>) {
        self.email_verification_token = Some(token);
        self.token_issued_at = Some(now);
        self.updated_at = now;
    }

    /// Consume a supplied verification token.
    ///
    /// On success the token is irreversibly cleared and the account becomes
    /// verified. The mismatch check runs first: a token that was already
    /// consumed (and therefore cleared) reports `TokenMismatch`, not
    /// `AlreadyVerified`.
    pub fn consume_verification_token(
        &mut self,
        supplied: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        match &self.email_verification_token {
            Some(token) if token == supplied => {
                if self.is_verified() {
                    return Err(DomainError::AlreadyVerified);
                }
                if self.verification_token_expired(now) {
                    return Err(DomainError::TokenExpired);
                }
                self.email_verification_token = None;
                self.token_issued_at = None;
                self.email_verified_at = Some(now);
                self.updated_at = now;
                Ok(())
            }
            _ => Err(DomainError::TokenMismatch),
        }
    }

    /// Check if a verification resend is currently allowed: only for
    /// unverified accounts, and not more often than the cooldown permits
    pub fn can_resend_verification(&self, now: DateTime<Utc>) -> bool {
        if self.is_verified() {
            return false;
        }
        match self.token_issued_at {
            Some(issued_at) => now - issued_at >= Duration::seconds(Self::RESEND_COOLDOWN_SECONDS),
            None => true,
        }
    }

    /// Seconds until the next resend is allowed (0 when allowed now)
    pub fn resend_retry_after_seconds(&self, now: DateTime<Utc>) -> i64 {
        match self.token_issued_at {
            Some(issued_at) => {
                (Duration::seconds(Self::RESEND_COOLDOWN_SECONDS) - (now - issued_at))
                    .num_seconds()
                    .max(0)
            }
            None => 0,
        }
    }

    /// Record a successful login
    pub fn record_login(&mut self, now: DateTime<Utc>) {
        self.last_login_at = Some(now);
        self.updated_at = now;
    }
}

//! Session entity - server-recognized proof of authentication

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

/// An authenticated session backed by an opaque bearer token.
///
/// The token itself is not stored here; it is the lookup key under which
/// this record lives. Revocation deletes the record, so a session that can
/// still be looked up is either live or expired, never revoked. A session
/// moves Anonymous -> Authenticated on login and back on logout or expiry;
/// there are no intermediate states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Open a new session for a user, valid for `ttl_seconds`
    pub fn new(user_id: UserId, issued_at: DateTime<Utc>, ttl_seconds: i64) -> Self {
        Self {
            user_id,
            issued_at,
            expires_at: issued_at + Duration::seconds(ttl_seconds),
        }
    }

    /// The store's TTL normally expires records first; this guards the
    /// window where one outlives its intended lifetime.
    #[inline]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

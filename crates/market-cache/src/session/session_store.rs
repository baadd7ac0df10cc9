//! Bearer-token session storage in Redis.
//!
//! Sessions live under their opaque token with automatic expiration, so a
//! token that is not in the store is not a session. Logout deletes the key,
//! which is what revocation means here.

use crate::pool::{RedisPool, RedisResult};
use market_core::{Session, UserId};
use redis::AsyncCommands;

/// Key prefix for sessions
const SESSION_PREFIX: &str = "session:";

/// Key prefix for the per-user token set
const USER_SESSIONS_PREFIX: &str = "user_sessions:";

/// Session store keyed by opaque bearer tokens
#[derive(Debug, Clone)]
pub struct SessionStore {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl SessionStore {
    /// Create a session store; `ttl_seconds` bounds every stored session
    #[must_use]
    pub fn new(pool: RedisPool, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }

    /// Session lifetime applied to stored tokens
    #[must_use]
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Generate Redis key for a session token
    fn key(token: &str) -> String {
        format!("{SESSION_PREFIX}{token}")
    }

    /// Generate Redis key for a user's token set
    fn user_key(user_id: UserId) -> String {
        format!("{USER_SESSIONS_PREFIX}{user_id}")
    }

    /// Store a session under its token
    pub async fn store(&self, token: &str, session: &Session) -> RedisResult<()> {
        let key = Self::key(token);
        self.pool.set(&key, session, Some(self.ttl_seconds)).await?;

        // Track the token in the user's set so logout-all can find it
        let user_key = Self::user_key(session.user_id);
        let mut conn = self.pool.get().await?;
        conn.sadd::<_, _, ()>(&user_key, token).await?;
        conn.expire::<_, ()>(&user_key, self.ttl_seconds as i64)
            .await?;

        tracing::debug!(user_id = %session.user_id, "Stored session");

        Ok(())
    }

    /// Look up the session for a token, if one is live
    pub async fn get(&self, token: &str) -> RedisResult<Option<Session>> {
        let key = Self::key(token);
        self.pool.get_value(&key).await
    }

    /// Revoke (delete) a session. Returns whether a session existed.
    pub async fn revoke(&self, token: &str) -> RedisResult<bool> {
        // Look the session up first to find the owning user's set
        if let Some(session) = self.get(token).await? {
            let user_key = Self::user_key(session.user_id);
            let mut conn = self.pool.get().await?;
            conn.srem::<_, _, ()>(&user_key, token).await?;
        }

        let key = Self::key(token);
        let deleted = self.pool.delete(&key).await?;

        if deleted {
            tracing::debug!("Revoked session");
        }

        Ok(deleted)
    }

    /// Revoke every session a user holds (logout from all devices).
    /// Returns the number of tokens that were tracked.
    pub async fn revoke_all_for_user(&self, user_id: UserId) -> RedisResult<u32> {
        let user_key = Self::user_key(user_id);
        let mut conn = self.pool.get().await?;

        let tokens: Vec<String> = conn.smembers(&user_key).await?;
        let count = tokens.len() as u32;

        if !tokens.is_empty() {
            let keys: Vec<String> = tokens.iter().map(|t| Self::key(t)).collect();
            let key_refs: Vec<&str> = keys.iter().map(String::as_str).collect();
            self.pool.delete_many(&key_refs).await?;
        }

        conn.del::<_, ()>(&user_key).await?;

        tracing::info!(user_id = %user_id, count = count, "Revoked all sessions for user");

        Ok(count)
    }
}

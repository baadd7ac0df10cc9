//! Service context - dependency container for services
//!
//! Holds the repositories, cache stores, and configuration needed by services.

use std::sync::Arc;

use market_cache::{SessionStore, SharedRedisPool};
use market_common::{SessionConfig, VerificationConfig};
use market_core::traits::{UserRepository, VerificationNotifier};
use market_db::PgPool;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - The user repository
/// - The Redis-backed session store
/// - The verification email notifier
/// - Session and verification configuration
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Redis pool
    redis_pool: SharedRedisPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,

    // Cache stores
    session_store: SessionStore,

    // Outbound notifications
    notifier: Arc<dyn VerificationNotifier>,

    // Configuration
    session: SessionConfig,
    verification: VerificationConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        pool: PgPool,
        redis_pool: SharedRedisPool,
        user_repo: Arc<dyn UserRepository>,
        notifier: Arc<dyn VerificationNotifier>,
        session: SessionConfig,
        verification: VerificationConfig,
    ) -> Self {
        // Clone the inner RedisPool from the Arc
        let inner_pool = (*redis_pool).clone();
        let session_store = SessionStore::new(inner_pool, session.ttl_seconds.max(0) as u64);

        Self {
            pool,
            redis_pool,
            user_repo,
            session_store,
            notifier,
            session,
            verification,
        }
    }

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the session store
    pub fn session_store(&self) -> &SessionStore {
        &self.session_store
    }

    /// Get the verification notifier
    pub fn notifier(&self) -> &Arc<dyn VerificationNotifier> {
        &self.notifier
    }

    /// Session lifetime in seconds
    pub fn session_ttl_seconds(&self) -> i64 {
        self.session.ttl_seconds
    }

    /// Get the verification configuration
    pub fn verification(&self) -> &VerificationConfig {
        &self.verification
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &"SharedRedisPool")
            .field("user_repo", &"...")
            .field("session_store", &self.session_store)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    notifier: Option<Arc<dyn VerificationNotifier>>,
    session: Option<SessionConfig>,
    verification: Option<VerificationConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            redis_pool: None,
            user_repo: None,
            notifier: None,
            session: None,
            verification: None,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn VerificationNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn session_config(mut self, session: SessionConfig) -> Self {
        self.session = Some(session);
        self
    }

    pub fn verification_config(mut self, verification: VerificationConfig) -> Self {
        self.verification = Some(verification);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool
                .ok_or_else(|| super::error::ServiceError::validation("pool is required"))?,
            self.redis_pool
                .ok_or_else(|| super::error::ServiceError::validation("redis_pool is required"))?,
            self.user_repo
                .ok_or_else(|| super::error::ServiceError::validation("user_repo is required"))?,
            self.notifier
                .ok_or_else(|| super::error::ServiceError::validation("notifier is required"))?,
            self.session
                .ok_or_else(|| super::error::ServiceError::validation("session config is required"))?,
            self.verification.ok_or_else(|| {
                super::error::ServiceError::validation("verification config is required")
            })?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

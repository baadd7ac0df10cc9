//! # market-cache
//!
//! Redis caching layer for bearer-token sessions.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Session Storage**: Opaque-token session records with TTL and
//!   support for revoking every session a user holds
//!
//! ## Example
//!
//! ```ignore
//! use market_cache::{RedisPool, RedisPoolConfig, SessionStore};
//!
//! let config = RedisPoolConfig::default();
//! let pool = RedisPool::new(config)?;
//!
//! let sessions = SessionStore::new(pool, 86_400);
//! sessions.store(&token, &session).await?;
//! ```

pub mod pool;
pub mod session;

// Re-export pool types
pub use pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};

// Re-export session types
pub use session::SessionStore;

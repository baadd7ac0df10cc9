//! Database layer for the campus marketplace
//!
//! PostgreSQL-backed implementation of the repository ports defined in
//! `market-core`. Provides connection pooling, row models, and mappers
//! between rows and domain entities.
//!
//! # Usage
//!
//! ```rust,ignore
//! use market_db::{create_pool, DatabaseConfig, PgUserRepository};
//!
//! let config = DatabaseConfig::from_env();
//! let pool = create_pool(&config).await?;
//! let users = PgUserRepository::new(pool);
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, DatabaseConfig};
pub use repositories::PgUserRepository;

// Re-export so callers don't need a direct sqlx dependency
pub use sqlx::PgPool;

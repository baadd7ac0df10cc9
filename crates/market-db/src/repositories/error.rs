//! Error mapping helpers for repository implementations

use market_core::{DomainError, UserId};
use sqlx::Error as SqlxError;

/// Map a sqlx error to a domain error
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map a sqlx error, resolving unique violations on the users table to the
/// conflicting column. The table carries unique indexes on email and
/// store_name.
pub fn map_user_unique_violation(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some(name) if name.contains("store_name") => DomainError::StoreNameAlreadyExists,
                _ => DomainError::EmailAlreadyExists,
            };
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Not-found error for a user id
pub fn user_not_found(id: UserId) -> DomainError {
    DomainError::UserNotFound(id)
}

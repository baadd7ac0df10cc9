//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod admin;
pub mod auth;
pub mod context;
pub mod error;
pub mod notifier;
pub mod profile;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export all services for convenience
pub use admin::AdminService;
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use notifier::LogNotifier;
pub use profile::ProfileService;
